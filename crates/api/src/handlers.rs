pub mod auth;
pub mod availability;
pub mod booking;
pub mod doctor;
pub mod schedule;
