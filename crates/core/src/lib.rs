//! # MediSys Core
//!
//! Domain types and the appointment availability engine shared by the
//! MediSys client and API crates.
//!
//! - [`errors`]: the error taxonomy used across the workspace
//! - [`models`]: wire types exchanged with the hospital backend and the UI
//! - [`engine`]: slot generation, local/UTC conversion and availability marking
//!
//! Nothing in this crate performs I/O. Every engine function takes its inputs
//! explicitly and returns a fresh result, so it is safe to call on every render.

pub mod engine;
pub mod errors;
pub mod models;
