/// Session extraction from the `Authorization` header
pub mod auth;
/// Mapping of domain errors onto HTTP responses
pub mod error_handling;
