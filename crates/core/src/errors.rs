use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Invalid day of week: {0}")]
    InvalidDayOfWeek(String),

    #[error("Invalid slot duration: {0} minutes")]
    InvalidDuration(i64),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Slot no longer available: {0}")]
    SlotUnavailable(String),

    #[error("Backend error: {0}")]
    Backend(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// True for errors caused by malformed schedule or booking data rather
    /// than by the caller's request.
    pub fn is_data_defect(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidTimeFormat(_)
                | BookingError::InvalidDayOfWeek(_)
                | BookingError::InvalidDuration(_)
                | BookingError::InvalidTimestamp(_)
        )
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
