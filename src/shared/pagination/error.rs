use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be at least {min}, got {value}")]
    PageOutOfRange { value: u64, min: u64 },

    #[error("limit must be within {min}..={max}, got {value}")]
    LimitOutOfRange { value: u64, min: u64, max: u64 },
}
