//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Required field missing: {0}")]
    MissingField(&'static str),

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Photo limit reached (max {0})")]
    PhotoLimitReached(usize),

    #[error("No photo with id {0}")]
    PhotoNotFound(uuid::Uuid),

    #[error("No service visit at index {0}")]
    VisitIndexOutOfBounds(usize),

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}
