//! Error types for the Microdon core
//!
//! Everything in this crate is in-memory, so every error is a contract
//! violation reported to the caller right away:
//! - argument checks (`Validation`, `OutOfOrder`)
//! - lookups (`NotFound`, `UserNotFound`, `AlreadyExists`)
//! - cursor misuse (`NoNextElement`, `NoPreviousElement`, `StaleTraversal`)

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::UserId;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Post timestamp {at} is older than the newest post ({head})")]
    OutOfOrder {
        at: DateTime<Utc>,
        head: DateTime<Utc>,
    },

    #[error("Cursor has no next element")]
    NoNextElement,

    #[error("Cursor has no previous element")]
    NoPreviousElement,

    #[error("Traversal is stale: posts or subscriptions changed since the last restart")]
    StaleTraversal,
}

impl DomainError {
    /// Build a `Validation` error for a required string that was blank
    pub(crate) fn blank(field: &str) -> Self {
        DomainError::Validation(format!("{} must not be blank", field))
    }
}
