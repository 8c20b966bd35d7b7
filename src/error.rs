//! Error taxonomy for the course hierarchy core.
//!
//! - [`CourseError::Format`] - payload is not the declared shape; raised before any store access.
//! - [`CourseError::Validation`] - a candidate or row breaks a field constraint.
//! - [`CourseError::NotFound`] - referenced course id does not exist.
//! - [`CourseError::Store`] - statement or transaction failure from SQLite.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("invalid {format} payload: {message}")]
    Format {
        format: &'static str,
        message: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("course {0} not found")]
    NotFound(i64),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl CourseError {
    pub fn format(format: &'static str, message: impl Into<String>) -> Self {
        Self::Format {
            format,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Stable IPC error code for this failure class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Format { .. } => "bad_format",
            Self::Validation(_) => "bad_params",
            Self::NotFound(_) => "not_found",
            Self::Store(_) => "db_error",
        }
    }

    /// True when SQLite rejected a single statement on a constraint.
    /// Bulk import treats these as row-level and keeps going.
    pub fn is_row_rejection(&self) -> bool {
        match self {
            Self::Store(rusqlite::Error::SqliteFailure(e, _)) => {
                e.code == rusqlite::ErrorCode::ConstraintViolation
            }
            _ => false,
        }
    }
}

pub type CourseResult<T> = Result<T, CourseError>;
