//! The `Result` every fallible console operation returns.

use crate::error::AppError;

/// Backend calls, cache reads, and config loading all fail with [`AppError`].
pub type AppResult<T> = Result<T, AppError>;
