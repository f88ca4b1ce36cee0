//! Utilities - error re-exports, logging, business time

pub mod logger;
pub mod time;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
