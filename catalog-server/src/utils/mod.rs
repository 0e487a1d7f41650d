//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error types
//! - [`AppResponse`] - API response envelope
//! - ID generation, logging, validation helpers

pub mod error;
pub mod ids;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResponse, AppResult};
pub use error::{ok, ok_with_message};
pub use ids::{now_millis, snowflake_id};
