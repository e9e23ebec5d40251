//! Request handlers.
//!
//! Handlers translate HTTP input into store operations and map errors
//! via [`AppError`](crate::error::AppError).

pub mod nudge;
