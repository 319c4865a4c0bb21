//! Request handlers.
//!
//! Handlers deserialize the request, delegate to `repay_core`, and map
//! errors via [`AppError`](crate::error::AppError).

pub mod validation;
