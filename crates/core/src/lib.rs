//! Repay core library.
//!
//! Pure domain logic shared by the HTTP service: the field and entity
//! validation engine, the error type, and common type aliases. Nothing in
//! this crate performs I/O.

pub mod error;
pub mod types;
pub mod validation;
