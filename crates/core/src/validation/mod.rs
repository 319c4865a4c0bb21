//! Field and entity validation engine.
//!
//! Provides single-value checks, declarative field rules with a pure-logic
//! evaluator, hand-assembled customer/transaction validators, and bulk
//! import validation. Everything here is synchronous and side-effect free.

pub mod entities;
pub mod evaluator;
pub mod import;
pub mod presets;
pub mod primitives;
pub mod rules;
