/// Errors raised by `repay_core` operations.
///
/// Validation *outcomes* are not errors; they are returned as
/// [`ValidationResult`](crate::validation::rules::ValidationResult). This
/// type covers inputs the engine cannot evaluate at all, such as a rule spec
/// with an uncompilable pattern.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}
