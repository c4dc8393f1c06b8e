//! Domain error types.

/// Errors raised when constructing domain values from raw input.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    #[error("Unknown key binding: {0}")]
    UnknownKeyBinding(String),
}
