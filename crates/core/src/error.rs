//! Inventory error model.

use thiserror::Error;

/// Result type used by every inventory operation.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory operation error.
///
/// The façade never produces these on its own; they originate in the delegate
/// and propagate to the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The remote service could not be reached or answered unexpectedly.
    #[error("transport error: {0}")]
    Transport(String),

    /// A record was rejected as malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The requested product identifier does not resolve.
    #[error("product not found: {0}")]
    NotFound(String),

    /// The client is missing its delegate or its connection settings.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl InventoryError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
