//! Unified error types for the drift bottle core.
//!
//! Two failure domains with very different handling:
//!
//! - [`StoreError`] — storage faults are fatal to the single invocation and
//!   surface to the operator; the user only sees a generic failure reply.
//! - [`GatewayError`] — gateway faults are recovered locally: the service
//!   substitutes a placeholder display name and the operation proceeds.
//!
//! Empty throw content and an empty (or race-lost) pick are *outcomes*, not
//! errors; see [`ThrowOutcome`](crate::ThrowOutcome) and
//! [`PickOutcome`](crate::PickOutcome).

use thiserror::Error;

// =============================================================================
// Store Errors
// =============================================================================

/// Errors that can occur in store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Underlying storage engine failure (I/O, corrupt table, bad row).
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The connection lock was poisoned by a panicking thread.
    #[error("storage connection lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Creates a backend error from any displayable cause.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

// =============================================================================
// Gateway Errors
// =============================================================================

/// Errors that can occur when talking to the chat gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Transport-level failure (connect, send, timeout).
    #[error("http request failed: {0}")]
    Http(String),

    /// The gateway answered with a non-success HTTP status.
    #[error("gateway returned HTTP {code}")]
    Status {
        /// The HTTP status code.
        code: u16,
    },

    /// The gateway answered but reported a protocol-level failure.
    #[error("gateway api error: {message} (retcode {retcode})")]
    Api {
        /// The OneBot return code.
        retcode: i64,
        /// Error message from the gateway.
        message: String,
    },

    /// A successful envelope carried no `data` payload.
    #[error("gateway response carried no data")]
    MissingData,

    /// The response body could not be decoded.
    #[error("failed to decode gateway response: {0}")]
    Json(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
