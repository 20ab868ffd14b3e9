//! Error types for the caching layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Configuration Error Enum ==
/// Errors caused by a mis-declared call site.
///
/// These are never retried: a wrong key must not be cached silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Declared parameter names and runtime arguments differ in length
    #[error("Argument count mismatch: {declared} declared parameters, {supplied} arguments")]
    ArgumentCountMismatch { declared: usize, supplied: usize },

    /// The same parameter name was declared twice
    #[error("Duplicate parameter: {0}")]
    DuplicateParameter(String),

    /// The key template could not be parsed
    #[error("Malformed key template {template:?} at byte {position}: {reason}")]
    MalformedTemplate {
        template: String,
        position: usize,
        reason: &'static str,
    },

    /// The parameter-reference expression could not be parsed
    #[error("Malformed key expression {expression:?}: {reason}")]
    MalformedExpression {
        expression: String,
        reason: String,
    },

    /// A template placeholder is not listed in the expression
    #[error("Placeholder {{{0}}} is not bound by the key expression")]
    UnboundPlaceholder(String),

    /// The expression references a parameter the operation does not declare
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// A dotted reference does not resolve inside its argument.
    ///
    /// Depends on the argument values, so the interceptor runs such a call
    /// uncached instead of failing it.
    #[error("Reference {0} does not resolve against the supplied argument")]
    UnresolvedPath(String),
}

// == Store Error Enum ==
/// Failures reported by a [`CacheStore`](crate::cache::CacheStore).
///
/// Absence is not an error; stores report it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be read back
    #[error("Corrupt record for key {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// The store rejected the request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Store is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),
}

// == Intercept Error Enum ==
/// Error returned by [`CacheInterceptor::intercept`](crate::interceptor::CacheInterceptor::intercept).
///
/// Store failures never appear here.
#[derive(Error, Debug)]
pub enum InterceptError<E> {
    /// The call site is mis-declared
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The wrapped operation failed
    #[error("{0}")]
    Operation(E),
}

impl<E> InterceptError<E> {
    /// Returns the wrapped operation's own error, if that is what failed.
    pub fn into_operation_error(self) -> Option<E> {
        match self {
            InterceptError::Operation(err) => Some(err),
            InterceptError::Config(_) => None,
        }
    }

    /// Returns true for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, InterceptError::Config(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
