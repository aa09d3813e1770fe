//! Typed failures returned by every service operation.
//!
//! Each operation returns exactly one of these kinds. The request layer maps
//! them to status codes; nothing in this crate collapses one kind into another.

/// Failure returned by the query service and the quiz selector.
///
/// # Example
///
/// ```
/// # use trivia_core::Error;
/// let err = Error::not_found("no questions on page 3");
/// match err {
///     Error::NotFound { message } => assert_eq!(message, "no questions on page 3"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The input violates a precondition (missing search term, missing field).
    BadRequest {
        /// What was wrong with the input
        message: String,
    },

    /// The request was well formed but matched no data.
    NotFound {
        /// What could not be found
        message: String,
    },

    /// The operation could not complete (store failure, entropy failure).
    Unprocessable {
        /// Underlying cause
        message: String,
    },

    /// The quiz session has no eligible question left.
    ///
    /// This is the expected end of a session, not a fault.
    Exhausted,
}

impl Error {
    /// Create a `BadRequest` failure.
    #[inline]
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a `BadRequest` failure for a missing required field.
    #[inline]
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::BadRequest {
            message: format!("missing required field `{field}`"),
        }
    }

    /// Create a `NotFound` failure.
    #[inline]
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an `Unprocessable` failure.
    #[inline]
    #[must_use]
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "bad_request",
            Self::NotFound { .. } => "not_found",
            Self::Unprocessable { .. } => "unprocessable",
            Self::Exhausted => "exhausted",
        }
    }

    /// Human-readable message for the boundary layer.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message }
            | Self::NotFound { message }
            | Self::Unprocessable { message } => message,
            Self::Exhausted => "no questions left in this quiz",
        }
    }

    /// Whether this is the expected end of a quiz session.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest { message } => write!(f, "bad request: {message}"),
            Self::NotFound { message } => write!(f, "not found: {message}"),
            Self::Unprocessable { message } => write!(f, "unprocessable: {message}"),
            Self::Exhausted => f.write_str("quiz exhausted"),
        }
    }
}

impl std::error::Error for Error {}

/// Failure reported by a [`RecordStore`](crate::RecordStore) implementation.
///
/// Store failures are never the client's fault, so they always surface as
/// [`Error::Unprocessable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Create a store error from any displayable cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error for a lock that a panicking thread left poisoned.
    #[must_use]
    pub fn poisoned() -> Self {
        Self::new("record store lock poisoned")
    }

    /// The underlying message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record store: {}", self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Unprocessable {
            message: err.to_string(),
        }
    }
}
