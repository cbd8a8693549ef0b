//! Error types for candy.

use thiserror::Error;

/// Result type alias for candy operations.
pub type CandyResult<T> = Result<T, CandyError>;

/// Driver error descriptor: a code, a message, and driver-specific detail.
///
/// This mirrors the three-part error info surface of prepared-statement
/// drivers. A healthy statement reports [`ErrorInfo::ok`], whose code is `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Driver error code; `0` means no error.
    pub code: i32,
    /// Human-readable message from the driver.
    pub message: String,
    /// Driver-specific detail, if any.
    pub detail: Option<String>,
}

impl ErrorInfo {
    /// The "no error" sentinel.
    pub fn ok() -> Self {
        Self {
            code: 0,
            message: String::new(),
            detail: None,
        }
    }

    /// Create a descriptor from a code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
        }
    }

    /// Attach driver-specific detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Whether this descriptor is the "no error" sentinel.
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

/// Error types for statement building and execution.
#[derive(Debug, Error)]
pub enum CandyError {
    /// A required builder argument was never set before `build()`.
    #[error("missing builder argument: {0}")]
    MissingArgument(&'static str),

    /// `execute()` or a fetch was called before a successful `build()`.
    #[error("no statement prepared: call build() first")]
    NotBuilt,

    /// Error propagated verbatim from the connection driver.
    #[error("driver error: {0}")]
    Driver(ErrorInfo),

    /// Other errors.
    #[error("{0}")]
    Other(String),
}

impl CandyError {
    /// Create a driver error from a code and message.
    pub fn driver(code: i32, message: impl Into<String>) -> Self {
        Self::Driver(ErrorInfo::new(code, message))
    }

    /// Check if this is a configuration error (missing argument).
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, Self::MissingArgument(_))
    }

    /// Convert into a driver-style descriptor.
    ///
    /// Driver errors pass through unchanged; local errors map to code `-1`.
    /// Used by [`crate::Batch`] to capture per-entry failures uniformly.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::Driver(info) => info.clone(),
            other => ErrorInfo::new(-1, other.to_string()),
        }
    }
}
