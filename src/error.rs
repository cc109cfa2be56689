/*
 * Error taxonomy for the control layer. Every fallible operation returns
 * `Result<T>`; nothing is retried internally. Precondition failures are checked
 * before any native call is made, resource failures leave the caller's object in
 * its previous state, and invariant violations are logged by the code that
 * detects them before being surfaced here.
 */
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Invalid configuration, duplicate identifier, or use before creation.
    Precondition(String),
    /// A native resource (window, brush, font) could not be allocated.
    ResourceCreation {
        operation: &'static str,
        detail: String,
    },
    /// Internal bookkeeping contradicts the native window tree.
    InvariantViolation(String),
    /// A native handle was null or no longer refers to a live window.
    InvalidHandle(String),
    /// A native call failed for a reason not covered above.
    OperationFailed(String),
}

impl PlatformError {
    pub(crate) fn resource(operation: &'static str, detail: impl Into<String>) -> Self {
        PlatformError::ResourceCreation {
            operation,
            detail: detail.into(),
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, PlatformError::Precondition(_))
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Precondition(msg) => write!(f, "precondition failed: {msg}"),
            PlatformError::ResourceCreation { operation, detail } => {
                write!(f, "resource creation failed in {operation}: {detail}")
            }
            PlatformError::InvariantViolation(msg) => write!(f, "invariant violated: {msg}"),
            PlatformError::InvalidHandle(msg) => write!(f, "invalid handle: {msg}"),
            PlatformError::OperationFailed(msg) => write!(f, "operation failed: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        PlatformError::OperationFailed(format!("{err:?}"))
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_error_names_the_operation() {
        let err = PlatformError::resource("create_brush", "out of GDI handles");
        assert_eq!(
            err.to_string(),
            "resource creation failed in create_brush: out of GDI handles"
        );
        assert!(!err.is_precondition());
    }

    #[test]
    fn precondition_is_detected() {
        assert!(PlatformError::Precondition("x".into()).is_precondition());
    }
}
