//! Directory access error types
//!
//! Error definitions with fatal/absorbable classification. Per-object failures
//! (a member that cannot be looked up, a SID that cannot be translated) are
//! absorbable: the caller skips the object and keeps going. Connection-level
//! failures are fatal and terminate the edge stream they occur on.

use thiserror::Error;

/// Error that can occur while talking to the directory service.
#[derive(Debug, Error)]
pub enum DirectoryError {
    // Connection errors (fatal for the current stream)
    /// Failed to establish or keep a connection to the directory.
    #[error("directory connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Directory did not answer within the configured timeout.
    #[error("directory timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    // Query errors (absorbable at the per-object call site)
    /// A search request was rejected or failed server-side.
    #[error("search failed against {base_dn}: {message}")]
    SearchFailed {
        base_dn: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested object does not exist in the directory.
    #[error("object not found: {identifier}")]
    ObjectNotFound { identifier: String },

    /// A distinguished name could not be parsed or mapped to a domain.
    #[error("invalid distinguished name: {dn}")]
    InvalidDn { dn: String },

    /// A raw entry could not be classified into a known object kind.
    #[error("could not classify entry {dn}")]
    ClassificationFailed { dn: String },

    /// A SID could not be translated to a display name or domain.
    #[error("SID translation failed for {sid}: {message}")]
    SidTranslationFailed { sid: String, message: String },

    /// Internal error.
    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DirectoryError {
    /// Check if this error means directory connectivity itself is gone.
    ///
    /// Fatal errors terminate the edge stream they occur on so the
    /// orchestration layer can log and skip the offending object. Everything
    /// else is absorbed at per-member or per-window granularity.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DirectoryError::ConnectionFailed { .. } | DirectoryError::Timeout { .. }
        )
    }

    /// Check if this error can be absorbed by skipping the affected object.
    pub fn is_absorbable(&self) -> bool {
        !self.is_fatal()
    }

    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            DirectoryError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            DirectoryError::Timeout { .. } => "TIMEOUT",
            DirectoryError::SearchFailed { .. } => "SEARCH_FAILED",
            DirectoryError::ObjectNotFound { .. } => "OBJECT_NOT_FOUND",
            DirectoryError::InvalidDn { .. } => "INVALID_DN",
            DirectoryError::ClassificationFailed { .. } => "CLASSIFICATION_FAILED",
            DirectoryError::SidTranslationFailed { .. } => "SID_TRANSLATION_FAILED",
            DirectoryError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    // Convenience constructors

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        DirectoryError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection failed error with source.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DirectoryError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a search failed error.
    pub fn search_failed(base_dn: impl Into<String>, message: impl Into<String>) -> Self {
        DirectoryError::SearchFailed {
            base_dn: base_dn.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a search failed error with source.
    pub fn search_failed_with_source(
        base_dn: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DirectoryError::SearchFailed {
            base_dn: base_dn.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        DirectoryError::Internal {
            message: message.into(),
            source: None,
        }
    }
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_errors() {
        let fatal = vec![
            DirectoryError::connection_failed("link down"),
            DirectoryError::Timeout { timeout_secs: 30 },
        ];

        for err in fatal {
            assert!(err.is_fatal(), "expected {} to be fatal", err.error_code());
            assert!(!err.is_absorbable());
        }
    }

    #[test]
    fn test_absorbable_errors() {
        let absorbable = vec![
            DirectoryError::search_failed("CN=X,DC=corp,DC=local", "referral"),
            DirectoryError::ObjectNotFound {
                identifier: "CN=Gone,DC=corp,DC=local".to_string(),
            },
            DirectoryError::InvalidDn {
                dn: "not-a-dn".to_string(),
            },
            DirectoryError::ClassificationFailed {
                dn: "CN=Odd,DC=corp,DC=local".to_string(),
            },
            DirectoryError::SidTranslationFailed {
                sid: "S-1-5-21-1-2-3-513".to_string(),
                message: "no mapping".to_string(),
            },
        ];

        for err in absorbable {
            assert!(
                err.is_absorbable(),
                "expected {} to be absorbable",
                err.error_code()
            );
            assert!(!err.is_fatal());
        }
    }

    #[test]
    fn test_error_display() {
        let err = DirectoryError::Timeout { timeout_secs: 30 };
        assert_eq!(err.to_string(), "directory timed out after 30 seconds");

        let err = DirectoryError::search_failed("DC=corp,DC=local", "busy");
        assert_eq!(
            err.to_string(),
            "search failed against DC=corp,DC=local: busy"
        );
    }

    #[test]
    fn test_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = DirectoryError::connection_failed_with_source("failed", source);

        assert!(err.is_fatal());
        if let DirectoryError::ConnectionFailed { source, .. } = &err {
            assert!(source.is_some());
        } else {
            panic!("expected ConnectionFailed variant");
        }
    }
}
