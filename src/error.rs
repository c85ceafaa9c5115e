use thiserror::Error;

/// Error type for rejected permission configuration.
///
/// Matching itself never fails; only the delimiter/wildcard pair a caller
/// configures can be invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The segment delimiter was empty.
    #[error("permission delimiter must not be empty")]
    EmptyDelimiter,
    /// The wildcard token was empty.
    #[error("permission wildcard must not be empty")]
    EmptyWildcard,
    /// The wildcard token contains the delimiter, so it could never occupy a single segment.
    #[error("wildcard {wildcard:?} contains delimiter {delimiter:?}")]
    WildcardContainsDelimiter { wildcard: String, delimiter: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PermissionError::EmptyDelimiter.to_string(),
            "permission delimiter must not be empty"
        );

        let err = PermissionError::WildcardContainsDelimiter {
            wildcard: "*.*".to_string(),
            delimiter: ".".to_string(),
        };
        assert_eq!(err.to_string(), r#"wildcard "*.*" contains delimiter ".""#);
    }
}
