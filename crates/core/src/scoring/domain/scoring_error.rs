use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// The inputs cannot produce a defined score, e.g. an empty reference.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = ScoringError::InvalidArgument("reference contains no tokens".to_string());
        assert_eq!(
            err.to_string(),
            "invalid argument: reference contains no tokens"
        );
    }
}
