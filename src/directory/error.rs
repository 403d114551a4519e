use thiserror::Error;

/// Load-time validation failure. Any of these aborts the index build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("exhibitor record #{position} has an empty booth code")]
    EmptyCode { position: usize },

    #[error("duplicate booth code '{code}'")]
    DuplicateCode { code: String },

    #[error("exhibitor '{code}' has invalid hall number 0")]
    InvalidHall { code: String },

    #[error("exhibitor '{code}' has no name in either language")]
    MissingName { code: String },
}

impl ValidationError {
    /// The booth code the error is about, when the record had one
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::EmptyCode { .. } => None,
            Self::DuplicateCode { code }
            | Self::InvalidHall { code }
            | Self::MissingName { code } => Some(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_offending_code() {
        let err = ValidationError::DuplicateCode {
            code: "B29".to_string(),
        };
        assert_eq!(err.code(), Some("B29"));
        assert!(err.to_string().contains("B29"));
    }

    #[test]
    fn test_empty_code_has_no_code() {
        let err = ValidationError::EmptyCode { position: 3 };
        assert_eq!(err.code(), None);
        assert!(err.to_string().contains("#3"));
    }
}
