/// Error types for the Machine Translation module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// Missing or unusable configuration (API key, endpoint, timeout)
    ConfigError(String),
    /// Transport failure talking to the provider, including timeouts and non-2xx statuses
    NetworkError(String),
    /// Provider answered, but the body was not the expected envelope
    InvalidResponse(String),
    /// Provider answered with an empty `choices` array
    NoCompletion,
    /// Provider-side translation failure that is not a transport problem
    TranslationError(String),
    /// Rejected user input
    InvalidInput(String),
}

impl MtError {
    /// True for failures raised by a translation provider.
    ///
    /// These are the errors the degradation engine folds into its output text.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            MtError::NetworkError(_)
                | MtError::InvalidResponse(_)
                | MtError::NoCompletion
                | MtError::TranslationError(_)
        )
    }
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MtError::NetworkError(msg) => write!(f, "Provider API error: {}", msg),
            MtError::InvalidResponse(msg) => {
                write!(f, "Unexpected API response format: {}", msg)
            }
            MtError::NoCompletion => write!(f, "No translation returned from API"),
            MtError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
            MtError::InvalidInput(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for MtError {}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MtError::InvalidResponse(err.to_string())
        } else {
            MtError::NetworkError(err.to_string())
        }
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            MtError::NoCompletion.to_string(),
            "No translation returned from API"
        );
        assert_eq!(
            MtError::NetworkError("timed out".to_string()).to_string(),
            "Provider API error: timed out"
        );
        assert_eq!(
            MtError::InvalidInput("Text is required".to_string()).to_string(),
            "Text is required"
        );
    }

    #[test]
    fn test_provider_error_classification() {
        assert!(MtError::NetworkError(String::new()).is_provider_error());
        assert!(MtError::InvalidResponse(String::new()).is_provider_error());
        assert!(MtError::NoCompletion.is_provider_error());
        assert!(MtError::TranslationError(String::new()).is_provider_error());
        assert!(!MtError::ConfigError(String::new()).is_provider_error());
        assert!(!MtError::InvalidInput(String::new()).is_provider_error());
    }
}
