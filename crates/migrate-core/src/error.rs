use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failure on {url}:\n{status}: {body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Attachment {name} was rejected: {message}")]
    AttachmentRejected { name: String, message: String },

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MigrateError {
    pub fn transport(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Status code of a rejected destination or source request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_carries_status_and_body() {
        let err = MigrateError::Api {
            status: 403,
            url: "https://tasks.example.com/api/v1/projects/7/tasks".to_string(),
            body: "{\"message\":\"Forbidden\"}".to_string(),
        };

        assert_eq!(err.status(), Some(403));
        let message = err.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("Forbidden"));
    }

    #[test]
    fn test_transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = MigrateError::transport("https://example.com", io);

        assert_eq!(err.status(), None);
        assert!(std::error::Error::source(&err).is_some());
    }
}
