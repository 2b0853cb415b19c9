use std::fmt;

/// Trello API key and token, used only to download uploaded attachments.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceCredentials {
    pub api_key: String,
    pub api_token: String,
}

impl SourceCredentials {
    pub fn new(api_key: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_token: api_token.into(),
        }
    }

    /// Headers accepted by the Trello attachment download endpoint.
    pub fn authorization_headers(&self) -> Vec<(String, String)> {
        vec![(
            "Authorization".to_string(),
            format!(
                "OAuth oauth_consumer_key=\"{}\", oauth_token=\"{}\"",
                self.api_key, self.api_token
            ),
        )]
    }
}

impl fmt::Debug for SourceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceCredentials")
            .field("api_key", &self.api_key)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Vikunja instance URL and bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct DestinationCredentials {
    pub base_url: String,
    pub token: String,
}

impl DestinationCredentials {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for DestinationCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationCredentials")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
