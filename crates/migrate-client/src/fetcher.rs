//! Downloads attachment content over plain HTTP GET.

use async_trait::async_trait;
use migrate_core::{MigrateError, MigrateResult};
use migrate_domain::{AttachmentSource, FetchedFile};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::{check_status, http_client};

/// Fetches attachment bodies into memory. There is no size cap and no retry.
#[derive(Debug, Clone)]
pub struct HttpAttachmentFetcher {
    client: Client,
}

impl HttpAttachmentFetcher {
    pub fn new() -> MigrateResult<Self> {
        Ok(Self {
            client: http_client()?,
        })
    }
}

#[async_trait]
impl AttachmentSource for HttpAttachmentFetcher {
    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> MigrateResult<FetchedFile> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| MigrateError::transport(url, e))?;
        let response = check_status(response, url).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string());
        let content = response
            .bytes()
            .await
            .map_err(|e| MigrateError::transport(url, e))?
            .to_vec();

        tracing::debug!("Fetched {} bytes from {}", content.len(), url);
        Ok(FetchedFile {
            content,
            content_type,
        })
    }
}
