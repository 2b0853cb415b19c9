use async_trait::async_trait;
use migrate_core::MigrateResult;

/// Binary content downloaded for an attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedFile {
    pub content: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchedFile {
    pub fn new(content: Vec<u8>) -> Self {
        Self {
            content,
            content_type: None,
        }
    }
}

/// Where the converter gets attachment bytes from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentSource: Send + Sync {
    /// Downloads `url` in full, sending every header in `headers`. A header
    /// name may appear more than once.
    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> MigrateResult<FetchedFile>;
}
