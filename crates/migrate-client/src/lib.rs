pub mod destination;
pub mod fetcher;
pub mod throttle;
pub mod uploader;

pub use destination::{DestinationApi, DestinationClient};
pub use fetcher::HttpAttachmentFetcher;
pub use throttle::RequestThrottle;
pub use uploader::{UploadSummary, Uploader};

const USER_AGENT: &str = concat!("board-migrate/", env!("CARGO_PKG_VERSION"));

/// Builds the reqwest client shared by the fetcher and the upload client.
pub(crate) fn http_client() -> migrate_core::MigrateResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| migrate_core::MigrateError::transport("client setup", e))
}

/// Turns a non-2xx response into [`migrate_core::MigrateError::Api`].
pub(crate) async fn check_status(
    response: reqwest::Response,
    url: &str,
) -> migrate_core::MigrateResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(migrate_core::MigrateError::Api {
        status: status.as_u16(),
        url: url.to_string(),
        body,
    })
}
