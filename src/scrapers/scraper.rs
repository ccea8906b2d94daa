use crate::core::FetchError;
use crate::HttpResponse;
use async_trait::async_trait;
use log::{debug, info};
use url::Url;

#[async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch_single(&self, url: Url) -> Result<HttpResponse, FetchError>;

    /// Parses `url` and fetches it once. Any HTTP status is returned as-is.
    async fn request(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let parsed = Url::parse(url.trim()).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(FetchError::UnsupportedScheme(other.to_string())),
        }

        info!("Fetching URL: {}", parsed);
        let response = self.fetch_single(parsed).await?;
        debug!(
            "Received response: status={}, body_length={}, elapsed={}ms",
            response.status,
            response.body.len(),
            response.elapsed.num_milliseconds()
        );

        Ok(response)
    }

    /// Like [`request`](Scraper::request), but rejects non-2xx responses.
    async fn fetch(&self, url: &str) -> Result<HttpResponse, FetchError> {
        ensure_success(self.request(url).await?)
    }
}

pub fn ensure_success(response: HttpResponse) -> Result<HttpResponse, FetchError> {
    if !(200..300).contains(&response.status) {
        return Err(FetchError::Status {
            status: response.status,
            url: response.url.to_string(),
        });
    }
    Ok(response)
}
