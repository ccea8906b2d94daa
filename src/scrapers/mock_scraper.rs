use crate::core::FetchError;
use crate::HttpResponse;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::sleep;
use url::Url;

use super::Scraper;

#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<std::time::Duration>,
}

impl MockResponse {
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Serves canned pages keyed by URL. Unknown URLs fail like a refused connection.
#[derive(Clone, Default)]
pub struct MockScraper {
    responses: Arc<HashMap<String, MockResponse>>,
    calls: Arc<AtomicUsize>,
}

impl MockScraper {
    pub fn new(responses: Vec<(&str, MockResponse)>) -> Self {
        let responses = responses
            .into_iter()
            .filter_map(|(url, response)| {
                Url::parse(url)
                    .ok()
                    .map(|parsed| (parsed.to_string(), response))
            })
            .collect();

        Self {
            responses: Arc::new(responses),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(&self, url: Url) -> Result<HttpResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let response = self
            .responses
            .get(url.as_str())
            .ok_or_else(|| FetchError::Connection(format!("no route to {}", url)))?;

        if let Some(delay) = response.delay {
            sleep(delay).await;
        }

        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            "text/html; charset=utf-8".to_string(),
        );

        Ok(HttpResponse {
            url,
            status: response.status,
            headers,
            body: response.body.clone(),
            timestamp: Utc::now(),
            elapsed: chrono::Duration::milliseconds(
                response.delay.map(|d| d.as_millis() as i64).unwrap_or(0),
            ),
        })
    }
}
