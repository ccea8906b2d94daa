use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, redirect, Client, ClientBuilder};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::Scraper;
use crate::core::config::{PipelineConfig, DEFAULT_USER_AGENT};
use crate::core::FetchError;
use crate::HttpResponse;

#[derive(Debug, Error)]
pub enum HttpScraperError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}

#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
}

impl HttpScraper {
    pub fn new() -> Result<Self, HttpScraperError> {
        Self::from_config(&PipelineConfig::default())
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, HttpScraperError> {
        let client = Self::builder(&config.user_agent, config.fetch_timeout, config.max_redirects)?
            .build()?;
        Ok(Self { client })
    }

    fn builder(
        user_agent: &str,
        timeout: Duration,
        max_redirects: usize,
    ) -> Result<ClientBuilder, HttpScraperError> {
        let user_agent = if user_agent.is_empty() {
            DEFAULT_USER_AGENT
        } else {
            user_agent
        };

        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_str(user_agent)?);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-GB,en;q=0.9"),
        );

        Ok(ClientBuilder::new()
            .default_headers(headers)
            .timeout(timeout)
            .redirect(redirect::Policy::limited(max_redirects)))
    }

    fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect()
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(&self, url: Url) -> Result<HttpResponse, FetchError> {
        let start_time = Utc::now();
        let response = self.client.get(url).send().await?;

        let final_url = response.url().clone();
        let status = response.status().as_u16();
        let headers = Self::extract_headers(&response);
        let body = response.text().await?;

        Ok(HttpResponse {
            url: final_url,
            status,
            headers,
            body,
            timestamp: start_time,
            elapsed: Utc::now() - start_time,
        })
    }
}
