use chrono::prelude::*;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: Url,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub elapsed: chrono::Duration,
}

impl HttpResponse {
    pub fn is_html(&self) -> bool {
        self.headers
            .get("content-type")
            .map(|ct| ct.contains("text/html"))
            .unwrap_or_else(|| {
                let body = self.body.trim_start();
                body.starts_with("<!DOCTYPE") || body.starts_with("<!doctype") || body.starts_with("<html")
            })
    }
}
