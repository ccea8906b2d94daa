use log::{debug, info};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::client::CompletionClient;
use super::json::parse_reply;
use super::prompt::{system_prompt, user_prompt};
use crate::core::types::{clamp_title, positive_price};
use crate::core::{EnrichmentError, ListingRecord, RawSignals};

/// Turns scraped signals into a [`ListingRecord`] via a completion service.
#[derive(Clone)]
pub struct Enricher {
    client: Arc<dyn CompletionClient>,
    system_prompt: String,
}

impl Enricher {
    pub fn new(client: Arc<dyn CompletionClient>, store_name: &str) -> Self {
        Self {
            client,
            system_prompt: system_prompt(store_name),
        }
    }

    pub async fn enrich(
        &self,
        url: &str,
        signals: &RawSignals,
        scraped_price: Option<f64>,
    ) -> Result<ListingRecord, EnrichmentError> {
        let user = user_prompt(url, signals, scraped_price);
        let reply = self.client.complete(&self.system_prompt, &user).await?;
        debug!("Model reply for {}: {} characters", url, reply.len());

        let fields = parse_reply(&reply)?;
        let record = build_record(&fields, signals, scraped_price);
        info!(
            "Enriched {} as '{}' (category={}, price={:?})",
            url, record.seo_title, record.category, record.price
        );
        Ok(record)
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

// Model fields may be missing or mistyped; scraped values fill the gaps.
fn build_record(
    fields: &Map<String, Value>,
    signals: &RawSignals,
    scraped_price: Option<f64>,
) -> ListingRecord {
    let model_title = text_field(fields, "seoTitle");
    let title = if model_title.is_empty() {
        signals.title.clone().unwrap_or_default()
    } else {
        model_title
    };

    let price = fields
        .get("buyItNowPriceGBP")
        .and_then(Value::as_f64)
        .and_then(positive_price)
        .or_else(|| scraped_price.and_then(positive_price));

    ListingRecord {
        seo_title: clamp_title(&title),
        category: text_field(fields, "categoryName"),
        category_code: category_code(fields),
        price,
        specs_text: text_field(fields, "itemSpecsText"),
        condition: text_field(fields, "condition"),
        short_desc_html: text_field(fields, "shortDescHtml"),
        features_html: text_field(fields, "featuresHtml"),
        specs_html: text_field(fields, "specsHtml"),
        whats_in_box_html: text_field(fields, "whatsInBoxHtml"),
        postage_html: text_field(fields, "postageHtml"),
        returns_html: text_field(fields, "returnsHtml"),
    }
}

// Codes are numeric ids; models return them as either strings or numbers.
fn category_code(fields: &Map<String, Value>) -> String {
    match fields.get("categoryCode") {
        Some(Value::Number(number)) => number.to_string(),
        _ => text_field(fields, "categoryCode"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::MockCompletionClient;

    fn signals() -> RawSignals {
        RawSignals {
            title: Some("Blue Widget".to_string()),
            price_text: Some("£9.99".to_string()),
            features: vec!["Solid steel".to_string()],
        }
    }

    fn enricher(reply: &str) -> (Enricher, Arc<MockCompletionClient>) {
        let client = Arc::new(MockCompletionClient::new(vec![Ok(reply.to_string())]));
        (Enricher::new(client.clone(), "Test Store"), client)
    }

    #[tokio::test]
    async fn test_model_price_preferred() {
        let (enricher, client) = enricher(
            r#"```json
{"seoTitle": "Blue Widget – Durable UK Seller Item", "categoryName": "Widgets",
 "categoryCode": 1234, "buyItNowPriceGBP": 11.5, "featuresHtml": "<ul><li>Steel</li></ul>"}
```"#,
        );

        let record = enricher
            .enrich("https://example.com/widget", &signals(), Some(9.99))
            .await
            .unwrap();

        assert_eq!(record.seo_title, "Blue Widget – Durable UK Seller Item");
        assert_eq!(record.category, "Widgets");
        assert_eq!(record.category_code, "1234");
        assert_eq!(record.price, Some(11.5));
        assert_eq!(record.features_html, "<ul><li>Steel</li></ul>");
        assert!(record.postage_html.is_empty());

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].0.contains("Test Store"));
        assert!(prompts[0].1.contains("SCRAPED PRICE GBP (if any): 9.99"));
    }

    #[tokio::test]
    async fn test_scraped_fallbacks() {
        let (enricher, _) = enricher(r#"{"seoTitle": "", "buyItNowPriceGBP": 0, "condition": 7}"#);

        let record = enricher
            .enrich("https://example.com/widget", &signals(), Some(9.99))
            .await
            .unwrap();

        assert_eq!(record.seo_title, "Blue Widget");
        assert_eq!(record.price, Some(9.99));
        assert!(record.condition.is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_price_and_no_scraped_price() {
        let (enricher, _) = enricher(r#"{"buyItNowPriceGBP": "about twelve"}"#);

        let record = enricher
            .enrich("https://example.com/widget", &RawSignals::default(), None)
            .await
            .unwrap();

        assert_eq!(record.price, None);
        assert!(record.seo_title.is_empty());
    }

    #[tokio::test]
    async fn test_long_title_clamped() {
        let long = "W".repeat(95);
        let (enricher, _) = enricher(&format!(r#"{{"seoTitle": "{}"}}"#, long));

        let record = enricher
            .enrich("https://example.com/widget", &signals(), None)
            .await
            .unwrap();

        assert_eq!(record.seo_title.chars().count(), 80);
        assert!(record.seo_title.ends_with('…'));
    }

    #[tokio::test]
    async fn test_reply_without_json() {
        let (enricher, _) = enricher("Sorry, I can't read that page.");

        let err = enricher
            .enrich("https://example.com/widget", &signals(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichmentError::MissingJson));
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let client = Arc::new(MockCompletionClient::new(vec![Err(
            EnrichmentError::Service("quota exceeded".to_string()),
        )]));
        let enricher = Enricher::new(client, "Test Store");

        let err = enricher
            .enrich("https://example.com/widget", &signals(), None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "completion service error: quota exceeded");
    }
}
