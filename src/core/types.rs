use serde::Serialize;

use super::errors::PipelineError;

pub const MAX_TITLE_CHARS: usize = 80;
pub const ELLIPSIS: char = '…';
pub const FAILED_PREFIX: &str = "FAILED: ";

pub const HEADERS: [&str; 7] = [
    "Product URL (Input)",
    "SEO Title (UK, 80 chars max)",
    "eBay Category",
    "eBay Category Code",
    "Suggested Buy It Now Price (£)",
    "Item Specs",
    "Full HTML Description",
];

/// Catalog facts pulled from one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawSignals {
    pub title: Option<String>,
    pub price_text: Option<String>,
    pub features: Vec<String>,
}

/// Enriched listing. Empty fragment strings mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingRecord {
    pub seo_title: String,
    pub category: String,
    pub category_code: String,
    pub price: Option<f64>,
    pub specs_text: String,
    pub condition: String,
    pub short_desc_html: String,
    pub features_html: String,
    pub specs_html: String,
    pub whats_in_box_html: String,
    pub postage_html: String,
    pub returns_html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub source_url: String,
    pub seo_title: String,
    pub category: String,
    pub category_code: String,
    pub price: Option<f64>,
    pub specs_text: String,
    pub full_html: String,
}

impl OutputRow {
    pub fn listed(source_url: impl Into<String>, record: ListingRecord, full_html: String) -> Self {
        Self {
            source_url: source_url.into(),
            seo_title: record.seo_title,
            category: record.category,
            category_code: record.category_code,
            price: record.price,
            specs_text: record.specs_text,
            full_html,
        }
    }

    pub fn failed(source_url: impl Into<String>, error: &PipelineError) -> Self {
        Self {
            source_url: source_url.into(),
            seo_title: String::new(),
            category: String::new(),
            category_code: String::new(),
            price: None,
            specs_text: format!("{}{}", FAILED_PREFIX, error),
            full_html: String::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.full_html.is_empty() && self.specs_text.starts_with(FAILED_PREFIX)
    }
}

/// Shortens `title` to at most [`MAX_TITLE_CHARS`] characters, ending with an
/// ellipsis when anything was cut. Whitespace before the ellipsis is dropped.
pub fn clamp_title(title: &str) -> String {
    let title = title.trim();
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }

    let head: String = title.chars().take(MAX_TITLE_CHARS - 1).collect();
    let mut clamped = head.trim_end().to_string();
    clamped.push(ELLIPSIS);
    clamped
}

/// Rounds to two decimal places and keeps only positive amounts.
pub fn positive_price(amount: f64) -> Option<f64> {
    if !amount.is_finite() {
        return None;
    }
    let rounded = (amount * 100.0).round() / 100.0;
    (rounded > 0.0).then_some(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::FetchError;

    #[test]
    fn test_clamp_title_long() {
        let title = "A".repeat(90);
        let clamped = clamp_title(&title);
        assert_eq!(clamped.chars().count(), 80);
        assert!(clamped.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_clamp_title_no_space_before_ellipsis() {
        // char 79 is a space, so it has to be dropped
        let title = format!("{} {}", "a".repeat(78), "b".repeat(20));
        let clamped = clamp_title(&title);
        assert!(clamped.ends_with(&format!("a{}", ELLIPSIS)));
        assert!(clamped.chars().count() <= 80);
    }

    #[test]
    fn test_clamp_title_short_untouched() {
        assert_eq!(clamp_title("  Blue Widget "), "Blue Widget");
        let exact = "x".repeat(80);
        assert_eq!(clamp_title(&exact), exact);
    }

    #[test]
    fn test_positive_price() {
        assert_eq!(positive_price(11.5), Some(11.5));
        assert_eq!(positive_price(9.999), Some(10.0));
        assert_eq!(positive_price(0.0), None);
        assert_eq!(positive_price(-3.0), None);
        assert_eq!(positive_price(f64::NAN), None);
    }

    #[test]
    fn test_failed_row() {
        let err = PipelineError::from(FetchError::Status {
            status: 404,
            url: "https://example.com/x".to_string(),
        });
        let row = OutputRow::failed("https://example.com/x", &err);
        assert!(row.is_failed());
        assert_eq!(row.specs_text, "FAILED: HTTP 404 from https://example.com/x");
        assert!(row.category.is_empty());
        assert!(row.price.is_none());
    }
}
