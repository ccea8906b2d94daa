use crate::core::RawSignals;
use crate::parser::base::{all_texts, first_attr, first_text, SignalExtractor};
use log::trace;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Bullets longer than this many characters are kept.
const MIN_BULLET_CHARS: usize = 6;
/// Upper bound on bullets forwarded to enrichment.
const MAX_BULLETS: usize = 12;

static CURRENCY_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[£$€]\s?\d{1,3}(?:,\d{3})+(?:[.,]\d{2})?|[£$€]\s?\d+(?:[.,]\d{2})?")
        .expect("valid price pattern")
});

/// Heuristics for any page without a dedicated strategy.
pub struct GenericExtractor;

impl GenericExtractor {
    fn title(document: &Html) -> Option<String> {
        first_attr(document, r#"meta[property="og:title"]"#, "content")
            .or_else(|| first_attr(document, r#"meta[name="title"]"#, "content"))
            .or_else(|| first_text(document, "h1"))
            .or_else(|| first_text(document, "title"))
    }

    fn price(document: &Html) -> Option<String> {
        let selector = Selector::parse("body").ok()?;
        let body_text = document
            .select(&selector)
            .next()?
            .text()
            .collect::<Vec<_>>()
            .join(" ");

        CURRENCY_AMOUNT
            .find(&body_text)
            .map(|found| found.as_str().split_whitespace().collect::<String>())
    }

    fn features(document: &Html) -> Vec<String> {
        all_texts(document, "li")
            .into_iter()
            .filter(|text| text.chars().count() > MIN_BULLET_CHARS)
            .take(MAX_BULLETS)
            .collect()
    }
}

impl SignalExtractor for GenericExtractor {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn extract(&self, document: &Html) -> RawSignals {
        let signals = RawSignals {
            title: Self::title(document),
            price_text: Self::price(document),
            features: Self::features(document),
        };
        trace!("Generic signals: {:?}", signals);
        signals
    }
}
