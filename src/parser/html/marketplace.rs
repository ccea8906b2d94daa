use crate::core::RawSignals;
use crate::parser::base::{all_texts, first_attr, first_text, SignalExtractor};
use log::trace;
use scraper::Html;

/// Product pages on marketplace hosts with predictable element ids.
pub struct MarketplaceExtractor;

impl MarketplaceExtractor {
    fn title(document: &Html) -> Option<String> {
        first_text(document, "#productTitle")
            .or_else(|| first_attr(document, r#"meta[property="og:title"]"#, "content"))
            .or_else(|| first_text(document, "title"))
    }

    fn price(document: &Html) -> Option<String> {
        first_attr(document, r#"meta[property="product:price:amount"]"#, "content")
            .or_else(|| first_attr(document, r#"meta[name="twitter:data1"]"#, "content"))
            .or_else(|| first_text(document, ".a-price .a-offscreen"))
            .or_else(|| Self::split_price(document))
    }

    // Whole and fraction parts live in sibling spans.
    fn split_price(document: &Html) -> Option<String> {
        let digits = |css: &str| {
            first_text(document, css)
                .map(|text| text.chars().filter(char::is_ascii_digit).collect::<String>())
                .filter(|text| !text.is_empty())
        };

        let whole = digits(".a-price-whole")?;
        Some(match digits(".a-price-fraction") {
            Some(fraction) => format!("{}.{}", whole, fraction),
            None => whole,
        })
    }
}

impl SignalExtractor for MarketplaceExtractor {
    fn name(&self) -> &'static str {
        "marketplace"
    }

    fn extract(&self, document: &Html) -> RawSignals {
        let features = all_texts(document, "#feature-bullets li")
            .into_iter()
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>();

        let signals = RawSignals {
            title: Self::title(document),
            price_text: Self::price(document),
            features,
        };
        trace!("Marketplace signals: {:?}", signals);
        signals
    }
}
