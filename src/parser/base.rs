use crate::core::RawSignals;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use super::html::{GenericExtractor, MarketplaceExtractor};

static MARKETPLACE_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|\.)amazon\.[a-z.]+$").expect("valid host pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

pub trait SignalExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, document: &Html) -> RawSignals;
}

/// Extraction strategy picked from the URL host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStrategy {
    Marketplace,
    Generic,
}

impl ExtractStrategy {
    pub fn for_url(url: &str) -> Self {
        let is_marketplace = Url::parse(url.trim())
            .ok()
            .and_then(|parsed| parsed.host_str().map(|host| MARKETPLACE_HOST.is_match(host)))
            .unwrap_or(false);

        if is_marketplace {
            ExtractStrategy::Marketplace
        } else {
            ExtractStrategy::Generic
        }
    }

    pub fn extractor(&self) -> &'static dyn SignalExtractor {
        match self {
            ExtractStrategy::Marketplace => &MarketplaceExtractor,
            ExtractStrategy::Generic => &GenericExtractor,
        }
    }

    pub fn extract(&self, markup: &str) -> RawSignals {
        let document = Html::parse_document(markup);
        self.extractor().extract(&document)
    }
}

/// Parses `markup` and pulls signals with the strategy matching `url`.
pub fn extract(markup: &str, url: &str) -> RawSignals {
    ExtractStrategy::for_url(url).extract(markup)
}

pub(crate) fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

pub(crate) fn non_empty(text: String) -> Option<String> {
    let text = clean_text(&text);
    (!text.is_empty()).then_some(text)
}

pub(crate) fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .find_map(non_empty)
}

pub(crate) fn first_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(str::to_string)
        .find_map(non_empty)
}

pub(crate) fn all_texts(document: &Html, css: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|element| clean_text(&element.text().collect::<String>()))
        .collect()
}
