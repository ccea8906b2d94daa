pub mod core;
pub mod enrich;
pub mod export;
pub mod http;
pub mod parser;
pub mod render;
pub mod scrapers;
pub mod server;
pub mod stats;

pub use crate::core::{
    EnrichmentError, ExportError, FetchError, ListingRecord, OutputRow, Pipeline, PipelineConfig,
    PipelineError, PipelineResult, RawSignals,
};
pub use enrich::{CompletionClient, Enricher, OpenAiClient};
pub use export::DatasetExporter;
pub use http::HttpResponse;
pub use parser::{extract, normalize_price, ExtractStrategy};
pub use render::{Branding, DescriptionRenderer};
pub use scrapers::Scraper;
pub use stats::StatsTracker;
