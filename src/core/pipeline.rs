use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::sync::Arc;

use super::config::PipelineConfig;
use super::errors::{PipelineError, PipelineResult};
use super::types::OutputRow;
use crate::enrich::{CompletionClient, Enricher};
use crate::export::DatasetExporter;
use crate::parser::{price::normalize_positive_price, ExtractStrategy};
use crate::render::DescriptionRenderer;
use crate::scrapers::ensure_success;
use crate::stats::{BatchStats, StatsTracker};
use crate::Scraper;

/// Drives fetch → extract → normalize → enrich → render for every URL of a
/// batch. A failing URL yields a failure row; it never aborts the batch.
pub struct Pipeline {
    scraper: Box<dyn Scraper>,
    enricher: Enricher,
    renderer: DescriptionRenderer,
    exporter: DatasetExporter,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(
        scraper: Box<dyn Scraper>,
        client: Arc<dyn CompletionClient>,
        config: &PipelineConfig,
    ) -> Self {
        info!("Initializing pipeline (concurrency={})", config.concurrency);
        Self {
            scraper,
            enricher: Enricher::new(client, &config.branding.store_name),
            renderer: DescriptionRenderer::new(config.branding.clone()),
            exporter: DatasetExporter::new(config.sheet_name.clone())
                .with_store_name(&config.branding.store_name),
            concurrency: config.concurrency.max(1),
        }
    }

    /// One row per URL, in input order.
    pub async fn run(&self, urls: &[String]) -> PipelineResult<Vec<OutputRow>> {
        let (rows, _) = self.run_with_stats(urls).await?;
        Ok(rows)
    }

    /// [`run`](Self::run) plus the batch statistics.
    pub async fn run_with_stats(
        &self,
        urls: &[String],
    ) -> PipelineResult<(Vec<OutputRow>, BatchStats)> {
        if urls.is_empty() {
            return Err(PipelineError::InvalidInput("No URLs provided.".to_string()));
        }

        let stats = StatsTracker::new(urls.len());
        info!(
            "Starting batch {} with {} URLs",
            stats.batch_id(),
            urls.len()
        );

        // `buffered` yields in input order regardless of completion order.
        let stats = &stats;
        let rows = stream::iter(urls.iter().cloned())
            .map(|url| async move { self.process_url(&url, stats).await })
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        stats.finish();
        stats.log_summary();
        Ok((rows, stats.get_stats()))
    }

    /// Runs the batch and exports it as a base64 XLSX payload.
    pub async fn generate_pack(&self, urls: &[String]) -> PipelineResult<String> {
        let rows = self.run(urls).await?;
        Ok(self.exporter.export_base64(&rows)?)
    }

    async fn process_url(&self, url: &str, stats: &StatsTracker) -> OutputRow {
        match self.build_row(url, stats).await {
            Ok(row) => {
                stats.record_listed();
                row
            }
            Err(err) => {
                warn!("Listing failed for {}: {}", url, err);
                stats.record_failure(err.stage());
                OutputRow::failed(url, &err)
            }
        }
    }

    async fn build_row(&self, url: &str, stats: &StatsTracker) -> PipelineResult<OutputRow> {
        let page = self.scraper.request(url).await?;
        stats.record_fetch(page.status, page.body.len(), page.elapsed);
        let page = ensure_success(page)?;
        if !page.is_html() {
            debug!("Response for {} does not look like HTML", url);
        }

        let strategy = ExtractStrategy::for_url(url);
        let signals = strategy.extract(&page.body);
        debug!(
            "Extracted with {} strategy from {}: title={:?}, price={:?}, {} bullets",
            strategy.extractor().name(),
            url,
            signals.title,
            signals.price_text,
            signals.features.len()
        );

        let scraped_price = normalize_positive_price(signals.price_text.as_deref());
        let record = self.enricher.enrich(url, &signals, scraped_price).await?;
        let full_html = self.renderer.render(&record);

        Ok(OutputRow::listed(url, record, full_html))
    }
}
