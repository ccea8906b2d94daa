use chrono::{DateTime, Duration, Utc};
use log::info;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    pub batch_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_urls: usize,
    pub listed_rows: usize,
    pub failed_rows: usize,
    pub failures_by_stage: HashMap<String, usize>,
    pub pages_fetched: usize,
    pub bytes_downloaded: usize,
    pub status_codes: HashMap<u16, usize>,
    pub average_fetch_time: f64, // in milliseconds
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<BatchStats>>,
}

impl StatsTracker {
    pub fn new(total_urls: usize) -> Self {
        Self {
            stats: Arc::new(RwLock::new(BatchStats {
                batch_id: Uuid::now_v7(),
                start_time: Utc::now(),
                end_time: None,
                total_urls,
                listed_rows: 0,
                failed_rows: 0,
                failures_by_stage: HashMap::new(),
                pages_fetched: 0,
                bytes_downloaded: 0,
                status_codes: HashMap::new(),
                average_fetch_time: 0.0,
            })),
        }
    }

    pub fn batch_id(&self) -> Uuid {
        self.stats.read().batch_id
    }

    pub fn record_fetch(&self, status: u16, size: usize, duration: Duration) {
        let mut stats = self.stats.write();
        stats.pages_fetched += 1;
        *stats.status_codes.entry(status).or_insert(0) += 1;
        stats.bytes_downloaded += size;

        let current_total = stats.average_fetch_time * (stats.pages_fetched - 1) as f64;
        let new_duration = duration.num_milliseconds() as f64;
        stats.average_fetch_time = (current_total + new_duration) / stats.pages_fetched as f64;
    }

    pub fn record_listed(&self) {
        self.stats.write().listed_rows += 1;
    }

    pub fn record_failure(&self, stage: &str) {
        let mut stats = self.stats.write();
        stats.failed_rows += 1;
        *stats.failures_by_stage.entry(stage.to_string()).or_insert(0) += 1;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> BatchStats {
        self.stats.read().clone()
    }

    pub fn log_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        info!(
            "Batch {} finished in {}ms: {} URLs, {} listed, {} failed",
            stats.batch_id,
            duration.num_milliseconds(),
            stats.total_urls,
            stats.listed_rows,
            stats.failed_rows
        );
        info!(
            "Fetched {} pages, {:.2} KB, average fetch time {:.2}ms",
            stats.pages_fetched,
            stats.bytes_downloaded as f64 / 1_000.0,
            stats.average_fetch_time
        );
        for (status, count) in &stats.status_codes {
            info!("  HTTP {}: {}", status, count);
        }
        for (stage, count) in &stats.failures_by_stage {
            info!("  failed at {}: {}", stage, count);
        }
    }
}
