pub mod config;
mod errors;
mod pipeline;
pub mod types;


pub use config::PipelineConfig;
pub use errors::{EnrichmentError, ExportError, FetchError, PipelineError, PipelineResult};
pub use pipeline::Pipeline;
pub use types::{ListingRecord, OutputRow, RawSignals};
