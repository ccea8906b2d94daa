pub mod client;
pub mod enricher;
pub mod json;
pub mod mock_client;
pub mod prompt;

pub use client::{CompletionClient, OpenAiClient};
pub use enricher::Enricher;
pub use mock_client::MockCompletionClient;
