use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use super::client::CompletionClient;
use crate::core::EnrichmentError;

/// Replays scripted replies in order and records every prompt it receives.
/// Once the script runs out, the last reply is repeated.
#[derive(Default)]
pub struct MockCompletionClient {
    replies: Mutex<VecDeque<Result<String, EnrichmentError>>>,
    last_reply: Mutex<Option<String>>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl MockCompletionClient {
    pub fn new(replies: Vec<Result<String, EnrichmentError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            last_reply: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, EnrichmentError> {
        self.prompts
            .lock()
            .push((system.to_string(), user.to_string()));

        match self.replies.lock().pop_front() {
            Some(Ok(reply)) => {
                *self.last_reply.lock() = Some(reply.clone());
                Ok(reply)
            }
            Some(Err(err)) => Err(err),
            None => self
                .last_reply
                .lock()
                .clone()
                .ok_or_else(|| EnrichmentError::Service("no scripted reply".to_string())),
        }
    }
}
