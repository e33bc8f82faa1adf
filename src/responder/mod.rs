pub mod canned;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;
use self::canned::CannedResponder;

#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn respond(&self, prompt: &str) -> Result<String, Box<dyn StdError + Send + Sync>>;
}

pub fn new_responder(delay: Duration) -> Arc<dyn ReplyGenerator> {
    Arc::new(CannedResponder::new(delay))
}
