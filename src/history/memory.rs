use async_trait::async_trait;
use crate::history::{ HistoryError, KeyValueStore };
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), HistoryError> {
        self.entries.lock().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
