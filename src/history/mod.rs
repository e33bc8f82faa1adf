mod file;
mod memory;
mod redis;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

use async_trait::async_trait;
use log::{ debug, error, info };
use std::sync::Arc;
use thiserror::Error;
use crate::cli::Args;
use crate::models::chat::{ Conversation, Message };

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("history redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("Unsupported history store type: {0}")]
    UnsupportedBackend(String),
}

/// A flat string key-value mechanism. One entry holds one whole conversation.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, HistoryError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), HistoryError>;
}

#[derive(Clone)]
pub struct ConversationStore {
    backend: Arc<dyn KeyValueStore>,
}

pub fn storage_key(conversation_id: &str) -> String {
    format!("chat-{}", conversation_id)
}

impl ConversationStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// `Ok(None)` means nothing, or only blank text, is stored for this
    /// conversation. A payload that does not parse is logged and treated as an
    /// empty conversation.
    pub async fn load(
        &self,
        conversation_id: &str
    ) -> Result<Option<Vec<Message>>, HistoryError> {
        let key = storage_key(conversation_id);
        let raw = match self.backend.get(&key).await? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                return Ok(None);
            }
        };

        match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(messages) => {
                debug!("Loaded {} messages from {}", messages.len(), key);
                Ok(Some(messages))
            }
            Err(e) => {
                error!("Failed to parse stored messages for {}: {}", key, e);
                Ok(Some(Vec::new()))
            }
        }
    }

    pub async fn save(
        &self,
        conversation_id: &str,
        messages: &[Message]
    ) -> Result<(), HistoryError> {
        let key = storage_key(conversation_id);
        let payload = serde_json::to_string(messages)?;
        self.backend.set(&key, &payload).await?;
        debug!("Saved {} messages to {}", messages.len(), key);
        Ok(())
    }

    /// Loads the conversation, seeding and persisting the welcome message when
    /// there is no prior entry.
    pub async fn load_or_seed(&self, conversation_id: &str) -> Result<Conversation, HistoryError> {
        let messages = match self.load(conversation_id).await? {
            Some(messages) => messages,
            None => {
                info!("No history for conversation {}, starting a new one", conversation_id);
                let seeded = vec![Message::welcome()];
                self.save(conversation_id, &seeded).await?;
                seeded
            }
        };
        Ok(Conversation::new(conversation_id, messages))
    }
}

pub fn create_history_store(args: &Args) -> Result<ConversationStore, HistoryError> {
    let backend: Arc<dyn KeyValueStore> = match args.history_type.to_lowercase().as_str() {
        "file" => Arc::new(FileStore::new(&args.history_dir)),
        "redis" => Arc::new(RedisStore::new(&args.history_host, &args.history_redis_prefix)?),
        "memory" => Arc::new(MemoryStore::default()),
        other => {
            return Err(HistoryError::UnsupportedBackend(other.to_string()));
        }
    };
    Ok(ConversationStore::new(backend))
}

pub fn initialize_history_store(args: &Args) -> Result<ConversationStore, HistoryError> {
    let location = match args.history_type.to_lowercase().as_str() {
        "file" => args.history_dir.clone(),
        "redis" => args.history_host.clone(),
        _ => "process memory".to_string(),
    };
    info!("Chat history will be stored in: {} at {}", args.history_type, location);
    create_history_store(args)
}

pub fn format_transcript(conversation: &Conversation) -> String {
    let mut result = String::new();
    for msg in &conversation.messages {
        result.push_str(&format!("{}: {}\n", msg.role, msg.content));
    }
    result
}
