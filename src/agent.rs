use crate::history::ConversationStore;
use crate::models::chat::{ Conversation, Message, Role, ERROR_MESSAGE };
use crate::responder::ReplyGenerator;

use log::{ debug, error, info };
use std::error::Error;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
    Responding,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Sending => write!(f, "sending"),
            SessionState::Responding => write!(f, "responding"),
        }
    }
}

/// One agent's conversation plus the machinery that answers it.
pub struct ChatAgent {
    conversation: Conversation,
    store: ConversationStore,
    responder: Arc<dyn ReplyGenerator>,
    state: SessionState,
}

impl ChatAgent {
    pub async fn open(
        agent_id: &str,
        store: ConversationStore,
        responder: Arc<dyn ReplyGenerator>
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let conversation = store.load_or_seed(agent_id).await?;
        info!(
            "Opened conversation for agent {} with {} messages",
            agent_id,
            conversation.messages.len()
        );
        Ok(Self {
            conversation,
            store,
            responder,
            state: SessionState::Idle,
        })
    }

    pub fn agent_id(&self) -> &str {
        &self.conversation.id
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn messages(&self) -> &[Message] {
        &self.conversation.messages
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Advisory only; nothing blocks a submission while this is set.
    pub fn is_loading(&self) -> bool {
        self.state != SessionState::Idle
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Agent {}: {} -> {}", self.conversation.id, self.state, next);
        self.state = next;
    }

    /// Writes the whole list. A failed write is logged and the in-memory
    /// conversation stays authoritative; the next successful save catches up.
    async fn persist(&self) {
        if self.conversation.messages.is_empty() {
            return;
        }
        if let Err(e) = self.store.save(&self.conversation.id, &self.conversation.messages).await {
            error!("Failed to save conversation for agent {}: {}", self.conversation.id, e);
        }
    }

    /// Appends the user's message and marks the session as waiting for a reply.
    pub async fn push_user_message(
        &mut self,
        content: &str
    ) -> Result<Message, Box<dyn Error + Send + Sync>> {
        if content.trim().is_empty() {
            return Err("Message content must not be empty".into());
        }

        let message = Message::user(content);
        self.conversation.messages.push(message.clone());
        self.transition(SessionState::Sending);
        self.persist().await;
        Ok(message)
    }

    /// Answers the most recent user message. A failed reply is replaced by an
    /// apology so the conversation always gets its assistant turn.
    pub async fn await_reply(&mut self) -> Message {
        self.transition(SessionState::Responding);

        let prompt = self.conversation.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let reply = match self.responder.respond(&prompt).await {
            Ok(text) => Message::assistant(text),
            Err(e) => {
                error!("Error getting response for agent {}: {}", self.conversation.id, e);
                Message::assistant(ERROR_MESSAGE)
            }
        };

        self.conversation.messages.push(reply.clone());
        self.transition(SessionState::Idle);
        self.persist().await;
        reply
    }

    pub async fn send_message(
        &mut self,
        content: &str
    ) -> Result<Message, Box<dyn Error + Send + Sync>> {
        self.push_user_message(content).await?;
        Ok(self.await_reply().await)
    }
}
