use chrono::{ DateTime, SecondsFormat, SubsecRound, Utc };
use serde::{ Serialize, Deserialize };
use std::fmt;
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your AI assistant with access to DeFi tools. How can I help you today?";

pub const ERROR_MESSAGE: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    #[serde(with = "iso_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a message stamped with the current time. The timestamp is cut to
    /// millisecond precision, which is what the stored form keeps.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            timestamp: Utc::now().trunc_subsecs(3),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn welcome() -> Self {
        Self::assistant(WELCOME_MESSAGE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, messages: Vec<Message>) -> Self {
        Self { id: id.into(), messages }
    }
}

mod iso_timestamp {
    use super::*;
    use serde::{ Deserializer, Serializer };

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Sub-millisecond digits are dropped so a reload and re-save yields the
    /// same value.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
        where D: Deserializer<'de>
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_stored_as_iso_string_with_millis() {
        let msg = Message {
            id: "m1".to_string(),
            content: "hi".to_string(),
            role: Role::User,
            timestamp: DateTime::parse_from_rfc3339("2024-05-01T12:00:00.123Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00.123Z");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn offset_timestamps_parse_to_utc() {
        let raw = r#"{"id":"a","content":"x","role":"assistant","timestamp":"2024-05-01T14:00:00+02:00"}"#;
        let msg: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true), "2024-05-01T12:00:00Z");
    }

    #[test]
    fn microsecond_timestamps_settle_after_one_load() {
        let raw = r#"[{"id":"a","content":"x","role":"user","timestamp":"2024-05-01T12:00:00.123456Z"}]"#;
        let loaded: Vec<Message> = serde_json::from_str(raw).unwrap();
        assert_eq!(loaded[0].timestamp.timestamp_subsec_micros(), 123_000);

        let resaved = serde_json::to_string(&loaded).unwrap();
        let reloaded: Vec<Message> = serde_json::from_str(&resaved).unwrap();
        assert_eq!(reloaded, loaded);
    }

    #[test]
    fn fresh_messages_have_distinct_ids() {
        let a = Message::user("one");
        let b = Message::user("one");
        assert_ne!(a.id, b.id);
        assert_eq!(a.timestamp.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let raw = r#"{"id":"a","content":"x","role":"system","timestamp":"2024-05-01T12:00:00Z"}"#;
        assert!(serde_json::from_str::<Message>(raw).is_err());
    }
}
