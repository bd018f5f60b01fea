//! Session and user metadata embedded in the envelope's `context` block.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-supplied session and user fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionProfile {
    pub app_name: String,
    pub platform: String,
    pub language: String,
    pub timezone: String,
    pub user_id: String,
    pub user_role: String,
}

impl Default for SessionProfile {
    fn default() -> Self {
        Self {
            app_name: "my-web-app".to_string(),
            platform: "web".to_string(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),
            user_id: "user-001".to_string(),
            user_role: "developer".to_string(),
        }
    }
}

/// A profile plus the conversation id minted for one assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub conversation_id: String,
    pub profile: SessionProfile,
}

pub const CONVERSATION_ID_LEN: usize = 8;

/// Supplies a fresh conversation id for every assembled envelope.
pub trait ConversationIdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Takes the leading characters of a random v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidConversationIds;

impl ConversationIdSource for UuidConversationIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()[..CONVERSATION_ID_LEN].to_string()
    }
}

/// Always hands out the same id.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FixedConversationId(pub String);

#[cfg(test)]
impl ConversationIdSource for FixedConversationId {
    fn next_id(&self) -> String {
        self.0.clone()
    }
}
