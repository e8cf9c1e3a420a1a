use serde::{Deserialize, Serialize};

/// Author of a message. The backend only ever emits these two; anything
/// else in a payload is a decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Role::User)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded image attached to a message. `file_path` is relative to the
/// backend origin; see [`crate::api::image_url`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub id: i64,
    pub file_path: String,
    pub file_name: String,
    pub mime_type: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    pub created_at: String,
}

/// One turn in a conversation. Immutable once the server has created it.
///
/// Timestamps are carried as the ISO-8601 strings the backend serialises;
/// the client formats them for display but never does time arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub images: Vec<ImageInfo>,
    pub created_at: String,
}

/// A full conversation with its ordered message history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// List projection of a conversation, used only for sidebar rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub message_count: u32,
}

impl ConversationSummary {
    /// Sidebar label; untitled conversations get the same fallback the
    /// backend uses when it creates one.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("New Conversation")
    }
}

/// Reply to a send: the stored user message, the assistant's answer, and
/// the conversation id (server-assigned when the send opened a fresh one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub user_message: Message,
    pub assistant_message: Message,
    pub conversation_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_decodes_from_backend_payload() {
        let json = r#"{
            "id": 7,
            "conversation_id": 3,
            "role": "assistant",
            "content": "Here is what I see.",
            "images": [],
            "created_at": "2025-03-14T09:26:53.589793"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, 7);
        assert_eq!(msg.conversation_id, 3);
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.images.is_empty());
    }

    #[test]
    fn message_decodes_with_images() {
        let json = r#"{
            "id": 4,
            "conversation_id": 1,
            "role": "user",
            "content": "What is in this picture?",
            "images": [{
                "id": 2,
                "file_path": "uploads/abc123.png",
                "file_name": "cat.png",
                "mime_type": "image/png",
                "file_size": 51234,
                "created_at": "2025-03-14T09:26:50.000000"
            }],
            "created_at": "2025-03-14T09:26:50.000000"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(msg.role.is_user());
        assert_eq!(msg.images.len(), 1);
        assert_eq!(msg.images[0].file_name, "cat.png");
        assert_eq!(msg.images[0].file_size, Some(51234));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let json = r#"{
            "id": 1,
            "conversation_id": 1,
            "role": "system",
            "content": "",
            "images": [],
            "created_at": "2025-03-14T09:00:00"
        }"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
    }

    #[test]
    fn summary_title_falls_back_when_untitled() {
        let json = r#"{
            "id": 9,
            "title": null,
            "created_at": "2025-03-14T08:00:00",
            "updated_at": "2025-03-14T09:00:00",
            "message_count": 6
        }"#;
        let summary: ConversationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.display_title(), "New Conversation");
        assert_eq!(summary.message_count, 6);
    }

    #[test]
    fn chat_response_decodes() {
        let json = r#"{
            "user_message": {
                "id": 10, "conversation_id": 5, "role": "user",
                "content": "hi", "images": [], "created_at": "2025-03-14T09:00:00"
            },
            "assistant_message": {
                "id": 11, "conversation_id": 5, "role": "assistant",
                "content": "hello", "images": [], "created_at": "2025-03-14T09:00:01"
            },
            "conversation_id": 5
        }"#;
        let reply: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(reply.conversation_id, 5);
        assert!(reply.user_message.role.is_user());
        assert_eq!(reply.assistant_message.role, Role::Assistant);
    }
}
