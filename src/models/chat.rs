use chrono::Utc;
use serde::{ Serialize, Deserialize };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub emergency: bool,
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>, emergency: bool) -> Self {
        Self {
            role,
            content: content.into(),
            emergency,
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, false)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content, false)
    }

    /// Bot-side block carrying the `emergency` style.
    pub fn emergency(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content, true)
    }

    /// Number of display lines the message occupies.
    pub fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }
}
