use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// 对话记录
///
/// 只追加，不截断，不持久化。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回追加了一问一答之后的新记录
    pub fn with_exchange(&self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        let mut messages = self.messages.clone();
        messages.push(ChatMessage {
            role: Role::User,
            content: question.into(),
        });
        messages.push(ChatMessage {
            role: Role::Assistant,
            content: answer.into(),
        });
        Self { messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// `/upload/` 的响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    pub file_path: Option<String>,
}

/// `/ask/` 的响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskResponse {
    pub answer: Option<String>,
}
