use serde::{Deserialize, Serialize};

/// 闪卡
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub definition: String,
}

impl Flashcard {
    /// 定义中是否包含 LaTeX 公式
    pub fn has_math(&self) -> bool {
        self.definition.contains("$$") || self.definition.contains('\\')
    }
}

/// `/flashcards/` 的响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashcardResponse {
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}
