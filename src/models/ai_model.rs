use serde::{Deserialize, Serialize};

/// 后端支持的 AI 模型
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AiModel {
    /// Gemini
    Gemini,
    /// ChatGPT
    #[value(name = "chatgpt")]
    ChatGpt,
    /// Mistral
    Mistral,
}

impl AiModel {
    /// 发送给后端的模型标识
    pub fn id(self) -> &'static str {
        match self {
            AiModel::Gemini => "gemini",
            AiModel::ChatGpt => "chatgpt",
            AiModel::Mistral => "mistral",
        }
    }

    /// 展示名称
    pub fn label(self) -> &'static str {
        match self {
            AiModel::Gemini => "Gemini",
            AiModel::ChatGpt => "ChatGPT",
            AiModel::Mistral => "Mistral",
        }
    }
}

impl std::fmt::Display for AiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 功能页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Notes,
    Flashcards,
    Chat,
    Mcq,
    ReportCard,
}

impl Page {
    /// 页面可选的模型，第一个为默认模型
    pub fn supported_models(self) -> &'static [AiModel] {
        match self {
            Page::Chat => &[AiModel::Gemini, AiModel::ChatGpt],
            Page::Notes | Page::Flashcards | Page::Mcq => {
                &[AiModel::Gemini, AiModel::ChatGpt, AiModel::Mistral]
            }
            // 成绩单解析不需要选择模型，沿用默认值
            Page::ReportCard => &[AiModel::Gemini],
        }
    }

    pub fn default_model(self) -> AiModel {
        self.supported_models()[0]
    }

    pub fn supports(self, model: AiModel) -> bool {
        self.supported_models().contains(&model)
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Notes => "Notesight POC - 📄 Generate Notes",
            Page::Flashcards => "Notesight POC - 📚 Flashcard Generator",
            Page::Chat => "Notesight POC - Document QA",
            Page::Mcq => "📘 Notesight POC - Generate MCQs",
            Page::ReportCard => "Student Report Generator",
        }
    }
}
