//! 会话状态
//!
//! 一次进程运行即一个会话；所有槽位在会话开始时为空，只由成功的调用写入，
//! 进程退出即丢弃。

use crate::models::{AiModel, ChatTranscript, Flashcard, Page, StudentReport};
use crate::workflow::McqState;

#[derive(Debug, Clone)]
pub struct SessionState {
    /// 当前选择的模型
    pub selected_model: AiModel,
    /// 问答页上传文件后后端返回的路径
    pub file_path: Option<String>,
    /// 问答记录
    pub messages: ChatTranscript,
    /// 最近一次生成的笔记
    pub notes_text: String,
    /// 最近一次生成的闪卡
    pub flashcards: Vec<Flashcard>,
    /// 选择题页面状态（主题层级、文件路径、勾选、选择题）
    pub mcq: McqState,
    /// 最近一次生成或查询的报告
    pub report: Option<StudentReport>,
}

impl SessionState {
    /// 以页面的默认模型初始化会话
    pub fn for_page(page: Page) -> Self {
        Self {
            selected_model: page.default_model(),
            ..Self::default()
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selected_model: AiModel::Gemini,
            file_path: None,
            messages: ChatTranscript::new(),
            notes_text: String::new(),
            flashcards: Vec::new(),
            mcq: McqState::new(),
            report: None,
        }
    }
}
