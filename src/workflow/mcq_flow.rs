//! 选择题生成流程 - 流程层
//!
//! 状态流转：
//! 1. Idle → TopicsExtracted：上传文档，提取章节/子主题
//! 2. TopicsExtracted ⇄ SubtopicsSelected：本地勾选，选中集合随每次勾选重新计算
//! 3. SubtopicsSelected → McqsGenerated：按选中子主题生成选择题
//!
//! 每个流转都接收旧状态、返回新状态；失败时调用方继续持有旧状态。

use tracing::{info, warn};

use crate::clients::Backend;
use crate::error::{FlowError, FlowResult};
use crate::models::{AiModel, Document, GenerateMcqRequest, Mcq, TopicHierarchy};
use crate::workflow::topic_selection::TopicSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum McqPhase {
    #[default]
    Idle,
    TopicsExtracted,
    SubtopicsSelected,
    McqsGenerated,
}

/// 选择题页面的状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct McqState {
    phase: McqPhase,
    topics: TopicHierarchy,
    file_paths: Option<Vec<String>>,
    selection: TopicSelection,
    mcqs: Vec<Mcq>,
}

impl McqState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> McqPhase {
        self.phase
    }

    pub fn topics(&self) -> &TopicHierarchy {
        &self.topics
    }

    pub fn file_paths(&self) -> Option<&[String]> {
        self.file_paths.as_deref()
    }

    pub fn selection(&self) -> &TopicSelection {
        &self.selection
    }

    pub fn mcqs(&self) -> &[Mcq] {
        &self.mcqs
    }

    pub fn selected_subtopics(&self) -> Vec<String> {
        self.selection.selected(&self.topics)
    }

    /// "生成"按钮是否可用
    pub fn can_generate(&self) -> bool {
        self.file_paths.is_some() && !self.selected_subtopics().is_empty()
    }

    /// 切换章节"全选"
    pub fn toggle_chapter(&self, chapter: &str, on: bool) -> FlowResult<Self> {
        let subtopics = self
            .topics
            .chapter(chapter)
            .ok_or_else(|| FlowError::UnknownTopic(chapter.to_string()))?;

        let mut selection = self.selection.clone();
        selection.set_chapter(chapter, subtopics, on);
        Ok(self.with_selection(selection))
    }

    /// 切换单个子主题
    pub fn toggle_subtopic(&self, chapter: &str, subtopic: &str, on: bool) -> FlowResult<Self> {
        let known = self
            .topics
            .chapter(chapter)
            .is_some_and(|subtopics| subtopics.iter().any(|s| s == subtopic));
        if !known {
            return Err(FlowError::UnknownTopic(format!("{} / {}", chapter, subtopic)));
        }

        let mut selection = self.selection.clone();
        selection.set_subtopic(chapter, subtopic, on);
        Ok(self.with_selection(selection))
    }

    fn with_selection(&self, selection: TopicSelection) -> Self {
        let phase = if selection.selected(&self.topics).is_empty() {
            McqPhase::TopicsExtracted
        } else {
            McqPhase::SubtopicsSelected
        };

        Self {
            phase,
            selection,
            ..self.clone()
        }
    }
}

/// 选择题流程
///
/// - 只持有后端引用，不持有状态
/// - 失败时不产生新状态
pub struct McqFlow<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> McqFlow<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// 提取主题：成功时同时替换主题层级和文件路径，并开始新一轮勾选
    pub async fn extract_topics(
        &self,
        state: &McqState,
        documents: &[Document],
        model: AiModel,
    ) -> FlowResult<McqState> {
        if documents.is_empty() {
            return Err(FlowError::NoDocuments);
        }

        info!("🔍 正在使用 {} 提取主题 ({} 个文件)...", model, documents.len());

        let extracted = self
            .backend
            .extract_topics(documents, model)
            .await
            .map_err(|e| {
                warn!("提取主题失败: {}", e);
                FlowError::remote(e, "❌ 提取主题失败")
            })?;

        if extracted.topics.is_empty() {
            warn!("后端没有返回任何主题");
            return Err(FlowError::NothingGenerated("⚠ 未提取到任何主题".to_string()));
        }

        info!(
            "✓ 提取到 {} 个章节, {} 个文件路径",
            extracted.topics.len(),
            extracted.file_paths.len()
        );

        if state.phase != McqPhase::Idle {
            info!("主题已重新提取，之前的勾选和选择题已清空");
        }

        Ok(McqState {
            phase: McqPhase::TopicsExtracted,
            topics: extracted.topics,
            file_paths: Some(extracted.file_paths),
            selection: TopicSelection::new(),
            mcqs: Vec::new(),
        })
    }

    /// 按选中的子主题生成选择题
    pub async fn generate(&self, state: &McqState, model: AiModel) -> FlowResult<McqState> {
        let topics = state.selected_subtopics();
        if topics.is_empty() {
            return Err(FlowError::EmptySelection);
        }
        let file_paths = state.file_paths.clone().ok_or(FlowError::MissingFilePaths)?;

        info!("🎯 正在使用 {} 生成选择题 ({} 个子主题)...", model, topics.len());

        let request = GenerateMcqRequest {
            topics,
            file_paths,
            // 生成接口收的是展示名称（"Gemini"），提取接口收的是小写标识
            model: model.label().to_string(),
        };

        let mcqs = self.backend.generate_mcqs(&request).await.map_err(|e| {
            warn!("生成选择题失败: {}", e);
            FlowError::remote(e, "❌ 生成选择题失败，请重试")
        })?;

        if mcqs.is_empty() {
            warn!("后端没有返回任何选择题");
            return Err(FlowError::NothingGenerated("⚠ 未生成任何选择题".to_string()));
        }

        info!("✓ 生成了 {} 道选择题", mcqs.len());

        Ok(McqState {
            phase: McqPhase::McqsGenerated,
            mcqs,
            ..state.clone()
        })
    }
}
