//! 文档问答流程

use tracing::{info, warn};

use crate::clients::Backend;
use crate::error::{FlowError, FlowResult};
use crate::models::{AiModel, ChatTranscript, Document};

/// 后端没有返回 `answer` 时展示的占位回答
pub const NO_ANSWER: &str = "⚠ 未收到回答。";

pub struct ChatFlow<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> ChatFlow<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// 上传问答用的文档，返回后端文件路径
    pub async fn upload(&self, document: &Document, model: AiModel) -> FlowResult<Option<String>> {
        info!("📤 正在上传 {} ...", document.name);

        let file_path = self
            .backend
            .upload_file(document, model)
            .await
            .map_err(|e| {
                warn!("上传文件失败: {}", e);
                FlowError::remote(e, "❌ 上传文件失败: 未知错误")
            })?;

        info!("✓ 文件上传成功: {:?}", file_path);
        Ok(file_path)
    }

    /// 提问：成功时返回追加了问题和回答的新记录
    pub async fn ask(
        &self,
        transcript: &ChatTranscript,
        query: &str,
        model: AiModel,
    ) -> FlowResult<ChatTranscript> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FlowError::EmptyQuery);
        }

        let answer = self.backend.ask(query, model).await.map_err(|e| {
            warn!("问答请求失败: {}", e);
            FlowError::remote(e, "❌ 获取回答失败")
        })?;

        let answer = answer.unwrap_or_else(|| NO_ANSWER.to_string());
        Ok(transcript.with_exchange(query, answer))
    }
}
