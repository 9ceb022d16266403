//! 笔记生成流程
//!
//! 响应体按块到达，每块解码后立即交给调用方渲染，同时追加到本地缓冲区。
//! 整个流成功结束后才返回完整文本；中途失败则不产生任何结果。

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::clients::Backend;
use crate::error::{FlowError, FlowResult};
use crate::models::{AiModel, Document};
use crate::services::ChunkDecoder;

pub struct NotesFlow<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> NotesFlow<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// 生成笔记，`on_chunk` 收到每次新增的文本
    pub async fn generate(
        &self,
        documents: &[Document],
        model: AiModel,
        mut on_chunk: impl FnMut(&str),
    ) -> FlowResult<String> {
        if documents.is_empty() {
            return Err(FlowError::NoDocuments);
        }

        info!("📝 正在使用 {} 生成笔记...", model);

        let mut stream = self
            .backend
            .generate_notes(documents, model)
            .await
            .map_err(|e| {
                warn!("生成笔记失败: {}", e);
                FlowError::remote(e, "❌ 生成笔记失败")
            })?;

        let mut decoder = ChunkDecoder::new();
        let mut notes = String::new();
        let mut chunks = 0usize;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                warn!("读取笔记流失败 (已收到 {} 块): {}", chunks, e);
                FlowError::remote(e, "❌ 生成笔记失败")
            })?;
            if chunk.is_empty() {
                continue;
            }
            chunks += 1;

            let text = decoder.push(&chunk);
            if !text.is_empty() {
                notes.push_str(&text);
                on_chunk(&text);
            }
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            notes.push_str(&tail);
            on_chunk(&tail);
        }

        debug!("笔记流结束: {} 块, {} 字符", chunks, notes.chars().count());

        if notes.trim().is_empty() {
            return Err(FlowError::NothingGenerated("⚠ 未生成任何笔记内容".to_string()));
        }

        info!("✓ 笔记生成完成");
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::{server_error, ScriptedBackend};
    use crate::error::ApiError;

    fn documents() -> Vec<Document> {
        vec![Document::new("lecture.pdf", b"%PDF".to_vec())]
    }

    #[tokio::test]
    async fn test_chunks_are_rendered_in_order() {
        let backend = ScriptedBackend::new();
        let bytes = "# 标题\n**重点**".as_bytes().to_vec();
        backend.notes.lock().unwrap().push_back(Ok(vec![
            Ok(bytes[..3].to_vec()),
            Ok(Vec::new()),
            Ok(bytes[3..].to_vec()),
        ]));

        let mut rendered = Vec::new();
        let notes = NotesFlow::new(&backend)
            .generate(&documents(), AiModel::Gemini, |text| rendered.push(text.to_string()))
            .await
            .unwrap();

        assert_eq!(notes, "# 标题\n**重点**");
        assert_eq!(rendered.concat(), notes);
        assert_eq!(rendered.len(), 2);
    }

    #[tokio::test]
    async fn test_broken_stream_yields_no_notes() {
        let backend = ScriptedBackend::new();
        backend.notes.lock().unwrap().push_back(Ok(vec![
            Ok(b"partial".to_vec()),
            Err(ApiError::Empty {
                endpoint: "/notes/".to_string(),
            }),
        ]));

        let result = NotesFlow::new(&backend)
            .generate(&documents(), AiModel::Gemini, |_| {})
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_status_error_is_generic() {
        let backend = ScriptedBackend::new();
        backend.notes.lock().unwrap().push_back(Err(server_error("/notes/")));

        let err = NotesFlow::new(&backend)
            .generate(&documents(), AiModel::Mistral, |_| {})
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "❌ 生成笔记失败");
    }
}
