//! 闪卡生成流程

use tracing::{info, warn};

use crate::clients::Backend;
use crate::error::{FlowError, FlowResult};
use crate::models::{AiModel, Document, Flashcard};

pub struct FlashcardFlow<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> FlashcardFlow<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn generate(&self, documents: &[Document], model: AiModel) -> FlowResult<Vec<Flashcard>> {
        if documents.is_empty() {
            return Err(FlowError::NoDocuments);
        }

        info!("🔹 正在使用 {} 生成闪卡... ⏳", model);

        let flashcards = self
            .backend
            .generate_flashcards(documents, model)
            .await
            .map_err(|e| {
                warn!("生成闪卡失败: {}", e);
                FlowError::remote(e, &format!("❌ 使用 {} 生成闪卡失败", model))
            })?;

        if flashcards.is_empty() {
            return Err(FlowError::NothingGenerated("⚠ 未生成任何闪卡".to_string()));
        }

        info!("✅ 使用 {} 生成了 {} 张闪卡", model, flashcards.len());
        Ok(flashcards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::{server_error, Call, ScriptedBackend};

    #[tokio::test]
    async fn test_generate_passes_all_files() {
        let backend = ScriptedBackend::new();
        backend.flashcards.lock().unwrap().push_back(Ok(vec![Flashcard {
            concept: "Entropy".to_string(),
            definition: "$$S = k \\ln W$$".to_string(),
        }]));

        let documents = vec![
            Document::new("a.pdf", vec![1]),
            Document::new("b.png", vec![2]),
        ];
        let cards = FlashcardFlow::new(&backend)
            .generate(&documents, AiModel::Mistral)
            .await
            .unwrap();

        assert_eq!(cards.len(), 1);
        assert!(cards[0].has_math());
        assert_eq!(
            backend.calls(),
            vec![Call::GenerateFlashcards {
                files: vec!["a.pdf".to_string(), "b.png".to_string()],
                model: AiModel::Mistral,
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_and_failed_results() {
        let backend = ScriptedBackend::new();
        backend.flashcards.lock().unwrap().push_back(Ok(vec![]));
        backend.flashcards.lock().unwrap().push_back(Err(server_error("/flashcards/")));
        let documents = vec![Document::new("a.pdf", vec![1])];
        let flow = FlashcardFlow::new(&backend);

        let err = flow.generate(&documents, AiModel::Gemini).await.unwrap_err();
        assert!(matches!(err, FlowError::NothingGenerated(_)));

        let err = flow.generate(&documents, AiModel::Gemini).await.unwrap_err();
        assert_eq!(err.user_message(), "❌ 使用 Gemini 生成闪卡失败");
    }
}
