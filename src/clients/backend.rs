//! 后端接口抽象
//!
//! 流程层只依赖这个 trait，真实实现见 [`HttpBackend`](super::HttpBackend)。

use futures::stream::BoxStream;

use crate::error::ApiResult;
use crate::models::{
    AiModel, Document, ExtractedTopics, Flashcard, GenerateMcqRequest, Mcq, StudentReport,
};

/// 笔记生成的流式响应，每一项是一段原始字节
pub type NotesStream = BoxStream<'static, ApiResult<Vec<u8>>>;

/// 远端服务提供的全部调用
///
/// 每次用户操作最多发起一次调用；不重试、不取消、不设置客户端超时。
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// POST `/mcqs/`：上传文档并提取章节/子主题
    async fn extract_topics(
        &self,
        documents: &[Document],
        model: AiModel,
    ) -> ApiResult<ExtractedTopics>;

    /// POST `/mcqs/generate/`：按子主题生成选择题
    async fn generate_mcqs(&self, request: &GenerateMcqRequest) -> ApiResult<Vec<Mcq>>;

    /// POST `/notes/`：流式生成笔记
    async fn generate_notes(&self, documents: &[Document], model: AiModel)
        -> ApiResult<NotesStream>;

    /// POST `/flashcards/`：生成闪卡
    async fn generate_flashcards(
        &self,
        documents: &[Document],
        model: AiModel,
    ) -> ApiResult<Vec<Flashcard>>;

    /// POST `/upload/`：上传问答用的文档，返回后端文件路径
    async fn upload_file(&self, document: &Document, model: AiModel) -> ApiResult<Option<String>>;

    /// POST `/ask/`：针对已上传文档提问
    async fn ask(&self, query: &str, model: AiModel) -> ApiResult<Option<String>>;

    /// POST `/report/`：上传成绩单 PDF 并生成报告
    async fn upload_report(&self, document: &Document) -> ApiResult<Option<StudentReport>>;

    /// GET `/report/{student_id}`：查询已生成的报告
    async fn fetch_report(&self, student_id: &str) -> ApiResult<Option<StudentReport>>;
}
