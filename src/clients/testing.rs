//! 测试用的脚本化后端：按调用顺序返回预设结果，并记录请求

use futures::StreamExt;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::clients::backend::{Backend, NotesStream};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AiModel, Document, ExtractedTopics, Flashcard, GenerateMcqRequest, Mcq, StudentReport,
};

/// 一次被记录下来的调用
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ExtractTopics { files: Vec<String>, model: AiModel },
    GenerateMcqs(GenerateMcqRequest),
    GenerateNotes { files: Vec<String>, model: AiModel },
    GenerateFlashcards { files: Vec<String>, model: AiModel },
    UploadFile { file: String, model: AiModel },
    Ask { query: String, model: AiModel },
    UploadReport { file: String },
    FetchReport { student_id: String },
}

#[derive(Default)]
pub struct ScriptedBackend {
    pub calls: Mutex<Vec<Call>>,
    pub topics: Mutex<VecDeque<ApiResult<ExtractedTopics>>>,
    pub mcqs: Mutex<VecDeque<ApiResult<Vec<Mcq>>>>,
    pub notes: Mutex<VecDeque<ApiResult<Vec<ApiResult<Vec<u8>>>>>>,
    pub flashcards: Mutex<VecDeque<ApiResult<Vec<Flashcard>>>>,
    pub uploads: Mutex<VecDeque<ApiResult<Option<String>>>>,
    pub answers: Mutex<VecDeque<ApiResult<Option<String>>>>,
    pub reports: Mutex<VecDeque<ApiResult<Option<StudentReport>>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

/// 模拟 HTTP 500
pub fn server_error(endpoint: &str) -> ApiError {
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status: 500,
        detail: None,
    }
}

fn names(documents: &[Document]) -> Vec<String> {
    documents.iter().map(|d| d.name.clone()).collect()
}

fn next<T>(queue: &Mutex<VecDeque<ApiResult<T>>>, endpoint: &str) -> ApiResult<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Empty { endpoint: endpoint.to_string() }))
}

impl Backend for ScriptedBackend {
    async fn extract_topics(
        &self,
        documents: &[Document],
        model: AiModel,
    ) -> ApiResult<ExtractedTopics> {
        self.record(Call::ExtractTopics { files: names(documents), model });
        next(&self.topics, "/mcqs/")
    }

    async fn generate_mcqs(&self, request: &GenerateMcqRequest) -> ApiResult<Vec<Mcq>> {
        self.record(Call::GenerateMcqs(request.clone()));
        next(&self.mcqs, "/mcqs/generate/")
    }

    async fn generate_notes(
        &self,
        documents: &[Document],
        model: AiModel,
    ) -> ApiResult<NotesStream> {
        self.record(Call::GenerateNotes { files: names(documents), model });
        let chunks = next(&self.notes, "/notes/")?;
        Ok(futures::stream::iter(chunks).boxed())
    }

    async fn generate_flashcards(
        &self,
        documents: &[Document],
        model: AiModel,
    ) -> ApiResult<Vec<Flashcard>> {
        self.record(Call::GenerateFlashcards { files: names(documents), model });
        next(&self.flashcards, "/flashcards/")
    }

    async fn upload_file(&self, document: &Document, model: AiModel) -> ApiResult<Option<String>> {
        self.record(Call::UploadFile { file: document.name.clone(), model });
        next(&self.uploads, "/upload/")
    }

    async fn ask(&self, query: &str, model: AiModel) -> ApiResult<Option<String>> {
        self.record(Call::Ask { query: query.to_string(), model });
        next(&self.answers, "/ask/")
    }

    async fn upload_report(&self, document: &Document) -> ApiResult<Option<StudentReport>> {
        self.record(Call::UploadReport { file: document.name.clone() });
        next(&self.reports, "/report/")
    }

    async fn fetch_report(&self, student_id: &str) -> ApiResult<Option<StudentReport>> {
        self.record(Call::FetchReport { student_id: student_id.to_string() });
        next(&self.reports, "/report/")
    }
}
