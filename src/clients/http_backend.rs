/// 后端 HTTP 客户端
///
/// 封装所有与 Notesight 后端相关的调用逻辑
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::clients::backend::{Backend, NotesStream};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AiModel, AskResponse, Document, ExtractedTopics, Flashcard, FlashcardResponse,
    GenerateMcqRequest, Mcq, StudentReport, UploadResponse,
};

const EXTRACT_TOPICS: &str = "/mcqs/";
const GENERATE_MCQS: &str = "/mcqs/generate/";
const NOTES: &str = "/notes/";
const FLASHCARDS: &str = "/flashcards/";
const UPLOAD: &str = "/upload/";
const ASK: &str = "/ask/";
const REPORT: &str = "/report/";

/// Notesight 后端客户端
///
/// 不设置超时，依赖 reqwest 默认行为。
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// 发送请求并检查状态码，非 2xx 一律视为失败
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> ApiResult<Response> {
        debug!("请求后端接口: {}", endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(endpoint, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // 错误响应体可能不是 JSON，读取失败时按无 detail 处理
        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body);
        warn!("后端返回错误状态 {} ({}): {:?}", status, endpoint, detail);

        Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            detail,
        })
    }

    async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> ApiResult<T> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(endpoint, e))?;

        debug!("接口 {} 响应长度: {} 字节", endpoint, body.len());

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    fn file_part(endpoint: &str, document: &Document) -> ApiResult<Part> {
        Part::bytes(document.bytes.clone())
            .file_name(document.name.clone())
            .mime_str(document.mime)
            .map_err(|e| ApiError::transport(endpoint, e))
    }

    /// 多文件表单：每个文件都使用 `files` 字段
    fn files_form(endpoint: &str, documents: &[Document], model: AiModel) -> ApiResult<Form> {
        let mut form = Form::new();
        for document in documents {
            form = form.part("files", Self::file_part(endpoint, document)?);
        }
        Ok(form.text("model", model.id()))
    }
}

impl Backend for HttpBackend {
    async fn extract_topics(
        &self,
        documents: &[Document],
        model: AiModel,
    ) -> ApiResult<ExtractedTopics> {
        let form = Self::files_form(EXTRACT_TOPICS, documents, model)?;
        let request = self.client.post(self.url(EXTRACT_TOPICS)).multipart(form);
        let response = self.send(EXTRACT_TOPICS, request).await?;
        Self::read_json(EXTRACT_TOPICS, response).await
    }

    async fn generate_mcqs(&self, request: &GenerateMcqRequest) -> ApiResult<Vec<Mcq>> {
        let builder = self.client.post(self.url(GENERATE_MCQS)).json(request);
        let response = self.send(GENERATE_MCQS, builder).await?;
        Self::read_json(GENERATE_MCQS, response).await
    }

    async fn generate_notes(
        &self,
        documents: &[Document],
        model: AiModel,
    ) -> ApiResult<NotesStream> {
        let form = Self::files_form(NOTES, documents, model)?;
        let request = self.client.post(self.url(NOTES)).multipart(form);
        let response = self.send(NOTES, request).await?;

        let stream = response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|e| ApiError::transport(NOTES, e))
            })
            .boxed();

        Ok(stream)
    }

    async fn generate_flashcards(
        &self,
        documents: &[Document],
        model: AiModel,
    ) -> ApiResult<Vec<Flashcard>> {
        let form = Self::files_form(FLASHCARDS, documents, model)?;
        let request = self.client.post(self.url(FLASHCARDS)).multipart(form);
        let response = self.send(FLASHCARDS, request).await?;
        let body: FlashcardResponse = Self::read_json(FLASHCARDS, response).await?;
        Ok(body.flashcards)
    }

    async fn upload_file(&self, document: &Document, model: AiModel) -> ApiResult<Option<String>> {
        let form = Form::new()
            .part("file", Self::file_part(UPLOAD, document)?)
            .text("model", model.id());
        let request = self.client.post(self.url(UPLOAD)).multipart(form);
        let response = self.send(UPLOAD, request).await?;
        let body: UploadResponse = Self::read_json(UPLOAD, response).await?;
        Ok(body.file_path)
    }

    async fn ask(&self, query: &str, model: AiModel) -> ApiResult<Option<String>> {
        let request = self
            .client
            .post(self.url(ASK))
            .form(&[("query", query), ("model", model.id())]);
        let response = self.send(ASK, request).await?;
        let body: AskResponse = Self::read_json(ASK, response).await?;
        Ok(body.answer)
    }

    async fn upload_report(&self, document: &Document) -> ApiResult<Option<StudentReport>> {
        let form = Form::new().part("file", Self::file_part(REPORT, document)?);
        let request = self.client.post(self.url(REPORT)).multipart(form);
        let response = self.send(REPORT, request).await?;
        let body: Value = Self::read_json(REPORT, response).await?;
        unwrap_report(REPORT, body)
    }

    async fn fetch_report(&self, student_id: &str) -> ApiResult<Option<StudentReport>> {
        let endpoint = format!("{}{}", REPORT, student_id);
        let request = self.client.get(self.url(&endpoint));
        let response = self.send(&endpoint, request).await?;
        let body: Value = Self::read_json(&endpoint, response).await?;
        unwrap_report(&endpoint, body)
    }
}

/// 报告可能包在 `data` 里，也可能直接返回
fn unwrap_report(endpoint: &str, body: Value) -> ApiResult<Option<StudentReport>> {
    let report = match body {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    };

    if report.is_null() {
        return Ok(None);
    }

    serde_json::from_value(report)
        .map(Some)
        .map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
}

/// 从错误响应体中提取 `detail`
///
/// `detail` 不是字符串时（例如校验错误列表）按 JSON 文本展示。
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
