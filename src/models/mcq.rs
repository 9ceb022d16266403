use serde::{Deserialize, Serialize};

/// 选择题
///
/// 后端返回什么就展示什么，不校验 `correct_answer` 是否在 `options` 中。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// `/mcqs/generate/` 的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateMcqRequest {
    pub topics: Vec<String>,
    pub file_paths: Vec<String>,
    pub model: String,
}
