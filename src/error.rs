use thiserror::Error;

/// 后端调用错误
///
/// 对应三类失败：网络不可达、非 2xx 状态、响应为空或无法解析。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（连接、读取响应体等）
    #[error("请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 后端返回非成功状态码
    #[error("后端返回错误状态 ({endpoint}): status={status}, detail={detail:?}")]
    Status {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    /// 响应 JSON 解析失败
    #[error("响应解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 后端返回空结果
    #[error("后端返回空结果: {endpoint}")]
    Empty { endpoint: String },
}

impl ApiError {
    /// 创建网络请求失败错误
    pub fn transport(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::Transport {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 后端在错误响应体中给出的 `detail`
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// 流程层错误
///
/// 所有变体在界面边界上处理方式一致：给出提示，不修改会话状态，允许用户重试。
#[derive(Debug, Error)]
pub enum FlowError {
    /// 没有提供任何文档
    #[error("⚠ 请先选择要上传的文件")]
    NoDocuments,
    /// 没有选中任何子主题
    #[error("⚠ 请至少选择一个子主题")]
    EmptySelection,
    /// 尚未提取主题，没有可用的文件路径
    #[error("⚠ 请先提取主题")]
    MissingFilePaths,
    /// 问题内容为空
    #[error("⚠ 问题不能为空")]
    EmptyQuery,
    /// 学号为空
    #[error("⚠ 请输入学号")]
    EmptyStudentId,
    /// 章节或子主题不存在
    #[error("⚠ 未找到主题: {0}")]
    UnknownTopic(String),
    /// 当前页面不支持所选模型
    #[error("⚠ 当前页面不支持模型 {0}")]
    UnsupportedModel(String),
    /// 调用成功但没有生成任何内容
    #[error("{0}")]
    NothingGenerated(String),
    /// 后端调用失败
    #[error("{message}")]
    Remote {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl FlowError {
    /// 包装后端错误：有 `detail` 时展示 `detail`，否则展示通用提示
    pub fn remote(source: ApiError, generic: &str) -> Self {
        let message = match source.detail() {
            Some(detail) => format!("❌ {}", detail),
            None => generic.to_string(),
        };
        FlowError::Remote { message, source }
    }

    /// 展示给用户的提示文本
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
pub type FlowResult<T> = Result<T, FlowError>;
