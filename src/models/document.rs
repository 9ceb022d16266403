use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 待上传的文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = guess_mime(&name);
        Self { name, bytes, mime }
    }

    /// 从磁盘读取文档
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("无法读取文件: {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());

        tracing::debug!("已读取文件 {} ({} 字节)", name, bytes.len());

        Ok(Self::new(name, bytes))
    }

    /// 依次读取多个文档，任一失败即返回错误
    pub async fn load_all(paths: &[impl AsRef<Path>]) -> Result<Vec<Self>> {
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            documents.push(Self::load(path.as_ref()).await?);
        }
        Ok(documents)
    }
}

/// 按扩展名推断 MIME 类型，未知时按二进制上传
fn guess_mime(name: &str) -> &'static str {
    mime_guess::from_path(name)
        .first_raw()
        .unwrap_or("application/octet-stream")
}
