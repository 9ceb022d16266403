use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// 程序配置
///
/// 优先级：命令行参数 > 环境变量 > 配置文件 > 默认值
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端服务地址
    pub base_url: String,
    /// 导出文件（笔记 txt / markup）的目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 日志文件，未设置时输出到 stderr
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            output_dir: ".".to_string(),
            verbose_logging: false,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 从 TOML 文件加载配置，再用环境变量覆盖
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;

        Ok(config.with_env())
    }

    /// 命令行参数覆盖
    pub fn with_overrides(self, base_url: Option<String>, verbose: bool) -> Self {
        Self {
            base_url: base_url.unwrap_or(self.base_url),
            verbose_logging: self.verbose_logging || verbose,
            ..self
        }
    }

    fn with_env(self) -> Self {
        Self {
            base_url: std::env::var("NOTESIGHT_BASE_URL").unwrap_or(self.base_url),
            output_dir: std::env::var("NOTESIGHT_OUTPUT_DIR").unwrap_or(self.output_dir),
            verbose_logging: std::env::var("NOTESIGHT_VERBOSE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            log_file: std::env::var("NOTESIGHT_LOG_FILE").ok().or(self.log_file),
        }
    }
}
