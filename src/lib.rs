//! # Notesight Client
//!
//! Notesight 学习助手的命令行客户端：上传文档、选择模型，调用后端生成笔记、闪卡、
//! 选择题，进行文档问答和成绩单解析。
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 后端调用的唯一出口
//! - `Backend` - 流程层依赖的接口
//! - `HttpBackend` - 基于 reqwest 的实现，不重试、不设超时
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 与后端无关的本地处理
//! - `ChunkDecoder` - 流式响应的增量 UTF-8 解码
//! - `notes_markup` - Markdown 笔记 → PDF 段落标记，并导出文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 每个页面的状态流转，接收旧状态、返回新状态
//! - `McqFlow` - 提取主题 → 勾选子主题 → 生成选择题
//! - `ChatFlow` / `NotesFlow` / `FlashcardFlow` / `ReportFlow`
//!
//! ### ④ 页面层（App）
//! - `app` - 读取用户输入，调用流程，把成功结果写回 `SessionState`，再渲染
//! - `view` - 从状态生成终端文本
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;
pub mod view;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{Backend, HttpBackend};
pub use config::Config;
pub use error::{ApiError, FlowError};
pub use models::{AiModel, Page};
pub use session::SessionState;
pub use workflow::{McqFlow, McqPhase, McqState};
