//! 页面层
//!
//! 每个页面对应一个子命令：读取用户输入 → 调用流程 → 成功时写回会话状态 → 从会话状态渲染。
//! 远端失败只打印提示，不会结束会话。

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

use crate::clients::{Backend, HttpBackend};
use crate::commands::{McqCommand, MCQ_HELP};
use crate::config::Config;
use crate::error::{FlowError, FlowResult};
use crate::models::{AiModel, Document, Page, StudentReport};
use crate::services::export_notes;
use crate::session::SessionState;
use crate::utils::logging::{log_startup, truncate_text};
use crate::view;
use crate::workflow::{ChatFlow, FlashcardFlow, McqFlow, McqState, NotesFlow, ReportFlow};

/// 应用主结构
pub struct App<B, R, W> {
    config: Config,
    backend: B,
    session: SessionState,
    input: Lines<R>,
    out: W,
}

impl App<HttpBackend, BufReader<Stdin>, std::io::Stdout> {
    /// 使用真实后端和标准输入输出
    pub fn stdio(config: Config, page: Page) -> Self {
        let backend = HttpBackend::new(&config);
        App::new(
            config,
            backend,
            page,
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
        )
    }
}

impl<B, R, W> App<B, R, W>
where
    B: Backend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(config: Config, backend: B, page: Page, input: R, out: W) -> Self {
        log_startup(page.title(), &config.base_url);
        Self {
            config,
            backend,
            session: SessionState::for_page(page),
            input: input.lines(),
            out,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    // ========== 笔记 ==========

    pub async fn run_notes(&mut self, files: &[PathBuf], model: Option<AiModel>) -> Result<()> {
        let model = self.select_model(Page::Notes, model)?;
        let documents = Document::load_all(files).await?;

        let out = &mut self.out;
        writeln!(out, "📝 正在生成笔记...\n")?;

        let flow = NotesFlow::new(&self.backend);
        let result = flow
            .generate(&documents, model, |text| {
                // 渲染失败不影响接收
                let _ = write!(out, "{}", text);
                let _ = out.flush();
            })
            .await;

        match result {
            Ok(notes) => {
                self.session.notes_text = notes;
                writeln!(self.out, "\n")?;
                let export = export_notes(Path::new(&self.config.output_dir), &self.session.notes_text).await?;
                writeln!(self.out, "📥 文本: {}", export.text_path.display())?;
                writeln!(self.out, "📥 PDF 标记: {}", export.markup_path.display())?;
            }
            Err(e) => self.show_error(&e)?,
        }
        Ok(())
    }

    // ========== 闪卡 ==========

    pub async fn run_flashcards(&mut self, files: &[PathBuf], model: Option<AiModel>) -> Result<()> {
        let model = self.select_model(Page::Flashcards, model)?;
        let documents = Document::load_all(files).await?;

        writeln!(self.out, "🔹 正在使用 {} 生成闪卡... ⏳", model)?;
        let result = FlashcardFlow::new(&self.backend).generate(&documents, model).await;

        match result {
            Ok(flashcards) => {
                self.session.flashcards = flashcards;
                writeln!(self.out, "✅ 已使用 {} 生成闪卡", model)?;
                writeln!(self.out, "\n📝 闪卡 ({} 生成)", model)?;
                write!(self.out, "{}", view::render_flashcards(&self.session.flashcards))?;
            }
            Err(e) => self.show_error(&e)?,
        }
        Ok(())
    }

    // ========== 文档问答 ==========

    pub async fn run_chat(&mut self, file: Option<&Path>, model: Option<AiModel>) -> Result<()> {
        let model = self.select_model(Page::Chat, model)?;

        if let Some(path) = file {
            let document = Document::load(path).await?;
            match ChatFlow::new(&self.backend).upload(&document, model).await {
                Ok(file_path) => {
                    self.session.file_path = file_path;
                    writeln!(self.out, "✅ 文件上传成功！")?;
                }
                Err(e) => {
                    self.show_error(&e)?;
                    return Ok(());
                }
            }
        }

        writeln!(self.out, "💬 针对文档提问（输入 quit 退出）")?;

        while let Some(line) = self.prompt("❓").await? {
            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            if matches!(query, "quit" | "exit") {
                break;
            }

            debug!("提问: {}", truncate_text(query, 80));
            let result = ChatFlow::new(&self.backend)
                .ask(&self.session.messages, query, model)
                .await;

            match result {
                Ok(transcript) => {
                    self.session.messages = transcript;
                    if let Some(answer) = self.session.messages.messages().last() {
                        writeln!(self.out, "{}", view::render_message(answer))?;
                    }
                }
                Err(e) => self.show_error(&e)?,
            }
        }
        Ok(())
    }

    // ========== 选择题 ==========

    pub async fn run_mcq(&mut self, files: &[PathBuf], model: Option<AiModel>) -> Result<()> {
        let model = self.select_model(Page::Mcq, model)?;
        let documents = Document::load_all(files).await?;

        self.extract(&documents, model).await?;
        writeln!(self.out, "{}", MCQ_HELP)?;

        while let Some(line) = self.prompt("mcq>").await? {
            if line.trim().is_empty() {
                continue;
            }
            let command = match McqCommand::parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(self.out, "⚠ {}", message)?;
                    continue;
                }
            };

            match command {
                McqCommand::List => self.show_topics()?,
                McqCommand::ToggleChapter { chapter } => {
                    let result = self.chapter_name(chapter).and_then(|name| {
                        let on = !self.session.mcq.selection().chapter_toggle(&name);
                        self.session.mcq.toggle_chapter(&name, on)
                    });
                    self.apply_toggle(result)?;
                }
                McqCommand::ToggleSubtopic { chapter, subtopic } => {
                    let result = self.subtopic_name(chapter, subtopic).and_then(|(c, s)| {
                        let on = !self.session.mcq.selection().subtopic_toggle(&c, &s);
                        self.session.mcq.toggle_subtopic(&c, &s, on)
                    });
                    self.apply_toggle(result)?;
                }
                McqCommand::Extract => self.extract(&documents, model).await?,
                McqCommand::Generate => self.generate_mcqs(model).await?,
                McqCommand::Help => writeln!(self.out, "{}", MCQ_HELP)?,
                McqCommand::Quit => break,
            }
        }
        Ok(())
    }

    async fn extract(&mut self, documents: &[Document], model: AiModel) -> Result<()> {
        writeln!(self.out, "🔍 正在使用 {} 提取主题... ⏳", model)?;
        let result = McqFlow::new(&self.backend)
            .extract_topics(&self.session.mcq, documents, model)
            .await;

        match result {
            Ok(state) => {
                self.session.mcq = state;
                writeln!(self.out, "✅ 主题已提取！请在下方选择子主题。")?;
                self.show_topics()?;
            }
            Err(e) => self.show_error(&e)?,
        }
        Ok(())
    }

    async fn generate_mcqs(&mut self, model: AiModel) -> Result<()> {
        // 没有主题或没有选中子主题时"生成"不可用
        if self.session.mcq.topics().is_empty() {
            return self.show_error(&FlowError::MissingFilePaths);
        }
        if !self.session.mcq.can_generate() {
            return self.show_error(&FlowError::EmptySelection);
        }

        writeln!(self.out, "🎯 正在使用 {} 生成选择题... ⏳", model)?;
        let result = McqFlow::new(&self.backend)
            .generate(&self.session.mcq, model)
            .await;

        match result {
            Ok(state) => {
                self.session.mcq = state;
                write!(self.out, "{}", view::render_mcqs(self.session.mcq.mcqs()))?;
            }
            Err(e) => self.show_error(&e)?,
        }
        Ok(())
    }

    fn show_topics(&mut self) -> Result<()> {
        if self.session.mcq.topics().is_empty() {
            writeln!(self.out, "⚠ 尚未提取主题，输入 extract 重试")?;
        } else {
            write!(self.out, "{}", view::render_topic_menu(&self.session.mcq))?;
        }
        Ok(())
    }

    fn apply_toggle(&mut self, result: FlowResult<McqState>) -> Result<()> {
        match result {
            Ok(state) => {
                self.session.mcq = state;
                self.show_topics()
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn chapter_name(&self, chapter: usize) -> FlowResult<String> {
        self.session
            .mcq
            .topics()
            .chapter_at(chapter.wrapping_sub(1))
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| FlowError::UnknownTopic(format!("章节 {}", chapter)))
    }

    fn subtopic_name(&self, chapter: usize, subtopic: usize) -> FlowResult<(String, String)> {
        self.session
            .mcq
            .topics()
            .chapter_at(chapter.wrapping_sub(1))
            .and_then(|(name, subtopics)| {
                subtopics
                    .get(subtopic.wrapping_sub(1))
                    .map(|s| (name.to_string(), s.clone()))
            })
            .ok_or_else(|| FlowError::UnknownTopic(format!("{}.{}", chapter, subtopic)))
    }

    // ========== 成绩单 ==========

    pub async fn run_report_upload(&mut self, file: &Path) -> Result<()> {
        let document = Document::load(file).await?;
        writeln!(self.out, "正在生成报告...")?;

        let result = ReportFlow::new(&self.backend).upload(&document).await;
        self.show_report(result)
    }

    pub async fn run_report_fetch(&mut self, student_id: &str) -> Result<()> {
        let result = ReportFlow::new(&self.backend).fetch(student_id).await;
        self.show_report(result)
    }

    fn show_report(&mut self, result: FlowResult<StudentReport>) -> Result<()> {
        match result {
            Ok(report) => {
                write!(self.out, "{}", view::render_report(&report))?;
                self.session.report = Some(report);
                Ok(())
            }
            Err(e) => self.show_error(&e),
        }
    }

    // ========== 辅助方法 ==========

    fn select_model(&mut self, page: Page, model: Option<AiModel>) -> Result<AiModel> {
        let model = model.unwrap_or_else(|| page.default_model());
        if !page.supports(model) {
            anyhow::bail!(FlowError::UnsupportedModel(model.label().to_string()));
        }
        self.session.selected_model = model;
        writeln!(self.out, "{}\n🤖 模型: {}", page.title(), model)?;
        Ok(model)
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{} ", label)?;
        self.out.flush()?;
        Ok(self.input.next_line().await?)
    }

    fn show_error(&mut self, err: &FlowError) -> Result<()> {
        writeln!(self.out, "{}", err.user_message())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::{server_error, Call, ScriptedBackend};
    use crate::models::{ExtractedTopics, GenerateMcqRequest, Mcq, Role};
    use crate::workflow::McqPhase;
    use tempfile::TempDir;

    fn temp_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn app(backend: ScriptedBackend, page: Page, script: &str) -> App<ScriptedBackend, &[u8], Vec<u8>> {
        App::new(Config::default(), backend, page, script.as_bytes(), Vec::new())
    }

    fn output(app: App<ScriptedBackend, &[u8], Vec<u8>>) -> String {
        String::from_utf8(app.into_output()).unwrap()
    }

    #[tokio::test]
    async fn test_mcq_page_scenario() {
        let _ = tracing_subscriber::fmt::try_init();
        let backend = ScriptedBackend::new();
        let topics: ExtractedTopics =
            serde_json::from_str(r#"{"topics": {"Ch1": ["A", "B"]}, "file_paths": ["p1"]}"#).unwrap();
        backend.topics.lock().unwrap().push_back(Ok(topics));
        backend.mcqs.lock().unwrap().push_back(Ok(vec![Mcq {
            question: "Q1".to_string(),
            options: vec!["x".to_string(), "y".to_string()],
            correct_answer: "x".to_string(),
        }]));

        let tmp = tempfile::tempdir().unwrap();
        let file = temp_file(&tmp, "mcq.pdf", b"%PDF");
        let mut app = app(backend, Page::Mcq, "generate\ntoggle 1.1\ngenerate\nquit\n");
        app.run_mcq(&[file], None).await.unwrap();

        assert_eq!(app.session().mcq.phase(), McqPhase::McqsGenerated);
        assert_eq!(app.session().mcq.mcqs().len(), 1);
        assert_eq!(
            app.backend.calls()[1],
            Call::GenerateMcqs(GenerateMcqRequest {
                topics: vec!["A".to_string()],
                file_paths: vec!["p1".to_string()],
                model: "Gemini".to_string(),
            })
        );

        let out = output(app);
        // 第一次 generate 时没有勾选，不应发出请求
        assert!(out.contains("⚠ 请至少选择一个子主题"));
        assert_eq!(out.matches("📝 ").count(), 1);
        assert!(out.contains("📝 1. Q1"));
        assert!(out.contains("✅ 正确答案: x"));
    }

    #[tokio::test]
    async fn test_mcq_extract_failure_keeps_session_empty() {
        let backend = ScriptedBackend::new();
        backend.topics.lock().unwrap().push_back(Err(server_error("/mcqs/")));

        let tmp = tempfile::tempdir().unwrap();
        let file = temp_file(&tmp, "fail.pdf", b"%PDF");
        let mut app = app(backend, Page::Mcq, "list\ngenerate\nquit\n");
        app.run_mcq(&[file], Some(AiModel::Mistral)).await.unwrap();

        assert_eq!(app.session().mcq, McqState::new());
        assert_eq!(app.session().selected_model, AiModel::Mistral);
        let out = output(app);
        assert!(out.contains("❌ 提取主题失败"));
        assert!(out.contains("尚未提取主题"));
        // 没有主题时提示先提取，而不是提示勾选
        assert!(out.contains("⚠ 请先提取主题"));
        assert!(!out.contains("请至少选择一个子主题"));
    }

    #[tokio::test]
    async fn test_chat_page_records_exchange() {
        let backend = ScriptedBackend::new();
        backend.uploads.lock().unwrap().push_back(Ok(Some("uploads/doc.pdf".to_string())));
        backend.answers.lock().unwrap().push_back(Ok(Some("X is ...".to_string())));

        let tmp = tempfile::tempdir().unwrap();
        let file = temp_file(&tmp, "doc.pdf", b"%PDF");
        let mut app = app(backend, Page::Chat, "What is X?\n\nquit\n");
        app.run_chat(Some(&file), None).await.unwrap();

        let session = app.session();
        assert_eq!(session.file_path.as_deref(), Some("uploads/doc.pdf"));
        let roles: Vec<Role> = session.messages.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert!(output(app).contains("🤖 assistant: X is ..."));
    }

    #[tokio::test]
    async fn test_chat_rejects_unsupported_model() {
        let mut app = app(ScriptedBackend::new(), Page::Chat, "");
        let result = app.run_chat(None, Some(AiModel::Mistral)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_notes_page_streams_and_exports() {
        let backend = ScriptedBackend::new();
        backend
            .notes
            .lock()
            .unwrap()
            .push_back(Ok(vec![Ok(b"**Key** ".to_vec()), Ok(b"idea".to_vec())]));

        let tmp = tempfile::tempdir().unwrap();
        let file = temp_file(&tmp, "lecture.pdf", b"%PDF");
        let out_dir = tmp.path().join("out");
        let config = Config {
            output_dir: out_dir.to_string_lossy().to_string(),
            ..Config::default()
        };
        let mut app = App::new(config, backend, Page::Notes, &b""[..], Vec::new());
        app.run_notes(&[file], Some(AiModel::ChatGpt)).await.unwrap();

        assert_eq!(app.session().notes_text, "**Key** idea");
        let markup = std::fs::read_to_string(out_dir.join("Generated_notes.markup")).unwrap();
        assert_eq!(markup, "<b>Key</b> idea");
        assert!(output(app).contains("**Key** idea"));
    }
}
