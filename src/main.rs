use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use notesight_client::utils::logging;
use notesight_client::{AiModel, App, Config, Page};

/// Notesight 学习助手命令行客户端
#[derive(Debug, Parser)]
#[command(name = "notesight", version)]
struct Cli {
    /// TOML 配置文件
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 后端地址，覆盖配置文件和环境变量
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// 输出详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 上传文档并流式生成笔记
    Notes {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long, value_enum)]
        model: Option<AiModel>,
    },
    /// 上传文档并生成闪卡
    Flashcards {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long, value_enum)]
        model: Option<AiModel>,
    },
    /// 上传一个文档后针对它提问
    Chat {
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        model: Option<AiModel>,
    },
    /// 提取主题、勾选子主题并生成选择题
    Mcq {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long, value_enum)]
        model: Option<AiModel>,
    },
    /// 学生成绩单报告
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },
}

#[derive(Debug, Subcommand)]
enum ReportAction {
    /// 上传成绩单 PDF 生成报告
    Upload { file: PathBuf },
    /// 按学号查询报告
    Get { student_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env(),
    }
    .with_overrides(cli.base_url, cli.verbose);

    // 初始化日志
    logging::init(&config)?;

    match cli.command {
        Command::Notes { files, model } => {
            App::stdio(config, Page::Notes).run_notes(&files, model).await?
        }
        Command::Flashcards { files, model } => {
            App::stdio(config, Page::Flashcards)
                .run_flashcards(&files, model)
                .await?
        }
        Command::Chat { file, model } => {
            App::stdio(config, Page::Chat)
                .run_chat(file.as_deref(), model)
                .await?
        }
        Command::Mcq { files, model } => {
            App::stdio(config, Page::Mcq).run_mcq(&files, model).await?
        }
        Command::Report { action } => {
            let mut app = App::stdio(config, Page::ReportCard);
            match action {
                ReportAction::Upload { file } => app.run_report_upload(&file).await?,
                ReportAction::Get { student_id } => app.run_report_fetch(&student_id).await?,
            }
        }
    }

    Ok(())
}
