//! 笔记导出 - 业务能力层
//!
//! 把后端生成的 Markdown 笔记转换为 PDF 段落标记，并写入导出目录。
//! 标记的渲染由外部 PDF 工具完成。

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::info;

pub const NOTES_TEXT_FILE: &str = "Generated_notes.txt";
pub const NOTES_MARKUP_FILE: &str = "Generated_notes.markup";

/// 把 Markdown 文本转换为 PDF 段落标记
///
/// - `**粗体**` → `<b>粗体</b>`（非贪婪，不跨行）
/// - 空行 → `<br/><br/>`，其余换行 → `<br/>`
/// - 去掉 `<para>` / `</para>`
pub fn to_pdf_markup(text: &str) -> Result<String> {
    let bold = Regex::new(r"\*\*(.*?)\*\*")?;
    let markup = bold.replace_all(text, "<b>$1</b>");

    let markup = markup
        .replace("\n\n", "<br/><br/>")
        .replace('\n', "<br/>")
        .replace("<para>", "")
        .replace("</para>", "");

    Ok(markup)
}

/// 导出结果
#[derive(Debug, Clone)]
pub struct NotesExport {
    pub text_path: PathBuf,
    pub markup_path: PathBuf,
}

/// 写出原始文本和 PDF 段落标记两个文件
pub async fn export_notes(output_dir: &Path, notes: &str) -> Result<NotesExport> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("无法创建导出目录: {}", output_dir.display()))?;

    let text_path = output_dir.join(NOTES_TEXT_FILE);
    let markup_path = output_dir.join(NOTES_MARKUP_FILE);

    tokio::fs::write(&text_path, notes)
        .await
        .with_context(|| format!("无法写入文件: {}", text_path.display()))?;

    let markup = to_pdf_markup(notes)?;
    tokio::fs::write(&markup_path, markup)
        .await
        .with_context(|| format!("无法写入文件: {}", markup_path.display()))?;

    info!("📥 笔记已导出: {}, {}", text_path.display(), markup_path.display());

    Ok(NotesExport {
        text_path,
        markup_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_line_breaks() {
        let markup = to_pdf_markup("**Title**\n\nLine one\nLine **two**").unwrap();
        assert_eq!(markup, "<b>Title</b><br/><br/>Line one<br/>Line <b>two</b>");
    }

    #[test]
    fn test_bold_does_not_span_lines() {
        let markup = to_pdf_markup("**open\nclose**").unwrap();
        assert_eq!(markup, "**open<br/>close**");
    }

    #[test]
    fn test_para_tags_removed() {
        let markup = to_pdf_markup("<para>kept</para>").unwrap();
        assert_eq!(markup, "kept");
    }

    #[tokio::test]
    async fn test_export_writes_both_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("exports");
        let export = export_notes(&dir, "**A**\nb").await.unwrap();

        let text = tokio::fs::read_to_string(&export.text_path).await.unwrap();
        let markup = tokio::fs::read_to_string(&export.markup_path).await.unwrap();
        assert_eq!(text, "**A**\nb");
        assert_eq!(markup, "<b>A</b><br/>b");
    }
}
