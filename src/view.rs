//! 终端渲染
//!
//! 只读会话状态，生成要打印的文本。

use crate::models::{ChatMessage, Flashcard, Mcq, Role, StudentReport};
use crate::workflow::McqState;

pub fn render_mcqs(mcqs: &[Mcq]) -> String {
    let mut out = String::from("📚 选择题\n");
    for (i, mcq) in mcqs.iter().enumerate() {
        out.push_str(&format!("\n📝 {}. {}\n", i + 1, mcq.question));
        for option in &mcq.options {
            out.push_str(&format!("    {}\n", option));
        }
        out.push_str(&format!("    ✅ 正确答案: {}\n", mcq.correct_answer));
    }
    out
}

/// 主题勾选菜单；编号从 1 开始，供 `all` / `toggle` 命令使用
pub fn render_topic_menu(state: &McqState) -> String {
    let selection = state.selection();
    let mut out = String::from("📑 选择要生成选择题的子主题\n");

    for (ci, (chapter, subtopics)) in state.topics().chapters().enumerate() {
        let mark = if selection.chapter_toggle(chapter) { "x" } else { " " };
        out.push_str(&format!("\n📖 {}. {}  [{}] 全选\n", ci + 1, chapter, mark));

        for (si, subtopic) in subtopics.iter().enumerate() {
            let mark = if selection.subtopic_toggle(chapter, subtopic) { "x" } else { " " };
            out.push_str(&format!("    {}.{} [{}] {}\n", ci + 1, si + 1, mark, subtopic));
        }
    }

    let selected = state.selected_subtopics();
    if selected.is_empty() {
        out.push_str("\n已选: 无（生成不可用）\n");
    } else {
        out.push_str(&format!("\n已选 {} 个: {}\n", selected.len(), selected.join(", ")));
    }
    out
}

pub fn render_flashcards(flashcards: &[Flashcard]) -> String {
    let mut out = String::new();
    for card in flashcards {
        out.push_str(&format!("\n▸ **{}**\n", card.concept));
        if card.has_math() {
            // 公式不折行，逐行原样缩进输出
            for line in card.definition.lines() {
                out.push_str(&format!("    {}\n", line));
            }
        } else {
            out.push_str(&format!("  {}\n", card.definition));
        }
    }
    out
}

pub fn render_message(message: &ChatMessage) -> String {
    let who = match message.role {
        Role::User => "🧑 user",
        Role::Assistant => "🤖 assistant",
    };
    format!("{}: {}", who, message.content)
}

pub fn render_report(report: &StudentReport) -> String {
    let info = &report.student_info;
    let mut out = String::from("📄 成绩报告\n");
    out.push_str(&format!("姓名: {}\n", info.name));
    out.push_str(&format!("学号: {}\n", info.roll_number.as_deref().unwrap_or("")));
    out.push_str(&format!("年级: {}\n", info.grade.as_deref().unwrap_or("")));
    out.push_str(&format!("学校: {}\n", info.school));

    // 科目按后端返回的顺序输出
    out.push_str("\n📊 各科成绩\n");
    for (subject, details) in &report.subject_performance {
        out.push_str(&format!(
            "- {}: {}\n",
            subject,
            details.final_grade.as_deref().unwrap_or("N/A")
        ));
    }

    out.push_str("\n💪 优势\n");
    if report.strengths.is_empty() {
        out.push_str("暂无明显优势\n");
    } else {
        out.push_str(&format!("{}\n", report.strengths.join(", ")));
    }

    out.push_str("\n⚠ 薄弱科目\n");
    for weakness in &report.weaknesses {
        out.push_str(&format!("- {}: {}\n", weakness.subject, weakness.reason));
    }

    out.push_str("\n📝 总体评价\n");
    out.push_str(&report.overall_performance_summary);
    out.push('\n');
    out
}
