//! 子主题勾选状态
//!
//! 章节的"全选"开关只在它被切换的那一刻把值写入本章所有子主题开关，
//! 之后各子主题开关各自独立，可以与章节开关不一致。
//! 选中集合只由子主题开关决定。

use std::collections::{HashMap, HashSet};

use crate::models::TopicHierarchy;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicSelection {
    chapter_toggles: HashMap<String, bool>,
    subtopic_toggles: HashMap<(String, String), bool>,
}

impl TopicSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chapter_toggle(&self, chapter: &str) -> bool {
        self.chapter_toggles.get(chapter).copied().unwrap_or(false)
    }

    pub fn subtopic_toggle(&self, chapter: &str, subtopic: &str) -> bool {
        self.subtopic_toggles
            .get(&(chapter.to_string(), subtopic.to_string()))
            .copied()
            .unwrap_or(false)
    }

    /// 切换章节"全选"；值没有变化时不会重置子主题开关
    pub fn set_chapter(&mut self, chapter: &str, subtopics: &[String], on: bool) {
        if self.chapter_toggle(chapter) == on {
            return;
        }
        self.chapter_toggles.insert(chapter.to_string(), on);
        for subtopic in subtopics {
            self.subtopic_toggles
                .insert((chapter.to_string(), subtopic.clone()), on);
        }
    }

    pub fn set_subtopic(&mut self, chapter: &str, subtopic: &str, on: bool) {
        self.subtopic_toggles
            .insert((chapter.to_string(), subtopic.to_string()), on);
    }

    /// 当前选中的子主题，按层级顺序排列；同名子主题只保留第一次出现
    pub fn selected(&self, topics: &TopicHierarchy) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut selected = Vec::new();
        for (chapter, subtopics) in topics.chapters() {
            for subtopic in subtopics {
                if self.subtopic_toggle(chapter, subtopic) && seen.insert(subtopic.as_str()) {
                    selected.push(subtopic.clone());
                }
            }
        }
        selected
    }
}
