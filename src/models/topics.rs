use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 主题层级：章节 → 有序子主题列表
///
/// 保留后端返回的章节顺序，章节名唯一。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicHierarchy(IndexMap<String, Vec<String>>);

impl TopicHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加章节；章节名已存在时覆盖其子主题，位置不变
    pub fn insert(&mut self, name: impl Into<String>, subtopics: Vec<String>) {
        self.0.insert(name.into(), subtopics);
    }

    pub fn chapters(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.0.iter().map(|(name, subtopics)| (name.as_str(), subtopics.as_slice()))
    }

    pub fn chapter(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// 按位置取章节，`index` 从 0 开始
    pub fn chapter_at(&self, index: usize) -> Option<(&str, &[String])> {
        self.0
            .get_index(index)
            .map(|(name, subtopics)| (name.as_str(), subtopics.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// `/mcqs/` 的响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTopics {
    #[serde(default)]
    pub topics: TopicHierarchy,
    #[serde(default)]
    pub file_paths: Vec<String>,
}
