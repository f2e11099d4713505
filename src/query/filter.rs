use crate::catalog::{Chapter, ChapterStatus, Subject};

/// Optional predicates over chapters, ANDed together. `None` (or an empty
/// string for the text fields) places no constraint on that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChapterFilter {
    pub subject: Option<Subject>,
    pub class_name: Option<String>,
    pub unit: Option<String>,
    pub status: Option<ChapterStatus>,
    pub is_weak: Option<bool>,
    /// case-insensitive substring of the chapter name
    pub search: Option<String>,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

impl ChapterFilter {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && non_empty(&self.class_name).is_none()
            && non_empty(&self.unit).is_none()
            && self.status.is_none()
            && self.is_weak.is_none()
            && non_empty(&self.search).is_none()
    }

    pub fn matches(&self, chapter: &Chapter) -> bool {
        if self.subject.is_some_and(|s| s != chapter.subject) {
            return false;
        }
        if non_empty(&self.class_name).is_some_and(|c| c != chapter.class_name) {
            return false;
        }
        if non_empty(&self.unit).is_some_and(|u| u != chapter.unit) {
            return false;
        }
        if self.status.is_some_and(|s| s != chapter.status) {
            return false;
        }
        if self.is_weak.is_some_and(|w| w != chapter.is_weak) {
            return false;
        }
        if let Some(search) = non_empty(&self.search) {
            if !chapter
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    /// Matching chapters, cloned, in their original order.
    pub fn apply(&self, chapters: &[Chapter]) -> Vec<Chapter> {
        chapters
            .iter()
            .filter(|ch| self.matches(ch))
            .cloned()
            .collect()
    }
}
