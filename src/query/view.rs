//! State of the chapter list as the dashboard presents it: the subject tab,
//! the filter toggles and the sort direction. Transitions go through
//! [`ViewState::reduce`] only.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::sort::sort_by_name;
use crate::catalog::{Chapter, ChapterStatus, Subject};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    NotStarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub active_subject: Subject,
    pub show_weak_chapters: bool,
    pub sort_ascending: bool,
    pub status_filter: StatusFilter,
    pub class_filters: Vec<String>,
    pub unit_filters: Vec<String>,
    pub search_query: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_subject: Subject::Physics,
            show_weak_chapters: false,
            sort_ascending: true,
            status_filter: StatusFilter::All,
            class_filters: vec![],
            unit_filters: vec![],
            search_query: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    /// switches tab and clears every filter, keeps the sort direction
    SetActiveSubject(Subject),
    ToggleWeakChapters,
    ToggleSorting,
    SetStatusFilter(StatusFilter),
    ToggleClassFilter(String),
    ToggleUnitFilter(String),
    SetSearchQuery(String),
    ResetFilters,
}

fn toggle(values: &mut Vec<String>, value: String) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}

impl ViewState {
    pub fn reduce(mut self, action: ViewAction) -> Self {
        match action {
            ViewAction::SetActiveSubject(subject) => {
                self = Self {
                    active_subject: subject,
                    sort_ascending: self.sort_ascending,
                    ..Self::default()
                };
            }
            ViewAction::ToggleWeakChapters => self.show_weak_chapters = !self.show_weak_chapters,
            ViewAction::ToggleSorting => self.sort_ascending = !self.sort_ascending,
            ViewAction::SetStatusFilter(filter) => self.status_filter = filter,
            ViewAction::ToggleClassFilter(class) => toggle(&mut self.class_filters, class),
            ViewAction::ToggleUnitFilter(unit) => toggle(&mut self.unit_filters, unit),
            ViewAction::SetSearchQuery(query) => self.search_query = query,
            ViewAction::ResetFilters => {
                self = Self {
                    active_subject: self.active_subject,
                    sort_ascending: self.sort_ascending,
                    ..Self::default()
                };
            }
        }
        self
    }

    pub fn has_active_filters(&self) -> bool {
        self.show_weak_chapters
            || self.status_filter != StatusFilter::All
            || !self.class_filters.is_empty()
            || !self.unit_filters.is_empty()
            || !self.search_query.trim().is_empty()
    }

    /// Chapters the list shows for this state, sorted by name.
    pub fn visible(&self, chapters: &[Chapter]) -> Vec<Chapter> {
        let query = self.search_query.trim().to_lowercase();
        let classes: HashSet<&str> = self.class_filters.iter().map(String::as_str).collect();
        let units: HashSet<&str> = self.unit_filters.iter().map(String::as_str).collect();
        let mut result: Vec<Chapter> = chapters
            .iter()
            .filter(|ch| ch.subject == self.active_subject)
            .filter(|ch| query.is_empty() || ch.name.to_lowercase().contains(&query))
            .filter(|ch| classes.is_empty() || classes.contains(ch.class_name.as_str()))
            .filter(|ch| units.is_empty() || units.contains(ch.unit.as_str()))
            .filter(|ch| match self.status_filter {
                StatusFilter::All => true,
                StatusFilter::NotStarted => ch.status == ChapterStatus::NotStarted,
            })
            .filter(|ch| !self.show_weak_chapters || ch.is_weak)
            .cloned()
            .collect();
        sort_by_name(&mut result, self.sort_ascending);
        result
    }
}

/// Filter choices offered for one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Facets {
    pub classes: Vec<String>,
    pub units: Vec<String>,
}

impl Facets {
    pub fn collect(chapters: &[Chapter], subject: Subject) -> Self {
        let mut classes = BTreeSet::new();
        let mut units = BTreeSet::new();
        for ch in chapters.iter().filter(|ch| ch.subject == subject) {
            classes.insert(ch.class_name.clone());
            units.insert(ch.unit.clone());
        }
        Self {
            classes: classes.into_iter().collect(),
            units: units.into_iter().collect(),
        }
    }
}
