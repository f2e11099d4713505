use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{Chapter, ChapterStatus, Subject};

/// Round half up to an integer, like a dashboard displays percentages.
pub fn round_whole(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Round half up to one decimal place.
pub fn round_tenth(x: f64) -> f64 {
    (x * 10.0 + 0.5).floor() / 10.0
}

/// Arithmetic mean, 0 for an empty collection.
fn mean(chapters: &[&Chapter], field: impl Fn(&Chapter) -> f64) -> f64 {
    if chapters.is_empty() {
        return 0.0;
    }
    chapters.iter().map(|ch| field(*ch)).sum::<f64>() / chapters.len() as f64
}

fn count_status(chapters: &[&Chapter], status: ChapterStatus) -> usize {
    chapters.iter().filter(|ch| ch.status == status).count()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub weak: usize,
    pub average_progress: i64,
    pub average_accuracy: i64,
}

impl SubjectStats {
    pub fn compute(chapters: &[Chapter], subject: Subject) -> Self {
        let scoped: Vec<&Chapter> = chapters.iter().filter(|ch| ch.subject == subject).collect();
        Self {
            total: scoped.len(),
            completed: count_status(&scoped, ChapterStatus::Completed),
            in_progress: count_status(&scoped, ChapterStatus::InProgress),
            not_started: count_status(&scoped, ChapterStatus::NotStarted),
            weak: scoped.iter().filter(|ch| ch.is_weak).count(),
            average_progress: round_whole(mean(&scoped, |ch| ch.progress as f64)),
            average_accuracy: round_whole(mean(&scoped, |ch| ch.accuracy)),
        }
    }
}

/// Per-subject stats; every subject is present even without chapters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SubjectBreakdown {
    pub physics: SubjectStats,
    pub chemistry: SubjectStats,
    pub mathematics: SubjectStats,
}

impl SubjectBreakdown {
    pub fn compute(chapters: &[Chapter]) -> Self {
        Self {
            physics: SubjectStats::compute(chapters, Subject::Physics),
            chemistry: SubjectStats::compute(chapters, Subject::Chemistry),
            mathematics: SubjectStats::compute(chapters, Subject::Mathematics),
        }
    }

    pub fn get(&self, subject: Subject) -> &SubjectStats {
        match subject {
            Subject::Physics => &self.physics,
            Subject::Chemistry => &self.chemistry,
            Subject::Mathematics => &self.mathematics,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_chapters: usize,
    pub completed_chapters: usize,
    pub in_progress_chapters: usize,
    pub not_started_chapters: usize,
    pub weak_chapters: usize,
    pub average_accuracy: i64,
    pub average_speed: i64,
    /// one decimal
    pub average_score: f64,
    /// mean progress percentage
    pub total_progress: i64,
    pub subject_breakdown: SubjectBreakdown,
}

impl Analytics {
    /// Headline numbers cover `subject` (or everything when `None`); the
    /// breakdown always covers the whole collection.
    pub fn compute(chapters: &[Chapter], subject: Option<Subject>) -> Self {
        let scoped: Vec<&Chapter> = chapters
            .iter()
            .filter(|ch| subject.is_none_or(|s| s == ch.subject))
            .collect();
        Self {
            total_chapters: scoped.len(),
            completed_chapters: count_status(&scoped, ChapterStatus::Completed),
            in_progress_chapters: count_status(&scoped, ChapterStatus::InProgress),
            not_started_chapters: count_status(&scoped, ChapterStatus::NotStarted),
            weak_chapters: scoped.iter().filter(|ch| ch.is_weak).count(),
            average_accuracy: round_whole(mean(&scoped, |ch| ch.accuracy)),
            average_speed: round_whole(mean(&scoped, |ch| ch.speed)),
            average_score: round_tenth(mean(&scoped, |ch| ch.score)),
            total_progress: round_whole(mean(&scoped, |ch| ch.progress as f64)),
            subject_breakdown: SubjectBreakdown::compute(chapters),
        }
    }
}
