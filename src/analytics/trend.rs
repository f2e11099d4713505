use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::Chapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// The per-chapter delta fields a trend can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendField {
    AccuracyChange,
    SpeedChange,
    ScoreChange,
}

impl TrendField {
    pub fn delta(&self, chapter: &Chapter) -> f64 {
        match self {
            TrendField::AccuracyChange => chapter.accuracy_change,
            TrendField::SpeedChange => chapter.speed_change,
            TrendField::ScoreChange => chapter.score_change,
        }
    }
}

impl Trend {
    /// Majority vote of the non-zero deltas' signs; a tie is `Stable`.
    pub fn classify(deltas: impl IntoIterator<Item = f64>) -> Self {
        let (mut up, mut down) = (0usize, 0usize);
        for delta in deltas {
            if delta > 0.0 {
                up += 1;
            } else if delta < 0.0 {
                down += 1;
            }
        }
        match up.cmp(&down) {
            std::cmp::Ordering::Greater => Trend::Up,
            std::cmp::Ordering::Less => Trend::Down,
            std::cmp::Ordering::Equal => Trend::Stable,
        }
    }

    pub fn of(chapters: &[Chapter], field: TrendField) -> Self {
        Self::classify(chapters.iter().map(|ch| field.delta(ch)))
    }
}
