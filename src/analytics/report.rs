use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    summary::{Analytics, SubjectBreakdown},
    trend::{Trend, TrendField},
};
use crate::{catalog::Chapter, error::Error};

/// Reporting window echoed back with the stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Timeframe {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "1y")]
    OneYear,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::SevenDays,
        Timeframe::ThirtyDays,
        Timeframe::NinetyDays,
        Timeframe::OneYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::SevenDays => "7d",
            Timeframe::ThirtyDays => "30d",
            Timeframe::NinetyDays => "90d",
            Timeframe::OneYear => "1y",
        }
    }
}

impl FromStr for Timeframe {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::validation("Invalid timeframe"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_chapters: usize,
    pub completed_chapters: usize,
    pub average_progress: i64,
    pub weak_chapters: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub average_accuracy: i64,
    pub average_speed: i64,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub accuracy_trend: Trend,
    pub speed_trend: Trend,
    pub score_trend: Trend,
}

impl Trends {
    pub fn compute(chapters: &[Chapter]) -> Self {
        Self {
            accuracy_trend: Trend::of(chapters, TrendField::AccuracyChange),
            speed_trend: Trend::of(chapters, TrendField::SpeedChange),
            score_trend: Trend::of(chapters, TrendField::ScoreChange),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatsReport {
    pub overview: Overview,
    pub performance: Performance,
    pub subjects: SubjectBreakdown,
    pub trends: Trends,
    pub timeframe: Timeframe,
}

impl StatsReport {
    pub fn compute(chapters: &[Chapter], timeframe: Timeframe) -> Self {
        let Analytics {
            total_chapters,
            completed_chapters,
            weak_chapters,
            average_accuracy,
            average_speed,
            average_score,
            total_progress,
            subject_breakdown,
            ..
        } = Analytics::compute(chapters, None);
        Self {
            overview: Overview {
                total_chapters,
                completed_chapters,
                average_progress: total_progress,
                weak_chapters,
            },
            performance: Performance {
                average_accuracy,
                average_speed,
                average_score,
            },
            subjects: subject_breakdown,
            trends: Trends::compute(chapters),
            timeframe,
        }
    }
}
