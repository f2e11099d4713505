use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Physics,
    Chemistry,
    Mathematics,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Mathematics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Mathematics => "mathematics",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| Error::validation("Invalid subject"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ChapterStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl ChapterStatus {
    pub const ALL: [ChapterStatus; 3] = [
        ChapterStatus::NotStarted,
        ChapterStatus::InProgress,
        ChapterStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChapterStatus::NotStarted => "Not Started",
            ChapterStatus::InProgress => "In Progress",
            ChapterStatus::Completed => "Completed",
        }
    }

    /// Status implied by a progress percentage.
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            0 => ChapterStatus::NotStarted,
            100.. => ChapterStatus::Completed,
            _ => ChapterStatus::InProgress,
        }
    }
}

impl fmt::Display for ChapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChapterStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChapterStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::validation("Invalid status"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub name: String,
    pub subject: Subject,
    /// Grade label, e.g. "Class 11"
    #[serde(rename = "class")]
    pub class_name: String,
    pub unit: String,
    pub status: ChapterStatus,
    /// Completion percentage, 0..=100
    pub progress: u8,
    pub questions_count: u32,
    pub accuracy: f64,
    pub accuracy_change: f64,
    pub speed: f64,
    pub speed_change: f64,
    /// Score out of 10, one decimal
    pub score: f64,
    pub score_change: f64,
    /// Set by the content team, never derived here
    pub is_weak: bool,
}

/// Partial chapter update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChapterPatch {
    pub status: Option<ChapterStatus>,
    pub progress: Option<i64>,
    pub accuracy: Option<f64>,
    pub accuracy_change: Option<f64>,
    pub speed: Option<f64>,
    pub speed_change: Option<f64>,
    pub score: Option<f64>,
    pub score_change: Option<f64>,
    pub is_weak: Option<bool>,
    pub questions_count: Option<u32>,
}

impl ChapterPatch {
    pub fn progress(progress: i64) -> Self {
        Self {
            progress: Some(progress),
            ..Default::default()
        }
    }

    /// Checked progress value, if one was supplied.
    pub fn checked_progress(&self) -> Result<Option<u8>, Error> {
        match self.progress {
            None => Ok(None),
            Some(p) if (0..=100).contains(&p) => Ok(Some(p as u8)),
            Some(_) => Err(Error::validation("Progress must be between 0 and 100")),
        }
    }
}

impl Chapter {
    /// Merge a patch onto this chapter. When the patch carries a progress but
    /// no status, the status follows the progress; an explicit status is
    /// taken as is.
    pub fn merge(&mut self, patch: ChapterPatch) -> Result<(), Error> {
        let progress = patch.checked_progress()?;
        if let Some(progress) = progress {
            self.progress = progress;
        }
        match (patch.status, progress) {
            (Some(status), _) => self.status = status,
            (None, Some(progress)) => self.status = ChapterStatus::from_progress(progress),
            (None, None) => {}
        }
        if let Some(accuracy) = patch.accuracy {
            self.accuracy = accuracy;
        }
        if let Some(change) = patch.accuracy_change {
            self.accuracy_change = change;
        }
        if let Some(speed) = patch.speed {
            self.speed = speed;
        }
        if let Some(change) = patch.speed_change {
            self.speed_change = change;
        }
        if let Some(score) = patch.score {
            self.score = score;
        }
        if let Some(change) = patch.score_change {
            self.score_change = change;
        }
        if let Some(is_weak) = patch.is_weak {
            self.is_weak = is_weak;
        }
        if let Some(count) = patch.questions_count {
            self.questions_count = count;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_chapter(id: &str, name: &str, subject: Subject, progress: u8) -> Chapter {
    Chapter {
        id: id.to_string(),
        name: name.to_string(),
        subject,
        class_name: "Class 11".to_string(),
        unit: "Mechanics 1".to_string(),
        status: ChapterStatus::from_progress(progress),
        progress,
        questions_count: 20,
        accuracy: 70.0,
        accuracy_change: 0.0,
        speed: 60.0,
        speed_change: 0.0,
        score: 7.0,
        score_change: 0.0,
        is_weak: false,
    }
}
