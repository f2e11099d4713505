use time::macros::datetime;

use super::{
    chapter::{Chapter, Subject},
    user::{Preferences, Theme, User},
};
use crate::utils::utc_now;

const CHAPTERS_JSON: &str = include_str!("../../data/chapters.json");

pub const DEMO_USER_ID: &str = "user-1";

pub fn chapters() -> anyhow::Result<Vec<Chapter>> {
    parse_chapters(CHAPTERS_JSON)
}

/// Parse a chapter dataset. Ids must be unique and progress within 0..=100.
pub fn parse_chapters(content: &str) -> anyhow::Result<Vec<Chapter>> {
    let chapters: Vec<Chapter> = serde_json::from_str(content)?;
    let mut ids = std::collections::HashSet::new();
    for ch in &chapters {
        if !ids.insert(ch.id.as_str()) {
            anyhow::bail!("duplicate chapter id: {}", ch.id);
        }
        if ch.progress > 100 {
            anyhow::bail!("chapter {} has progress {} > 100", ch.id, ch.progress);
        }
    }
    Ok(chapters)
}

pub fn demo_user() -> User {
    User {
        id: DEMO_USER_ID.to_string(),
        email: "student@mathongo.com".to_string(),
        name: "John Doe".to_string(),
        avatar: "/placeholder.svg?height=40&width=40".to_string(),
        preferences: Preferences {
            theme: Theme::System,
            notifications: true,
            default_subject: Subject::Physics,
        },
        created_at: datetime!(2024-01-01 0:00 UTC),
        last_login: utc_now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::chapter::ChapterStatus;

    #[test]
    fn test_builtin_dataset_is_consistent() {
        let chapters = chapters().unwrap();
        for ch in &chapters {
            assert_eq!(ch.status, ChapterStatus::from_progress(ch.progress), "{}", ch.id);
            assert!((0.0..=10.0).contains(&ch.score), "{}", ch.id);
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let one = serde_json::to_value(crate::catalog::chapter::test_chapter(
            "x",
            "Sets",
            Subject::Mathematics,
            0,
        ))
        .unwrap();
        let content = serde_json::to_string(&vec![one.clone(), one]).unwrap();
        assert!(parse_chapters(&content).is_err());
    }
}
