use std::path::Path;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{info, warn};

use super::{
    chapter::{Chapter, ChapterPatch, Subject},
    seed,
    user::{PreferencesPatch, User},
};
use crate::{
    analytics::Analytics,
    error::{Error, Result},
    query::ChapterFilter,
};

/// In-memory chapter and user collections shared by all request handlers.
///
/// Reads hand out clones, so callers never alias stored records. Chapter
/// updates take the write lock, which serializes concurrent updates.
#[derive(Debug, Default)]
pub struct ChapterStore {
    chapters: RwLock<Vec<Chapter>>,
    users: DashMap<String, User>,
}

impl ChapterStore {
    pub fn new(chapters: Vec<Chapter>, users: Vec<User>) -> Self {
        Self {
            chapters: RwLock::new(chapters),
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }

    /// store with the built-in dataset and the demo user
    pub fn seeded() -> anyhow::Result<Self> {
        let chapters = seed::chapters()?;
        info!("seeded {} chapters", chapters.len());
        Ok(Self::new(chapters, vec![seed::demo_user()]))
    }

    /// store with chapters read from a JSON dataset file and the demo user
    pub fn from_dataset(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read dataset {} failed: {}", path.display(), e))?;
        let chapters = seed::parse_chapters(&content)?;
        info!("loaded {} chapters from {}", chapters.len(), path.display());
        Ok(Self::new(chapters, vec![seed::demo_user()]))
    }

    pub fn list_chapters(&self, filter: Option<&ChapterFilter>) -> Vec<Chapter> {
        let chapters = self.chapters.read();
        match filter {
            Some(filter) => filter.apply(&chapters),
            None => chapters.clone(),
        }
    }

    pub fn get_chapter_by_id(&self, id: &str) -> Option<Chapter> {
        self.chapters.read().iter().find(|ch| ch.id == id).cloned()
    }

    pub fn update_chapter_progress(&self, id: &str, patch: ChapterPatch) -> Result<Chapter> {
        patch.checked_progress()?;
        let mut chapters = self.chapters.write();
        let Some(chapter) = chapters.iter_mut().find(|ch| ch.id == id) else {
            warn!("update of unknown chapter {id}");
            return Err(Error::not_found("Chapter not found"));
        };
        chapter.merge(patch)?;
        info!(
            "chapter {} updated: progress {}, status {}",
            chapter.id, chapter.progress, chapter.status
        );
        Ok(chapter.clone())
    }

    pub fn get_user_by_id(&self, id: &str) -> Option<User> {
        self.users.get(id).map(|u| u.value().clone())
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone())
    }

    pub fn update_user_preferences(&self, user_id: &str, patch: PreferencesPatch) -> Option<User> {
        let mut user = self.users.get_mut(user_id)?;
        user.preferences.merge(patch);
        info!("preferences of user {} updated", user_id);
        Some(user.value().clone())
    }

    pub fn get_analytics(&self, subject: Option<Subject>) -> Analytics {
        Analytics::compute(&self.chapters.read(), subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        chapter::{ChapterStatus, test_chapter},
        user::Theme,
    };

    fn store() -> ChapterStore {
        ChapterStore::new(
            vec![
                test_chapter("p1", "Units and Dimensions", Subject::Physics, 0),
                test_chapter("p2", "Motion in One Dimension", Subject::Physics, 50),
                test_chapter("c1", "Mole Concept", Subject::Chemistry, 100),
            ],
            vec![seed::demo_user()],
        )
    }

    #[test]
    fn test_list_returns_independent_copies() {
        let store = store();
        let mut all = store.list_chapters(None);
        assert_eq!(all.len(), 3);
        all[0].name = "changed".to_string();
        assert_eq!(
            store.get_chapter_by_id("p1").unwrap().name,
            "Units and Dimensions"
        );
    }

    #[test]
    fn test_list_with_filter() {
        let store = store();
        let filter = ChapterFilter {
            subject: Some(Subject::Physics),
            ..Default::default()
        };
        let physics = store.list_chapters(Some(&filter));
        assert_eq!(physics.len(), 2);
        assert!(physics.iter().all(|ch| ch.subject == Subject::Physics));
    }

    #[test]
    fn test_update_progress_infers_status() {
        let store = store();
        for (progress, status) in [
            (0, ChapterStatus::NotStarted),
            (100, ChapterStatus::Completed),
            (50, ChapterStatus::InProgress),
        ] {
            let ch = store
                .update_chapter_progress("p1", ChapterPatch::progress(progress))
                .unwrap();
            assert_eq!(ch.status, status);
            assert_eq!(store.get_chapter_by_id("p1").unwrap().status, status);
        }
    }

    #[test]
    fn test_update_rejects_out_of_range_without_mutation() {
        let store = store();
        let before = store.get_chapter_by_id("p2").unwrap();
        let err = store
            .update_chapter_progress("p2", ChapterPatch::progress(150))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(store.get_chapter_by_id("p2").unwrap(), before);
    }

    #[test]
    fn test_update_unknown_chapter() {
        let store = store();
        let err = store
            .update_chapter_progress("nope", ChapterPatch::progress(10))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_user_lookup_and_preferences() {
        let store = store();
        assert!(store.get_user_by_id("user-1").is_some());
        assert!(store.get_user_by_id("user-2").is_none());
        assert_eq!(
            store.get_user_by_email("student@mathongo.com").unwrap().id,
            "user-1"
        );
        assert!(store.get_user_by_email("nobody@example.com").is_none());

        let user = store
            .update_user_preferences(
                "user-1",
                PreferencesPatch {
                    theme: Some(Theme::Dark),
                    notifications: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(user.preferences.theme, Theme::Dark);
        assert!(!user.preferences.notifications);
        assert_eq!(user.preferences.default_subject, Subject::Physics);
        assert!(
            store
                .update_user_preferences("user-2", PreferencesPatch::default())
                .is_none()
        );
    }

    #[test]
    fn test_end_to_end_analytics() {
        let store = store();
        let analytics = store.get_analytics(None);
        assert_eq!(analytics.total_chapters, 3);
        assert_eq!(analytics.completed_chapters, 1);
        assert_eq!(analytics.not_started_chapters, 1);
        assert_eq!(analytics.in_progress_chapters, 1);
        assert_eq!(analytics.subject_breakdown.physics.total, 2);
    }

    #[test]
    fn test_seeded_store() {
        let store = ChapterStore::seeded().unwrap();
        let chapters = store.list_chapters(None);
        assert!(!chapters.is_empty());
        for subject in Subject::ALL {
            assert!(chapters.iter().any(|ch| ch.subject == subject));
        }
    }

    #[test]
    fn test_from_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chapters.json");
        let chapters = vec![test_chapter("m1", "Sets", Subject::Mathematics, 30)];
        std::fs::write(&path, serde_json::to_string(&chapters).unwrap()).unwrap();
        let store = ChapterStore::from_dataset(&path).unwrap();
        assert_eq!(store.list_chapters(None), chapters);
        assert!(ChapterStore::from_dataset(dir.path().join("missing.json")).is_err());
    }
}
