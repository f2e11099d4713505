pub mod chapter;
pub mod seed;
pub mod store;
pub mod user;

pub use chapter::{Chapter, ChapterPatch, ChapterStatus, Subject};
pub use store::ChapterStore;
pub use user::{Preferences, PreferencesPatch, Theme, User};
