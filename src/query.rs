pub mod filter;
pub mod search;
pub mod sort;
pub mod view;

pub use filter::ChapterFilter;
pub use search::{SearchHit, relevance, search};
pub use sort::{compare_names, sort_by_name};
pub use view::{Facets, StatusFilter, ViewAction, ViewState};
