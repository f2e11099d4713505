use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{Chapter, Subject};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    pub chapter: Chapter,
    pub relevance_score: f64,
}

/// Relevance of a chapter name for a query, 0..=100.
///
/// Exact match (ignoring case) scores 100, a prefix 80, a substring 60.
/// Otherwise it is 40 times the share of query words found inside some
/// word of the name.
pub fn relevance(name: &str, query: &str) -> f64 {
    let name = name.to_lowercase();
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0.0;
    }
    if name == query {
        return 100.0;
    }
    if name.starts_with(&query) {
        return 80.0;
    }
    if name.contains(&query) {
        return 60.0;
    }
    let name_words: Vec<&str> = name.split_whitespace().collect();
    let query_words: Vec<&str> = query.split_whitespace().collect();
    let matched = query_words
        .iter()
        .filter(|q| name_words.iter().any(|w| w.contains(**q)))
        .count();
    matched as f64 / query_words.len() as f64 * 40.0
}

/// Rank chapters by relevance, best first. Chapters scoring zero are
/// dropped and ties keep their original order. A blank query finds nothing.
pub fn search(chapters: &[Chapter], query: &str, subject: Option<Subject>) -> Vec<SearchHit> {
    if query.trim().is_empty() {
        return vec![];
    }
    let mut hits: Vec<SearchHit> = chapters
        .iter()
        .filter(|ch| subject.is_none_or(|s| s == ch.subject))
        .filter_map(|ch| {
            let score = relevance(&ch.name, query);
            (score > 0.0).then(|| SearchHit {
                chapter: ch.clone(),
                relevance_score: score,
            })
        })
        .collect();
    hits.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    hits
}
