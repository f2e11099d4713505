pub mod analytics;
pub mod chapters;
pub mod response;
pub mod search;
pub mod user;

use std::str::FromStr;

use utoipa::OpenApi;

use crate::error::Error;

/// Parse an optional query value into one of the enums of the data model.
/// A missing or empty value means "no constraint".
pub(crate) fn parse_optional<T>(value: Option<String>) -> Result<Option<T>, Error>
where
    T: FromStr<Err = Error>,
{
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

pub(crate) fn parse_bool(field: &str, value: Option<String>) -> Result<Option<bool>, Error> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(_) => Err(Error::validation(format!("Invalid {field} value"))),
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "chapter dashboard", version = "0.1.0"),
    paths(
        chapters::list_chapters,
        chapters::get_chapter,
        chapters::update_chapter,
        chapters::update_progress,
        chapters::get_facets,
        search::search_chapters,
        analytics::dashboard,
        analytics::subject_analytics,
        analytics::stats,
        user::profile,
        user::update_preferences,
    )
)]
pub struct ApiDoc;

pub fn get_openapi_json() -> anyhow::Result<String> {
    Ok(ApiDoc::openapi().to_pretty_json()?)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Subject;

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional::<Subject>(None).unwrap(), None);
        assert_eq!(parse_optional::<Subject>(Some(String::new())).unwrap(), None);
        assert_eq!(
            parse_optional::<Subject>(Some("chemistry".to_string())).unwrap(),
            Some(Subject::Chemistry)
        );
        assert!(parse_optional::<Subject>(Some("biology".to_string())).is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("isWeak", None).unwrap(), None);
        assert_eq!(parse_bool("isWeak", Some("true".into())).unwrap(), Some(true));
        assert_eq!(parse_bool("isWeak", Some("false".into())).unwrap(), Some(false));
        let err = parse_bool("isWeak", Some("yes".into())).unwrap_err();
        assert_eq!(err.to_string(), "Invalid isWeak value");
    }

    #[test]
    fn test_openapi_lists_routes() {
        let json = get_openapi_json().unwrap();
        assert!(json.contains("/api/chapters/{id}/progress"));
        assert!(json.contains("/api/analytics/subject/{subject}"));
    }
}
