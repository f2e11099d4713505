use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::catalog::Chapter;

/// Primary collation key: decomposed, accents stripped, lower-cased.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Secondary key: accents kept, case folded.
fn accent_key(name: &str) -> String {
    name.nfd().flat_map(char::to_lowercase).collect()
}

/// Locale-style name ordering: base letters first, then unaccented before
/// accented, then lower case before upper case.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| b.cmp(a))
}

/// Stable sort by chapter name.
pub fn sort_by_name(chapters: &mut [Chapter], ascending: bool) {
    if ascending {
        chapters.sort_by(|a, b| compare_names(&a.name, &b.name));
    } else {
        chapters.sort_by(|a, b| compare_names(&b.name, &a.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Subject, chapter::test_chapter};

    fn names(chapters: &[Chapter]) -> Vec<&str> {
        chapters.iter().map(|ch| ch.name.as_str()).collect()
    }

    #[test]
    fn test_case_insensitive_collation() {
        assert_eq!(compare_names("atom", "Bonding"), Ordering::Less);
        assert_eq!(compare_names("Élan", "Ether"), Ordering::Less);
        assert_eq!(compare_names("motion", "Motion"), Ordering::Less);
        assert_eq!(compare_names("Motion", "motion"), Ordering::Greater);
        assert_eq!(compare_names("Elan", "élan"), Ordering::Less);
        assert_eq!(compare_names("élan", "Élan"), Ordering::Less);
        assert_eq!(compare_names("Motion", "Motion"), Ordering::Equal);
    }

    #[test]
    fn test_desc_is_reverse_of_asc() {
        let input: Vec<Chapter> = ["Waves", "atoms", "Gravitation", "Optics", "electrostatics"]
            .iter()
            .enumerate()
            .map(|(i, name)| test_chapter(&i.to_string(), name, Subject::Physics, 10))
            .collect();
        let mut asc = input.clone();
        sort_by_name(&mut asc, true);
        assert_eq!(
            names(&asc),
            ["atoms", "electrostatics", "Gravitation", "Optics", "Waves"]
        );
        let mut desc = input;
        sort_by_name(&mut desc, false);
        asc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_stable_for_equal_names() {
        let mut chapters = vec![
            test_chapter("first", "Thermodynamics", Subject::Physics, 10),
            test_chapter("a", "Atoms", Subject::Physics, 10),
            test_chapter("second", "Thermodynamics", Subject::Chemistry, 10),
        ];
        sort_by_name(&mut chapters, true);
        let ids: Vec<_> = chapters.iter().map(|ch| ch.id.as_str()).collect();
        assert_eq!(ids, ["a", "first", "second"]);
        sort_by_name(&mut chapters, false);
        let ids: Vec<_> = chapters.iter().map(|ch| ch.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "a"]);
    }
}
