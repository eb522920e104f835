//! The free-text person filter: case-insensitive substring match over five
//! columns, combined with OR.

use crate::domain::model::PersonRecord;

/// Columns searched by a text query, in the order they are OR-ed together.
pub const SEARCHABLE_FIELDS: [&str; 5] = ["name", "address", "phone_number", "email", "nid_number"];

/// Escape character used in the `ILIKE ... ESCAPE` clause.
pub const LIKE_ESCAPE: char = '\\';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFilter {
    term: String,
}

impl PersonFilter {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// `%term%` with LIKE metacharacters escaped, so the term is always a
    /// literal substring.
    pub fn like_pattern(&self) -> String {
        format!("%{}%", escape_like(&self.term))
    }

    /// In-process evaluation with the same semantics as the SQL filter.
    /// Absent (NULL) fields never match, empty strings do.
    pub fn matches(&self, record: &PersonRecord) -> bool {
        let needle = self.term.to_lowercase();
        searchable_values(record)
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(&needle))
    }
}

fn searchable_values(record: &PersonRecord) -> [Option<&str>; 5] {
    [
        Some(record.name.as_str()),
        record.address.as_deref(),
        record.phone_number.as_deref(),
        record.email.as_deref(),
        record.nid_number.as_deref(),
    ]
}

pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::NewPerson;

    fn alice() -> PersonRecord {
        NewPerson {
            name: "Alice".to_string(),
            address: Some(String::new()),
            phone_number: Some("555-1111".to_string()),
            email: None,
            social_media: Some("@ali_wonder".to_string()),
            nid_number: None,
        }
        .into_record(None)
    }

    #[test]
    fn escapes_metacharacters() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(PersonFilter::new("ab").like_pattern(), "%ab%");
    }

    #[test]
    fn matches_case_insensitive_substrings() {
        let r = alice();
        assert!(PersonFilter::new("ALI").matches(&r));
        assert!(PersonFilter::new("55-11").matches(&r));
        assert!(!PersonFilter::new("999").matches(&r));
    }

    #[test]
    fn social_media_is_not_searched() {
        assert!(!PersonFilter::new("wonder").matches(&alice()));
    }

    #[test]
    fn empty_term_matches_any_present_field() {
        assert!(PersonFilter::new("").matches(&alice()));
    }

    #[test]
    fn wildcards_are_literal() {
        let r = alice();
        assert!(!PersonFilter::new("%").matches(&r));
        assert!(!PersonFilter::new("A_ice").matches(&r));
    }
}
