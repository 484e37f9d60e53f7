//! Input validation run ahead of resolver logic.
//!
//! GraphQL non-null argument types already reject missing required values;
//! what remains is coercing string IDs to row ids and deciding which lookup
//! a list query performs.

use crate::error::{PantryError, Result};

/// Which rows a list query selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    ById(i64),
    ByName(String),
    All,
}

/// Parse an externally supplied identifier into a row id.
pub fn parse_id(id: &str) -> Result<i64> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| PantryError::Validation(format!("Invalid id: '{}'", id)))
}

/// Build the lookup for a list query.
///
/// An empty `id` or `name` is treated as absent. When both are given, `id`
/// wins and `name` is ignored.
pub fn lookup(id: Option<&str>, name: Option<&str>) -> Result<Lookup> {
    match (id.filter(|s| !s.is_empty()), name.filter(|s| !s.is_empty())) {
        (Some(id), _) => Ok(Lookup::ById(parse_id(id)?)),
        (None, Some(name)) => Ok(Lookup::ByName(name.to_string())),
        (None, None) => Ok(Lookup::All),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert_eq!(parse_id(" 12 ").unwrap(), 12);
    }

    #[test]
    fn test_parse_id_rejects_non_numeric() {
        let err = parse_id("abc").unwrap_err();
        assert!(matches!(err, PantryError::Validation(_)));
        assert!(parse_id("").is_err());
    }

    #[test]
    fn test_lookup_id_takes_precedence() {
        assert_eq!(lookup(Some("3"), Some("Dairy")).unwrap(), Lookup::ById(3));
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(
            lookup(None, Some("Dairy")).unwrap(),
            Lookup::ByName("Dairy".to_string())
        );
    }

    #[test]
    fn test_lookup_empty_values_are_absent() {
        assert_eq!(lookup(Some(""), Some("")).unwrap(), Lookup::All);
        assert_eq!(
            lookup(Some(""), Some("Dairy")).unwrap(),
            Lookup::ByName("Dairy".to_string())
        );
        assert_eq!(lookup(None, None).unwrap(), Lookup::All);
    }

    #[test]
    fn test_lookup_bad_id() {
        assert!(lookup(Some("one"), None).is_err());
    }
}
