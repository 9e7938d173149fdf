//! Validated class identifiers.
//!
//! A [`ClassId`] maps a user-supplied class name ("5", "Class 5", "5_b") onto
//! a stable storage namespace. Validation happens up front so that storage
//! never sees a dynamically constructed table name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum accepted length of a class identifier, after trimming.
const MAX_LEN: usize = 32;

/// A validated class identifier, held in normalized form.
///
/// Normalization trims, lowercases, and collapses whitespace and underscores
/// into single hyphens, so distinct spellings of the same class share one
/// storage namespace.
///
/// # Examples
///
/// ```
/// use satchel_core::ClassId;
///
/// let id = ClassId::parse("Class 5").unwrap();
/// assert_eq!(id.as_str(), "class-5");
/// assert_eq!(id.namespace(), "class-class-5");
/// assert!(ClassId::parse("5; drop table").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(String);

impl ClassId {
    /// Validate and normalize a raw class value.
    ///
    /// Accepts 1–32 characters of alphanumerics, spaces, hyphens, and
    /// underscores; anything else is rejected with
    /// [`Error::InvalidClassId`].
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_LEN {
            return Err(Error::InvalidClassId {
                value: raw.to_string(),
            });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_')
        {
            return Err(Error::InvalidClassId {
                value: raw.to_string(),
            });
        }
        Ok(Self(normalize(trimmed)))
    }

    /// The normalized identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The storage namespace for this class's records.
    pub fn namespace(&self) -> String {
        format!("class-{}", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize an already-validated identifier to lowercase kebab-case.
fn normalize(id: &str) -> String {
    id.to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!(ClassId::parse("5").unwrap().as_str(), "5");
    }

    #[test]
    fn test_parse_trims_and_lowercases() {
        assert_eq!(ClassId::parse("  Class 5  ").unwrap().as_str(), "class-5");
    }

    #[test]
    fn test_parse_underscores_become_hyphens() {
        assert_eq!(ClassId::parse("class_5_b").unwrap().as_str(), "class-5-b");
    }

    #[test]
    fn test_distinct_spellings_share_namespace() {
        let a = ClassId::parse("Class 5").unwrap();
        let b = ClassId::parse("class_5").unwrap();
        assert_eq!(a.namespace(), b.namespace());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(ClassId::parse("").is_err());
        assert!(ClassId::parse("   ").is_err());
    }

    #[test]
    fn test_parse_rejects_oversized() {
        let long = "c".repeat(MAX_LEN + 1);
        assert!(ClassId::parse(&long).is_err());
    }

    #[test]
    fn test_parse_rejects_punctuation() {
        assert!(ClassId::parse("5/a").is_err());
        assert!(ClassId::parse("../../etc").is_err());
        assert!(ClassId::parse("5;drop").is_err());
    }

    #[test]
    fn test_namespace_prefix() {
        assert_eq!(ClassId::parse("7").unwrap().namespace(), "class-7");
    }
}
