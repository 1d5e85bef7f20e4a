//! Property paths: dotted/bracketed access into a `serde_json::Value`.
//!
//! A path like `author.name` or `books[0].title` is parsed once into
//! segments and then resolved against arbitrary subjects. Resolution never
//! fails hard: an unreachable segment yields `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CriteriaError;

/// One step of a [`PropertyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key, written bare: `author`
    Key(String),
    /// Array index, written in brackets: `[0]`
    Index(usize),
}

/// Parsed property path.
///
/// ```
/// use criteria_core::expr::PropertyPath;
/// use serde_json::json;
///
/// let path: PropertyPath = "books[0].title".parse()?;
/// let subject = json!({"books": [{"title": "Dune"}]});
/// assert_eq!(path.resolve(&subject), Some(&json!("Dune")));
/// # Ok::<(), criteria_core::CriteriaError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    /// Parse a dotted/bracketed path string.
    pub fn parse(path: &str) -> crate::Result<Self> {
        path.parse()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Resolve this path against a subject.
    ///
    /// Returns `None` as soon as any segment is unreachable. A numeric key
    /// indexes into arrays and a bracketed index reads string-keyed objects,
    /// so `items.0` and `items[0]` are interchangeable on both shapes.
    pub fn resolve<'a>(&self, subject: &'a Value) -> Option<&'a Value> {
        let mut current = subject;
        for segment in &self.segments {
            current = match segment {
                PathSegment::Key(key) => match current {
                    Value::Object(map) => map.get(key)?,
                    Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
                    _ => return None,
                },
                PathSegment::Index(index) => match current {
                    Value::Array(items) => items.get(*index)?,
                    Value::Object(map) => map.get(&index.to_string())?,
                    _ => return None,
                },
            };
        }
        Some(current)
    }
}

impl FromStr for PropertyPath {
    type Err = CriteriaError;

    fn from_str(path: &str) -> crate::Result<Self> {
        let invalid = |detail: &str| {
            CriteriaError::InvalidArgument(format!("property path {path:?}: {detail}"))
        };

        if path.is_empty() {
            return Err(invalid("path must not be empty"));
        }

        let mut segments = Vec::new();
        let mut rest = path;
        loop {
            if let Some(bracketed) = rest.strip_prefix('[') {
                let end = bracketed
                    .find(']')
                    .ok_or_else(|| invalid("unterminated index bracket"))?;
                let index = bracketed[..end]
                    .parse::<usize>()
                    .map_err(|_| invalid("index must be a non-negative integer"))?;
                segments.push(PathSegment::Index(index));
                rest = &bracketed[end + 1..];
            } else {
                let end = rest.find(['.', '[']).unwrap_or(rest.len());
                if end == 0 {
                    return Err(invalid("empty key segment"));
                }
                segments.push(PathSegment::Key(rest[..end].to_string()));
                rest = &rest[end..];
            }

            match rest.chars().next() {
                None => break,
                Some('.') => {
                    rest = &rest[1..];
                    if rest.is_empty() {
                        return Err(invalid("trailing dot"));
                    }
                }
                Some('[') => {}
                Some(_) => return Err(invalid("expected '.' or '[' after index")),
            }
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{key}")?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// Paths travel on the wire in their string form.
impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_keys_and_indexes() {
        let path: PropertyPath = "a.b[2].c".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("a".into()),
                PathSegment::Key("b".into()),
                PathSegment::Index(2),
                PathSegment::Key("c".into()),
            ]
        );
        assert_eq!(path.to_string(), "a.b[2].c");
    }

    #[test]
    fn parses_leading_index() {
        let path: PropertyPath = "[1].name".parse().unwrap();
        assert_eq!(path.to_string(), "[1].name");
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["", "a..b", "a.", "a[b]", "a[", "a[1]x", ".a"] {
            assert!(bad.parse::<PropertyPath>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn resolves_nested_values() {
        let subject = json!({"author": {"books": [{"title": "Dune"}]}});
        let path: PropertyPath = "author.books[0].title".parse().unwrap();
        assert_eq!(path.resolve(&subject), Some(&json!("Dune")));

        let missing: PropertyPath = "author.books[3].title".parse().unwrap();
        assert_eq!(missing.resolve(&subject), None);
    }

    #[test]
    fn numeric_key_indexes_arrays() {
        let subject = json!({"items": ["a", "b"]});
        let path: PropertyPath = "items.1".parse().unwrap();
        assert_eq!(path.resolve(&subject), Some(&json!("b")));
    }
}
