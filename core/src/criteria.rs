//! The [`Criteria`] value object: filter, ordering, pagination window and
//! eager-load includes, accumulated through fluent setters and combined
//! through an immutable merge.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CriteriaError;
use crate::expr::Expression;
use crate::traits::QueryCriteria;

/// Sort direction of one ordering entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Flip the direction.
    pub const fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Accepts the classic numeric encoding: 4 for ascending, 3 for descending.
impl TryFrom<i32> for SortOrder {
    type Error = CriteriaError;

    fn try_from(value: i32) -> crate::Result<Self> {
        match value {
            4 => Ok(SortOrder::Asc),
            3 => Ok(SortOrder::Desc),
            other => Err(CriteriaError::InvalidArgument(format!(
                "unknown sort direction {other}, expected 4 (asc) or 3 (desc)"
            ))),
        }
    }
}

impl FromStr for SortOrder {
    type Err = CriteriaError;

    fn from_str(s: &str) -> crate::Result<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(CriteriaError::InvalidArgument(format!(
                "unknown sort direction {s:?}, expected \"asc\" or \"desc\""
            )))
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query criteria: filter predicate, ordering, offset/limit window and
/// related-entity includes.
///
/// ```
/// use criteria_core::prelude::*;
///
/// let expr = Criteria::expr();
/// let mut criteria = Criteria::new();
/// criteria
///     .r#where(Some(expr.property("status", expr.equals("published"))?))
///     .order_by([("created_at", SortOrder::Desc)])
///     .set_offset(20)
///     .set_limit(10)?
///     .include(["author"]);
///
/// assert_eq!(criteria.limit(), Some(10));
/// # Ok::<(), criteria_core::CriteriaError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    predicate: Option<Expression>,
    ordering: IndexMap<String, SortOrder>,
    offset: u64,
    limit: Option<u64>,
    includes: Vec<String>,
}

impl Criteria {
    /// An empty criteria: no filter, no ordering, offset 0, unbounded, no
    /// includes.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AsRef<Criteria> for Criteria {
    fn as_ref(&self) -> &Criteria {
        self
    }
}

impl QueryCriteria for Criteria {
    fn predicate(&self) -> Option<&Expression> {
        self.predicate.as_ref()
    }

    fn r#where(&mut self, predicate: Option<Expression>) -> &mut Self {
        self.predicate = predicate;
        self
    }

    fn ordering(&self) -> &IndexMap<String, SortOrder> {
        &self.ordering
    }

    fn order_by<K, I>(&mut self, ordering: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SortOrder)>,
    {
        self.ordering = ordering
            .into_iter()
            .map(|(field, order)| (field.into(), order))
            .collect();
        self
    }

    fn offset(&self) -> u64 {
        self.offset
    }

    fn set_offset(&mut self, offset: u64) -> &mut Self {
        self.offset = offset;
        self
    }

    fn limit(&self) -> Option<u64> {
        self.limit
    }

    fn set_limit(&mut self, limit: impl Into<Option<u64>>) -> crate::Result<&mut Self> {
        match limit.into() {
            Some(0) => Err(CriteriaError::InvalidArgument(
                "limit must be positive, use None for unbounded".to_string(),
            )),
            limit => {
                self.limit = limit;
                Ok(self)
            }
        }
    }

    fn includes(&self) -> &[String] {
        &self.includes
    }

    fn include<S, I>(&mut self, includes: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    fn merge(&self, other: &impl AsRef<Criteria>) -> Criteria {
        let other = other.as_ref();
        let merged = Criteria {
            predicate: other.predicate.clone().or_else(|| self.predicate.clone()),
            ordering: if other.ordering.is_empty() {
                self.ordering.clone()
            } else {
                other.ordering.clone()
            },
            // offset has no absent state, the right-hand side always wins
            offset: other.offset,
            limit: other.limit.or(self.limit),
            includes: if other.includes.is_empty() {
                self.includes.clone()
            } else {
                other.includes.clone()
            },
        };
        crate::criteria_trace_merge!(merged.offset, merged.limit);
        merged
    }
}
