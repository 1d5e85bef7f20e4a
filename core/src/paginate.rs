//! Page-oriented view of a criteria's offset/limit window.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::criteria::{Criteria, SortOrder};
use crate::expr::Expression;
use crate::traits::QueryCriteria;

/// A pagination descriptor: page size and 1-based page index.
///
/// The default descriptor means "no pagination constraint": unbounded,
/// page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator {
    page_size: Option<u64>,
    page: u64,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: None,
            page: 1,
        }
    }
}

impl Paginator {
    /// A paginator with the given page size, positioned on page 1. A zero
    /// page size means unbounded.
    pub fn new(page_size: u64) -> Self {
        Self {
            page_size: (page_size > 0).then_some(page_size),
            page: 1,
        }
    }

    /// Move to the given 1-based page. Page 0 clamps to 1.
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> Option<u64> {
        self.page_size
    }

    /// The offset of this page's first row; 0 when unbounded.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size.unwrap_or(0)
    }
}

/// A [`Criteria`] wrapper that can derive a [`Paginator`] from the
/// offset/limit window.
///
/// Every [`QueryCriteria`] operation forwards to the wrapped criteria;
/// `merge` rewraps the merged criteria in a new adapter.
///
/// ```
/// use criteria_core::prelude::*;
///
/// let mut criteria = PaginableCriteria::new();
/// criteria.set_limit(10)?.set_offset(25);
///
/// let paginator = criteria.paginator();
/// assert_eq!(paginator.page_size(), Some(10));
/// assert_eq!(paginator.page(), 3);
/// # Ok::<(), criteria_core::CriteriaError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaginableCriteria {
    criteria: Criteria,
}

impl PaginableCriteria {
    /// Wrap an empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the wrapped criteria.
    pub fn export(&self) -> &Criteria {
        &self.criteria
    }

    /// Unwrap into the inner criteria.
    pub fn into_inner(self) -> Criteria {
        self.criteria
    }

    /// Derive the pagination descriptor for the current window.
    ///
    /// With a limit set, the page is `offset / limit + 1` (integer
    /// division): an offset that is not an exact multiple of the limit
    /// rounds down to the page containing it. Without a limit the default
    /// descriptor is returned.
    pub fn paginator(&self) -> Paginator {
        match self.criteria.limit() {
            Some(limit) if limit > 0 => {
                let page = self.criteria.offset() / limit + 1;
                crate::criteria_trace_paginate!(page, limit);
                Paginator::new(limit).with_page(page)
            }
            _ => Paginator::default(),
        }
    }
}

impl From<Criteria> for PaginableCriteria {
    fn from(criteria: Criteria) -> Self {
        Self { criteria }
    }
}

impl AsRef<Criteria> for PaginableCriteria {
    fn as_ref(&self) -> &Criteria {
        &self.criteria
    }
}

impl QueryCriteria for PaginableCriteria {
    fn predicate(&self) -> Option<&Expression> {
        self.criteria.predicate()
    }

    fn r#where(&mut self, predicate: Option<Expression>) -> &mut Self {
        self.criteria.r#where(predicate);
        self
    }

    fn ordering(&self) -> &IndexMap<String, SortOrder> {
        self.criteria.ordering()
    }

    fn order_by<K, I>(&mut self, ordering: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SortOrder)>,
    {
        self.criteria.order_by(ordering);
        self
    }

    fn offset(&self) -> u64 {
        self.criteria.offset()
    }

    fn set_offset(&mut self, offset: u64) -> &mut Self {
        self.criteria.set_offset(offset);
        self
    }

    fn limit(&self) -> Option<u64> {
        self.criteria.limit()
    }

    fn set_limit(&mut self, limit: impl Into<Option<u64>>) -> crate::Result<&mut Self> {
        self.criteria.set_limit(limit)?;
        Ok(self)
    }

    fn includes(&self) -> &[String] {
        self.criteria.includes()
    }

    fn include<S, I>(&mut self, includes: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.criteria.include(includes);
        self
    }

    fn merge(&self, other: &impl AsRef<Criteria>) -> PaginableCriteria {
        PaginableCriteria {
            criteria: self.criteria.merge(other),
        }
    }
}
