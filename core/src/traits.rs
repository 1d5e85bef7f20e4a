use indexmap::IndexMap;

use crate::criteria::{Criteria, SortOrder};
use crate::expr::{Expression, ExpressionFactory};

/// The criteria capability: the four query facets plus merge.
///
/// Implemented by [`Criteria`] itself and by wrappers such as
/// [`PaginableCriteria`](crate::paginate::PaginableCriteria), which forward
/// every operation to an inner criteria. Setters mutate in place and return
/// `&mut Self` for chaining; `merge` never mutates either operand.
pub trait QueryCriteria: AsRef<Criteria> {
    /// Filter expression, if any.
    fn predicate(&self) -> Option<&Expression>;

    /// Set or clear the filter expression.
    fn r#where(&mut self, predicate: Option<Expression>) -> &mut Self;

    /// Ordering map, in insertion order.
    fn ordering(&self) -> &IndexMap<String, SortOrder>;

    /// Replace the whole ordering map. Entries are applied in iteration
    /// order; a repeated field keeps its first position but takes the last
    /// direction.
    fn order_by<K, I>(&mut self, ordering: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SortOrder)>;

    /// Number of leading results to skip.
    fn offset(&self) -> u64;

    fn set_offset(&mut self, offset: u64) -> &mut Self;

    /// Maximum number of results, `None` for unbounded.
    fn limit(&self) -> Option<u64>;

    /// Set or clear the result bound. A zero limit fails with
    /// [`CriteriaError::InvalidArgument`](crate::CriteriaError::InvalidArgument)
    /// and leaves the prior value in place.
    fn set_limit(&mut self, limit: impl Into<Option<u64>>) -> crate::Result<&mut Self>;

    /// Related-entity paths to eager-load, verbatim.
    fn includes(&self) -> &[String];

    /// Replace the includes list.
    fn include<S, I>(&mut self, includes: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>;

    /// Combine with `other` into a new instance. Present/non-empty facets of
    /// `other` win; `offset` always takes `other`'s value.
    fn merge(&self, other: &impl AsRef<Criteria>) -> Self
    where
        Self: Sized;

    /// Entry point to the expression construction vocabulary.
    fn expr() -> ExpressionFactory
    where
        Self: Sized,
    {
        ExpressionFactory::new()
    }
}
