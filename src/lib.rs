//! # Criteria for Rust
//!
//! Mergeable query criteria: a filter expression, an ordering map, an
//! offset/limit window and an eager-load list, accumulated fluently and
//! combined with an immutable `merge`. A pagination adapter bridges the
//! offset/limit window to a page-oriented paginator.
//!
//! ## Quick Start
//!
//! ```rust
//! use criteria::prelude::*;
//!
//! # fn main() -> criteria::Result<()> {
//! let expr = Criteria::expr();
//!
//! let mut criteria = Criteria::new();
//! criteria
//!     .r#where(Some(expr.property("status", expr.equals("published"))?))
//!     .order_by([("created_at", SortOrder::Desc)])
//!     .set_limit(10)?
//!     .set_offset(20)
//!     .include(["author"]);
//!
//! // A second criteria overrides only what it carries.
//! let mut overrides = Criteria::new();
//! overrides.set_limit(25)?;
//! let merged = criteria.merge(&overrides);
//! assert_eq!(merged.limit(), Some(25));
//! assert_eq!(merged.ordering().get_index(0).map(|(field, _)| field.as_str()),
//!            Some("created_at"));
//!
//! // Page-oriented view of the window.
//! let paginator = PaginableCriteria::from(merged).paginator();
//! assert_eq!(paginator.page(), 1);
//! assert_eq!(paginator.page_size(), Some(25));
//! # Ok(())
//! # }
//! ```

pub use criteria_core::*;

/// Commonly used types and traits
pub mod prelude {
    pub use criteria_core::prelude::*;
}
