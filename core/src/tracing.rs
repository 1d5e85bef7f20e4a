//! Tracing utilities for criteria merge and pagination observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]`
//! boilerplate at every call site.

/// Emit a debug-level tracing event with the merged window.
///
/// ```ignore
/// criteria_trace_merge!(merged.offset(), merged.limit());
/// ```
#[macro_export]
macro_rules! criteria_trace_merge {
    ($offset:expr, $limit:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(offset = $offset, limit = ?$limit, "criteria.merge");
    };
}

/// Emit a debug-level tracing event for a derived pagination descriptor.
///
/// ```ignore
/// criteria_trace_paginate!(page, page_size);
/// ```
#[macro_export]
macro_rules! criteria_trace_paginate {
    ($page:expr, $page_size:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(page = $page, page_size = $page_size, "criteria.paginate");
    };
}
