//! Browsing controllers for the episodes dataset.
//!
//! - [`PaginationController`] drives the paginated episode list.
//! - [`DetailAggregator`] loads one episode with its characters and
//!   locations.
//!
//! Both keep view-local state behind a mutex and gate every response on
//! a [`RequestToken`]: when a newer request is issued before an older
//! one resolves, the older result is dropped without touching state.
//! Failures are reported to the caller and published as notices; they
//! never escape as panics.

pub mod detail;
pub mod error;
pub mod pagination;
pub mod request;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

pub use detail::{DetailAggregator, DetailState};
pub use error::{BrowseError, LoadOutcome};
pub use pagination::{ListState, PaginationController};
pub use request::{RequestToken, RequestTracker};
