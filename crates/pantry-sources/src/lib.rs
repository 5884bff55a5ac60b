//! pantry-sources: concrete [`RecordSource`](pantry_core::RecordSource)
//! adapters.
//!
//! - [`HttpSource`]: the recipe REST API over `hyper`.
//! - [`MemorySource`] (feature `mock`): an in-memory source with fault
//!   injection and per-query delays, for tests.

pub mod http;
#[cfg(feature = "mock")]
pub mod memory;

pub use http::HttpSource;
#[cfg(feature = "mock")]
pub use memory::{MemorySource, Operation};
