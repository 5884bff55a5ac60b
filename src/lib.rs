//! pantry: recipe catalog browser
//!
//! Re-exports the member crates so integration tests and benches can import
//! everything from one place, plus the [`cli`] front end used by the binary.
//!
//! # Architecture
//!
//! ```text
//! pantry-sources (HttpSource | MemorySource)
//!        │ RecordSource
//!        ▼
//! pantry-core::SourceOrchestrator ──► filter / suggest ──► FavoriteOverlay ──► CatalogView
//!        ▲
//!        └── cli (clap) ── pantry binary
//! ```

pub mod cli;

pub use pantry_core;
pub use pantry_sources;
