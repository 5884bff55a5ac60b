//! pantry-core: recipe catalog browser core library.
//!
//! This crate holds the data model, the two pure engines, the favorite
//! overlay, the record store and the orchestrator that ties them to a
//! [`RecordSource`](source::RecordSource).
//!
//! # Architecture
//!
//! ```text
//! RecordSource ──► SourceOrchestrator ──► RecordStore ──► FavoriteOverlay ──► CatalogView
//!   (remote)            │     ▲                 │
//!                       │     └── local dataset ┘
//!                       ├──► filter   (FilterEngine)
//!                       └──► suggest  (SuggestionEngine)
//! ```
//!
//! `filter` and `suggest` are pure and usable on their own. Everything
//! stateful is owned by the orchestrator, which publishes its state through a
//! `tokio::sync::watch` channel.

pub mod config;
pub mod dataset;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod mode;
pub mod orchestrator;
pub mod source;
pub mod stats;
pub mod store;
pub mod suggest;
pub mod types;
pub mod vocabulary;
pub mod wire;

pub use error::{CatalogError, SourceError};
pub use mode::{Connectivity, SourceMode};
pub use orchestrator::{CatalogView, Mutation, Resolution, Settings, SourceOrchestrator};
pub use source::{RecordSource, SourceHandle};
pub use types::{Category, Difficulty, FilterCriteria, Recipe, RecipeDraft, RecipePatch, RecordId};
