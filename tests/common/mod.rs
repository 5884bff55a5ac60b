//! Shared test utilities for pantry integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Orchestrator helpers are deterministic under
//! `#[tokio::test(start_paused = true)]`.

pub mod assertions;
pub mod builders;
pub mod fake_recipe_api;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
