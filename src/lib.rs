//! Geocache Verify - A geocache verification server
//!
//! Users answer a quiz question tied to a cache; each correct answer is recorded
//! and folds the user's id into the cache's rolling accumulator.

pub mod api;
pub mod config;
pub mod error;
pub mod hash;
pub mod models;
pub mod seed;
pub mod store;
pub mod workflow;

pub use api::AppState;
pub use config::Config;
pub use hash::{combine, Accumulator};
