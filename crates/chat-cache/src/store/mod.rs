//! Entity storage module.
//!
//! Holds the canonical instances handed out to entity builders.

mod model_cache;

pub use model_cache::{CacheStats, ModelCache};
