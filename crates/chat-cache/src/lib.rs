//! # chat-cache
//!
//! In-memory model cache acting as the resolution context for entity builders.
//!
//! ## Features
//!
//! - **Canonical entities**: one shared `Arc` per guild, channel and user ID
//! - **Policies**: keep the first instance seen, or replace it on every payload
//! - **Concurrency**: sharded maps, safe to resolve from many threads
//!
//! ## Example
//!
//! ```ignore
//! use chat_cache::ModelCache;
//!
//! let cache = ModelCache::bootstrap()?;
//! let invite = cache.parse_invite(body)?;
//! let guild = cache.guild(invite.guild().id);
//! ```

pub mod store;

pub use store::{CacheStats, ModelCache};
