//! # chat-core
//!
//! Payload-to-entity marshalling for the chat platform client.
//!
//! Remote endpoints return loosely typed JSON objects. This crate turns them
//! into typed, immutable entities: scalar fields go through the safe field
//! extractor in [`marshal`], nested guilds, channels and users are resolved
//! through a [`ResolutionContext`] that owns their canonical instances.
//! No I/O happens here.

pub mod entities;
pub mod error;
pub mod marshal;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{ChannelType, Guild, GuildChannel, Invite, InviteMetadata, User};
pub use error::{CastError, MarshalError, MarshalResult};
pub use marshal::{parse_payload, Payload};
pub use traits::{ContextHandle, ContextSource, ResolutionContext};
pub use value_objects::{Snowflake, SnowflakeParseError};
