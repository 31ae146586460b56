//! Model cache - canonical guilds, channels and users keyed by snowflake.
//!
//! Every sub-payload is built in full before the cache is consulted, so a
//! malformed payload fails the same way regardless of what is cached.
//! Cached entities are never modified; a refresh swaps in a new `Arc` and
//! records built earlier keep the instance they were given.

use std::sync::Arc;

use chat_common::{
    try_init_tracing_with_config, AppConfig, AppResult, CacheConfig, CachePolicy, TracingConfig,
};
use chat_core::marshal::casters::to_snowflake;
use chat_core::marshal::{parse_payload, require};
use chat_core::{
    Guild, GuildChannel, Invite, InviteMetadata, MarshalError, MarshalResult, Payload,
    ResolutionContext, Snowflake, User,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info, trace};

/// Entity counts held by a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub guilds: usize,
    pub channels: usize,
    pub users: usize,
}

/// In-memory resolution context
#[derive(Debug, Default)]
pub struct ModelCache {
    policy: CachePolicy,
    guilds: DashMap<Snowflake, Arc<Guild>>,
    channels: DashMap<Snowflake, Arc<GuildChannel>>,
    users: DashMap<Snowflake, Arc<User>>,
}

impl ModelCache {
    /// Create an empty cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            policy: config.policy,
            ..Self::default()
        }
    }

    /// Load configuration from the environment, install tracing, and create a cache
    ///
    /// # Errors
    /// Returns an error if the environment holds an invalid setting
    pub fn bootstrap() -> AppResult<Arc<Self>> {
        let config = AppConfig::from_env()?;

        if try_init_tracing_with_config(TracingConfig::from(&config)).is_err() {
            debug!("Tracing subscriber already installed, keeping it");
        }

        info!(app = %config.app.name, policy = ?config.cache.policy, "Model cache ready");
        Ok(Arc::new(Self::new(config.cache)))
    }

    /// The policy applied to entities seen more than once
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Look up a cached guild
    pub fn guild(&self, id: Snowflake) -> Option<Arc<Guild>> {
        self.guilds.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Look up a cached channel
    pub fn channel(&self, id: Snowflake) -> Option<Arc<GuildChannel>> {
        self.channels.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Look up a cached user
    pub fn user(&self, id: Snowflake) -> Option<Arc<User>> {
        self.users.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Count cached entities
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            guilds: self.guilds.len(),
            channels: self.channels.len(),
            users: self.users.len(),
        }
    }

    /// Decode an invite object from JSON text and build it against this cache
    pub fn parse_invite(self: &Arc<Self>, text: &str) -> MarshalResult<Invite> {
        Invite::build(self, &parse_payload(text)?)
    }

    /// Decode an invite metadata object from JSON text and build it against this cache
    pub fn parse_invite_metadata(self: &Arc<Self>, text: &str) -> MarshalResult<InviteMetadata> {
        InviteMetadata::build(self, &parse_payload(text)?)
    }

    fn resolve<T, F>(
        &self,
        map: &DashMap<Snowflake, Arc<T>>,
        kind: &'static str,
        payload: Option<&Payload>,
        build: F,
    ) -> MarshalResult<Arc<T>>
    where
        F: FnOnce(&Payload) -> MarshalResult<T>,
    {
        let payload =
            payload.ok_or_else(|| MarshalError::resolution(kind, "sub-payload is absent"))?;
        let id = require(payload, "id", to_snowflake)?;
        let built = Arc::new(build(payload)?);

        match self.policy {
            CachePolicy::PreferCached => match map.entry(id) {
                Entry::Occupied(entry) => {
                    trace!(kind, %id, "Resolved from cache");
                    Ok(Arc::clone(entry.get()))
                }
                Entry::Vacant(entry) => {
                    entry.insert(Arc::clone(&built));
                    Ok(built)
                }
            },
            CachePolicy::Refresh => {
                if map.insert(id, Arc::clone(&built)).is_some() {
                    trace!(kind, %id, "Replaced cached entity");
                }
                Ok(built)
            }
        }
    }
}

impl ResolutionContext for ModelCache {
    fn resolve_guild(&self, payload: Option<&Payload>) -> MarshalResult<Arc<Guild>> {
        self.resolve(&self.guilds, "guild", payload, Guild::build)
    }

    fn resolve_channel(&self, payload: Option<&Payload>) -> MarshalResult<Arc<GuildChannel>> {
        self.resolve(&self.channels, "channel", payload, GuildChannel::build)
    }

    fn resolve_user(&self, payload: Option<&Payload>) -> MarshalResult<Arc<User>> {
        self.resolve(&self.users, "user", payload, User::build)
    }
}
