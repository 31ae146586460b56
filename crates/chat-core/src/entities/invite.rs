//! Invite entities - an invite code and the metadata describing its usage
//!
//! Both records are built once from a payload and never change afterwards.
//! Nested guilds, channels and users come from the resolution context and
//! are shared with it, not owned.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::entities::{Guild, GuildChannel, User};
use crate::error::MarshalResult;
use crate::marshal::casters::{to_bool, to_int, to_string, to_timestamp};
use crate::marshal::{get, get_object, get_or_default, require, Payload};
use crate::traits::{ContextHandle, ContextSource};

const INVITE_BASE_URL: &str = "https://discord.gg";

/// A code that, when used, adds a user to a guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    context: ContextHandle,
    code: String,
    guild: Arc<Guild>,
    channel: Arc<GuildChannel>,
    target_user: Option<Arc<User>>,
    approximate_presence_count: Option<i64>,
    approximate_member_count: Option<i64>,
}

impl Invite {
    /// Build an invite from its payload, resolving nested entities through `ctx`.
    ///
    /// A missing `code` yields an empty string rather than an error. The
    /// approximate counts stay `None` when absent; they are never zeroed.
    pub fn build<C>(ctx: &Arc<C>, payload: &Payload) -> MarshalResult<Self>
    where
        C: ContextSource + ?Sized,
    {
        let code = get(payload, "code", to_string)?.unwrap_or_else(|| {
            warn!("Invite payload has no code, using an empty one");
            String::new()
        });

        let guild = ctx.resolve_guild(get_object(payload, "guild")?)?;
        let channel = ctx.resolve_channel(get_object(payload, "channel")?)?;
        let target_user = get_object(payload, "target_user")?
            .map(|sub| ctx.resolve_user(Some(sub)))
            .transpose()?;

        let invite = Self {
            context: ContextHandle::new(ctx),
            code,
            guild,
            channel,
            target_user,
            approximate_presence_count: get(payload, "approximate_presence_count", to_int)?,
            approximate_member_count: get(payload, "approximate_member_count", to_int)?,
        };

        debug!(code = %invite.code, guild_id = %invite.guild.id, "Built invite");
        Ok(invite)
    }

    /// The unique invite code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The guild the invite is for
    pub fn guild(&self) -> &Arc<Guild> {
        &self.guild
    }

    /// The channel the invite points to
    pub fn channel(&self) -> &Arc<GuildChannel> {
        &self.channel
    }

    /// The user whose stream the invite targets, if any
    pub fn target_user(&self) -> Option<&Arc<User>> {
        self.target_user.as_ref()
    }

    /// Approximate count of online members
    pub fn approximate_presence_count(&self) -> Option<i64> {
        self.approximate_presence_count
    }

    /// Approximate count of total members
    pub fn approximate_member_count(&self) -> Option<i64> {
        self.approximate_member_count
    }

    /// The context this invite was built with
    pub fn context(&self) -> &ContextHandle {
        &self.context
    }

    /// Get the full invite URL
    pub fn url(&self) -> String {
        format!("{INVITE_BASE_URL}/{}", self.code)
    }
}

/// Usage and lifecycle details of an invite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteMetadata {
    context: ContextHandle,
    inviter: Arc<User>,
    uses: i64,
    max_uses: i64,
    max_age: i64,
    temporary: bool,
    created_at: DateTime<Utc>,
    revoked: bool,
}

impl InviteMetadata {
    /// Build invite metadata from its payload.
    ///
    /// Counters default to 0 and flags to `false` when absent. `created_at`
    /// is required; a missing or malformed timestamp is an error.
    pub fn build<C>(ctx: &Arc<C>, payload: &Payload) -> MarshalResult<Self>
    where
        C: ContextSource + ?Sized,
    {
        let inviter = ctx.resolve_user(get_object(payload, "inviter")?)?;

        let metadata = Self {
            context: ContextHandle::new(ctx),
            inviter,
            uses: get_or_default(payload, "uses", to_int)?,
            max_uses: get_or_default(payload, "max_uses", to_int)?,
            max_age: get_or_default(payload, "max_age", to_int)?,
            temporary: get_or_default(payload, "temporary", to_bool)?,
            created_at: require(payload, "created_at", to_timestamp)?,
            revoked: get_or_default(payload, "revoked", to_bool)?,
        };

        debug!(inviter_id = %metadata.inviter.id, uses = metadata.uses, "Built invite metadata");
        Ok(metadata)
    }

    /// The user who created the invite
    pub fn inviter(&self) -> &Arc<User> {
        &self.inviter
    }

    /// Number of times the invite has been used
    pub fn uses(&self) -> i64 {
        self.uses
    }

    /// Maximum number of uses, 0 for unlimited
    pub fn max_uses(&self) -> i64 {
        self.max_uses
    }

    /// Lifetime in seconds, 0 for never expiring
    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    /// Whether the invite only grants temporary membership
    pub fn temporary(&self) -> bool {
        self.temporary
    }

    /// When the invite was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the invite has been revoked
    pub fn revoked(&self) -> bool {
        self.revoked
    }

    /// The context this metadata was built with
    pub fn context(&self) -> &ContextHandle {
        &self.context
    }

    /// Check if the invite has no use limit
    #[inline]
    pub fn is_unlimited(&self) -> bool {
        self.max_uses == 0
    }

    /// When the invite stops being valid, `None` if it never expires
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.max_age <= 0 {
            return None;
        }
        TimeDelta::try_seconds(self.max_age).and_then(|age| self.created_at.checked_add_signed(age))
    }
}
