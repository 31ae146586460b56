//! Guild entity - the partial guild object embedded in invites and events

use crate::error::MarshalResult;
use crate::marshal::casters::{to_int, to_snowflake, to_string, to_string_list};
use crate::marshal::{get, get_or_default, require, Payload};
use crate::value_objects::Snowflake;

const CDN_BASE: &str = "https://cdn.discordapp.com";

/// Guild (server) entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub icon: Option<String>,
    pub splash: Option<String>,
    pub banner: Option<String>,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub verification_level: Option<i64>,
    pub vanity_url_code: Option<String>,
    pub owner_id: Option<Snowflake>,
}

impl Guild {
    /// Build a guild from its payload. Only `id` is required.
    pub fn build(payload: &Payload) -> MarshalResult<Self> {
        Ok(Self {
            id: require(payload, "id", to_snowflake)?,
            name: get_or_default(payload, "name", to_string)?,
            icon: get(payload, "icon", to_string)?,
            splash: get(payload, "splash", to_string)?,
            banner: get(payload, "banner", to_string)?,
            description: get(payload, "description", to_string)?,
            features: get_or_default(payload, "features", to_string_list)?,
            verification_level: get(payload, "verification_level", to_int)?,
            vanity_url_code: get(payload, "vanity_url_code", to_string)?,
            owner_id: get(payload, "owner_id", to_snowflake)?,
        })
    }

    /// Check if a user is the guild owner (unknown owner never matches)
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == Some(user_id)
    }

    /// Check if the guild has a feature flag enabled
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Get the guild icon URL if set
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|hash| format!("{CDN_BASE}/icons/{}/{hash}.png", self.id))
    }

    /// Get the invite splash URL if set
    pub fn splash_url(&self) -> Option<String> {
        self.splash
            .as_ref()
            .map(|hash| format!("{CDN_BASE}/splashes/{}/{hash}.png", self.id))
    }
}
