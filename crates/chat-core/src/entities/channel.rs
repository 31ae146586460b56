//! Channel entity - the channel an invite points to

use crate::error::MarshalResult;
use crate::marshal::casters::{to_bool, to_int, to_snowflake, to_string};
use crate::marshal::{get, get_or_default, require, Payload};
use crate::value_objects::Snowflake;

/// Channel type, from the platform's numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelType {
    /// Guild text channel
    #[default]
    GuildText,
    /// Direct message between users
    Dm,
    /// Guild voice channel
    GuildVoice,
    /// Direct message between several users
    GroupDm,
    /// Guild category for organizing channels
    GuildCategory,
    /// Announcement channel
    GuildNews,
    /// A code this client does not know yet
    Unknown(i64),
}

impl ChannelType {
    /// Get the numeric value
    #[inline]
    pub fn code(self) -> i64 {
        match self {
            Self::GuildText => 0,
            Self::Dm => 1,
            Self::GuildVoice => 2,
            Self::GroupDm => 3,
            Self::GuildCategory => 4,
            Self::GuildNews => 5,
            Self::Unknown(code) => code,
        }
    }
}

impl From<i64> for ChannelType {
    fn from(value: i64) -> Self {
        match value {
            0 => Self::GuildText,
            1 => Self::Dm,
            2 => Self::GuildVoice,
            3 => Self::GroupDm,
            4 => Self::GuildCategory,
            5 => Self::GuildNews,
            other => Self::Unknown(other),
        }
    }
}

/// Guild channel entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildChannel {
    pub id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub name: String,
    pub channel_type: ChannelType,
    pub position: i64,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub parent_id: Option<Snowflake>,
}

impl GuildChannel {
    /// Build a channel from its payload. Only `id` is required.
    pub fn build(payload: &Payload) -> MarshalResult<Self> {
        let channel_type = get(payload, "type", to_int)?
            .map_or_else(ChannelType::default, ChannelType::from);

        Ok(Self {
            id: require(payload, "id", to_snowflake)?,
            guild_id: get(payload, "guild_id", to_snowflake)?,
            name: get_or_default(payload, "name", to_string)?,
            channel_type,
            position: get_or_default(payload, "position", to_int)?,
            topic: get(payload, "topic", to_string)?,
            nsfw: get_or_default(payload, "nsfw", to_bool)?,
            parent_id: get(payload, "parent_id", to_snowflake)?,
        })
    }

    /// Check if this is a category
    #[inline]
    pub fn is_category(&self) -> bool {
        matches!(self.channel_type, ChannelType::GuildCategory)
    }

    /// Check if this is a voice channel
    #[inline]
    pub fn is_voice(&self) -> bool {
        matches!(self.channel_type, ChannelType::GuildVoice)
    }

    /// Mention string usable in message content
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}
