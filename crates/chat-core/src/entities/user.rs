//! User entity - represents a platform user as seen by the client

use crate::error::MarshalResult;
use crate::marshal::casters::{to_bool, to_snowflake, to_string};
use crate::marshal::{get, get_or, get_or_default, require, Payload};
use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub discriminator: String,
    pub avatar: Option<String>,
    pub bot: bool,
    pub system: bool,
}

impl User {
    /// Build a user from its payload. Only `id` is required.
    pub fn build(payload: &Payload) -> MarshalResult<Self> {
        Ok(Self {
            id: require(payload, "id", to_snowflake)?,
            username: get_or_default(payload, "username", to_string)?,
            discriminator: get_or(payload, "discriminator", to_string, "0".to_string())?,
            avatar: get(payload, "avatar", to_string)?,
            bot: get_or_default(payload, "bot", to_bool)?,
            system: get_or_default(payload, "system", to_bool)?,
        })
    }

    /// Get the full tag: username#discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }

    /// Mention string usable in message content
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    /// Get avatar URL or default avatar URL
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => format!("https://cdn.discordapp.com/avatars/{}/{hash}.png", self.id),
            None => format!(
                "https://cdn.discordapp.com/embed/avatars/{}.png",
                self.default_avatar_index()
            ),
        }
    }

    /// Get default avatar index (0-4) based on discriminator
    fn default_avatar_index(&self) -> u8 {
        (self.discriminator.parse::<u16>().unwrap_or(0) % 5) as u8
    }
}
