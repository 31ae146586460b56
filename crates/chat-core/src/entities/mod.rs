//! Domain entities - typed records built from API payloads

mod channel;
mod guild;
mod invite;
mod user;

pub use channel::{ChannelType, GuildChannel};
pub use guild::Guild;
pub use invite::{Invite, InviteMetadata};
pub use user::User;
