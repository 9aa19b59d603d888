//! The record schema: typed shapes for every payload the service sends.
//!
//! Each record declares its fields once and hydrates through the engine
//! in [`crate::hydrate`]; nothing here performs I/O.

mod media;
mod message;
mod room;
mod user;

pub use media::{Dimensions, PlayVideo, PlaylistItem, VideoQuality};
pub use message::{HandleChange, Join, Message, RoomError, Status, UpdateUserList};
pub use room::{Attrs, BanListItem, Banlist, RoomSettings, Topic, UpdatedBy, UserList};
pub use user::{Session, User, UserSettings};
