//! rumpus-core - Typed records, hydration, and role resolution for a
//! real-time chat/room service.

pub mod error;
pub mod events;
pub mod hydrate;
pub mod model;
pub mod role;
pub mod traits;

pub use error::{Error, ProtocolError, SchemaMismatch, TransportError};
pub use events::RoomEvent;
pub use hydrate::{FieldPath, Hydrate, Shape};
pub use model::{Message, Session, User, UserList};
pub use role::Role;
pub use traits::{EventSource, Outbound};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
