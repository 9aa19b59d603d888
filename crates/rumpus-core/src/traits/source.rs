//! Event stream trait.

use futures_core::Stream;

use crate::Result;
use crate::events::RoomEvent;

/// A stream of typed room events.
pub trait EventSource: Stream<Item = Result<RoomEvent>> + Send {}

impl<T> EventSource for T where T: Stream<Item = Result<RoomEvent>> + Send {}
