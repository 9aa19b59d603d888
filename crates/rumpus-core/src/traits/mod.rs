//! Core traits for the transport seam.

mod outbound;
mod source;

pub use outbound::Outbound;
pub use source::EventSource;
