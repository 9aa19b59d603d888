//! Error types for the rumpus crates.
//!
//! This module provides a unified error type with explicit variants for
//! transport, protocol, and payload-schema failures, so callers can
//! distinguish "the connection broke" from "this one event was malformed".

use std::fmt;

use thiserror::Error;

use crate::hydrate::{FieldPath, Shape};

/// The unified error type for rumpus operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, HTTP).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Protocol errors (unparseable frames, API error responses).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A payload did not match the schema of its target record.
    #[error("schema mismatch: {0}")]
    Schema(#[from] SchemaMismatch),

    /// Caller-supplied input that fails validation (URLs, handles).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// The connection was closed by the remote end.
    #[error("connection closed")]
    Closed,

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Protocol-level errors.
#[derive(Debug)]
pub enum ProtocolError {
    /// A frame that could not be parsed as a service packet.
    Frame { message: String },

    /// A packet kind that is valid framing but unexpected in context.
    UnexpectedPacket { kind: String },

    /// An error response from the HTTP API.
    Api { status: u16, message: Option<String> },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Frame { message } => write!(f, "unparseable frame: {}", message),
            ProtocolError::UnexpectedPacket { kind } => write!(f, "unexpected packet: {}", kind),
            ProtocolError::Api { status, message } => {
                write!(f, "API error: HTTP {}", status)?;
                if let Some(message) = message {
                    write!(f, ": {}", message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// A payload under a routed field failed to construct into its target
/// record type.
///
/// The path identifies the exact field, e.g. `topic.text`. A mismatch
/// anywhere inside a record fails the hydration of the whole enclosing
/// record; partially hydrated records are never handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaMismatch {
    /// A required field was absent (or null) in the payload.
    #[error("missing required field '{path}'")]
    Missing { path: FieldPath },

    /// A field held a value of the wrong kind.
    #[error("field '{path}': expected {expected}, received {received}")]
    Shape {
        path: FieldPath,
        expected: Shape,
        received: Shape,
    },
}

impl SchemaMismatch {
    /// The path of the offending field.
    pub fn path(&self) -> &FieldPath {
        match self {
            SchemaMismatch::Missing { path } => path,
            SchemaMismatch::Shape { path, .. } => path,
        }
    }
}
