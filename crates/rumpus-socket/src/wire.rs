//! Socket.io-style text framing.
//!
//! The service speaks engine.io text frames: a leading packet-type digit,
//! then for message frames a socket.io sub-type digit and a JSON body.
//! An event frame looks like `42["room::message",{"message":"hi"}]`.

use serde_json::Value;

use rumpus_core::error::ProtocolError;

/// A decoded service packet.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Handshake metadata (`0{...}`), sent once at connection open.
    Open(Value),

    /// Server-initiated keepalive (`2`); answer with [`Packet::Pong`].
    Ping,

    /// Keepalive answer (`3`).
    Pong,

    /// The namespace connect acknowledgment (`40`).
    ConnectAck,

    /// A named event with an optional payload (`42[...]`).
    Event { name: String, payload: Value },

    /// Connection teardown (`1` or `41`).
    Close,

    /// A frame to ignore (`6`).
    Noop,
}

/// Decode one text frame into a [`Packet`].
pub fn decode(frame: &str) -> Result<Packet, ProtocolError> {
    let mut chars = frame.chars();
    let packet = match chars.next() {
        Some('0') => Packet::Open(parse_body(chars.as_str())?),
        Some('1') => Packet::Close,
        Some('2') => Packet::Ping,
        Some('3') => Packet::Pong,
        Some('6') => Packet::Noop,
        Some('4') => match chars.next() {
            Some('0') => Packet::ConnectAck,
            Some('1') => Packet::Close,
            Some('2') => decode_event(chars.as_str())?,
            other => {
                return Err(ProtocolError::UnexpectedPacket {
                    kind: format!("4{}", other.map(String::from).unwrap_or_default()),
                });
            }
        },
        _ => {
            return Err(ProtocolError::Frame {
                message: format!("unrecognized frame: {}", preview(frame)),
            });
        }
    };

    Ok(packet)
}

/// Encode an outbound event as a `42["name",payload]` frame.
pub fn encode_event(name: &str, payload: &Value) -> String {
    format!("42[{},{}]", Value::String(name.to_string()), payload)
}

fn decode_event(body: &str) -> Result<Packet, ProtocolError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ProtocolError::Frame {
        message: format!("event body is not JSON: {}", e),
    })?;

    let Value::Array(mut items) = value else {
        return Err(ProtocolError::Frame {
            message: "event body is not an array".to_string(),
        });
    };

    if items.is_empty() {
        return Err(ProtocolError::Frame {
            message: "event body is empty".to_string(),
        });
    }

    let payload = if items.len() > 1 {
        items.remove(1)
    } else {
        Value::Null
    };

    match items.remove(0) {
        Value::String(name) => Ok(Packet::Event { name, payload }),
        other => Err(ProtocolError::Frame {
            message: format!("event name is not a string: {}", other),
        }),
    }
}

fn parse_body(body: &str) -> Result<Value, ProtocolError> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| ProtocolError::Frame {
        message: format!("handshake body is not JSON: {}", e),
    })
}

fn preview(frame: &str) -> String {
    frame.chars().take(32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_event_frames() {
        let packet = decode(r#"42["room::message",{"message":"hi","handle":"kim"}]"#).unwrap();
        assert_eq!(
            packet,
            Packet::Event {
                name: "room::message".to_string(),
                payload: json!({ "message": "hi", "handle": "kim" }),
            }
        );
    }

    #[test]
    fn decodes_payloadless_events() {
        let packet = decode(r#"42["room::banlist"]"#).unwrap();
        assert_eq!(
            packet,
            Packet::Event {
                name: "room::banlist".to_string(),
                payload: Value::Null,
            }
        );
    }

    #[test]
    fn decodes_keepalives_and_lifecycle() {
        assert_eq!(decode("2").unwrap(), Packet::Ping);
        assert_eq!(decode("3").unwrap(), Packet::Pong);
        assert_eq!(decode("40").unwrap(), Packet::ConnectAck);
        assert_eq!(decode("41").unwrap(), Packet::Close);
        assert_eq!(decode("1").unwrap(), Packet::Close);
    }

    #[test]
    fn decodes_the_handshake() {
        let packet = decode(r#"0{"sid":"abc","pingInterval":25000}"#).unwrap();
        assert_eq!(packet, Packet::Open(json!({ "sid": "abc", "pingInterval": 25000 })));
    }

    #[test]
    fn rejects_garbage_frames() {
        assert!(matches!(
            decode("hello"),
            Err(ProtocolError::Frame { .. })
        ));
        assert!(matches!(
            decode("42{not json"),
            Err(ProtocolError::Frame { .. })
        ));
        assert!(matches!(
            decode(r#"42[17,{}]"#),
            Err(ProtocolError::Frame { .. })
        ));
    }

    #[test]
    fn encodes_events_in_the_service_format() {
        let frame = encode_event("room::message", &json!({ "message": "hi", "room": "lounge" }));
        assert_eq!(frame, r#"42["room::message",{"message":"hi","room":"lounge"}]"#);

        // Encoded frames decode back to the same event.
        let packet = decode(&frame).unwrap();
        assert_eq!(
            packet,
            Packet::Event {
                name: "room::message".to_string(),
                payload: json!({ "message": "hi", "room": "lounge" }),
            }
        );
    }
}
