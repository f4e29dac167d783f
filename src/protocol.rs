//! Bus command protocol: frame shape, opcodes, decoder, status encoding.
//!
//! The bus is a shared CAN segment; every actuation node sees every frame
//! and keeps only the ones whose 11-bit identifier equals its own resolved
//! address. Two command dialects exist, selected per deployment:
//!
//! | Protocol    | Id family | Byte 0                  | Bytes 1–4            |
//! |-------------|-----------|-------------------------|----------------------|
//! | `Direction` | `0x300+n` | 0x00 fwd, 0x01 rev, 0x02 stop | —              |
//! | `Duty`      | `0x100+n` | 0x00 set power          | i32 BE, percent      |
//!
//! Decoding happens exactly once, at this boundary — the arbiter only ever
//! sees the typed [`MotorCommand`]. Frames for other nodes and unknown
//! opcodes are dropped without comment; the bus is not ours to police.
//!
//! Outbound, the node reports end-of-travel stops to the bus controller at
//! identifier `0x000` with payload `[0x30, dir]` (dir 1 = upper, 0 = lower).

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::app::commands::{DriveDirection, MotorCommand};
use crate::fsm::context::TravelEnd;

// ---------------------------------------------------------------------------
// Wire constants
// ---------------------------------------------------------------------------

/// Direction protocol: run toward the upper stop.
pub const OP_FORWARD: u8 = 0x00;
/// Direction protocol: run toward the lower stop.
pub const OP_REVERSE: u8 = 0x01;
/// Direction protocol: stop.
pub const OP_STOP: u8 = 0x02;
/// Duty protocol: set signed power (payload bytes 1–4, big-endian).
pub const OP_SET_POWER: u8 = 0x00;

/// Identifier all status frames are sent to (the bus controller's inbox).
pub const STATUS_FRAME_ID: u16 = 0x000;
/// Status opcode: a limit switch stopped the motor.
pub const OP_LIMIT_REACHED: u8 = 0x30;

/// Maximum payload length of one bus frame.
pub const MAX_PAYLOAD: usize = 8;

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// One addressed bus frame: 11-bit identifier plus up to eight data bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: u16,
    pub data: Vec<u8, MAX_PAYLOAD>,
}

impl Frame {
    /// Build a frame from an identifier and payload bytes.
    /// Returns `None` if `data` exceeds [`MAX_PAYLOAD`].
    pub fn new(id: u16, data: &[u8]) -> Option<Self> {
        Some(Self {
            id,
            data: Vec::from_slice(data).ok()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Protocol selection
// ---------------------------------------------------------------------------

/// Which command dialect a node speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolKind {
    /// Three-way opcode commands at fixed drive strength.
    Direction,
    /// Signed power percentage carried in the payload.
    Duty,
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Decode one inbound frame against this node's address.
///
/// Returns `None` for frames addressed elsewhere, unknown opcodes, and
/// truncated payloads — none of those are errors on a shared bus.
pub fn decode(frame: &Frame, my_address: u16, protocol: ProtocolKind) -> Option<MotorCommand> {
    if frame.id != my_address {
        return None;
    }
    let opcode = *frame.data.first()?;

    match protocol {
        ProtocolKind::Direction => match opcode {
            OP_FORWARD => Some(MotorCommand::SetDirection(DriveDirection::Forward)),
            OP_REVERSE => Some(MotorCommand::SetDirection(DriveDirection::Reverse)),
            OP_STOP => Some(MotorCommand::SetDirection(DriveDirection::Stop)),
            _ => None,
        },
        ProtocolKind::Duty => match opcode {
            OP_SET_POWER => {
                let raw: [u8; 4] = frame.data.get(1..5)?.try_into().ok()?;
                Some(MotorCommand::SetPower(i32::from_be_bytes(raw) as f32))
            }
            _ => None,
        },
    }
}

// ---------------------------------------------------------------------------
// Status encoding
// ---------------------------------------------------------------------------

/// Encode the "limit reached" status frame for one end of travel.
///
/// The payload is padded to the full eight bytes — the bus controller
/// indexes fixed offsets and expects a constant DLC.
pub fn status_frame(end: TravelEnd) -> Frame {
    let dir = match end {
        TravelEnd::Upper => 0x01,
        TravelEnd::Lower => 0x00,
    };
    let mut data = Vec::new();
    // Capacity is MAX_PAYLOAD; these pushes cannot fail.
    let _ = data.push(OP_LIMIT_REACHED);
    let _ = data.push(dir);
    while data.len() < MAX_PAYLOAD {
        let _ = data.push(0);
    }
    Frame {
        id: STATUS_FRAME_ID,
        data,
    }
}
