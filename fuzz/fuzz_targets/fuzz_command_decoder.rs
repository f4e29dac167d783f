//! Fuzz target: `protocol::decode`
//!
//! Builds frames from arbitrary bytes and runs them through the command
//! decoder under both protocols, verifying:
//! - No panics under any identifier/payload combination
//! - Commands only come out of frames addressed to the node
//! - Decoded power magnitudes are always finite (i32 reinterpretation
//!   cannot smuggle NaN/Inf into the arbiter)
//!
//! cargo fuzz run fuzz_command_decoder

#![no_main]

use canmotor::app::commands::MotorCommand;
use canmotor::protocol::{decode, Frame, ProtocolKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First two bytes pick the 11-bit identifier; the rest (up to 8) is
    // the payload.
    let id = u16::from_le_bytes([data[0], data[1]]) & 0x7FF;
    let payload = &data[2..data.len().min(10)];
    let Some(frame) = Frame::new(id, payload) else {
        return;
    };

    for protocol in [ProtocolKind::Direction, ProtocolKind::Duty] {
        for my_address in [0x300u16, 0x100, id] {
            let decoded = decode(&frame, my_address, protocol);

            if frame.id != my_address {
                assert!(decoded.is_none(), "command decoded from a foreign frame");
            }

            if let Some(MotorCommand::SetPower(v)) = decoded {
                assert!(v.is_finite(), "non-finite power magnitude decoded");
            }
        }
    }
});
