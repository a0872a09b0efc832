//! everlcd serial command protocol
//!
//! This crate defines the byte stream a host sends to the bridge and the
//! state machine that decodes it. The protocol is unframed: values
//! `0x20..=0xFF` are text, values below `0x20` are command prefixes, and the
//! interpreter always knows from its own state whether the next byte is an
//! argument or a new command, so nothing ever needs escaping.
//!
//! # Byte protocol
//!
//! ```text
//! 0x20..0xFF        write character (value - 0x20), pointer += 1
//! 0x01 b            write b verbatim, pointer += 1
//! 0x02 b            echo b back
//! 0x03 lo hi        address pointer = lo | hi << 8
//! 0x04              read one byte at the pointer, pointer += 1, send it back
//! 0x05              re-initialize the controller and clear RAM
//! 0x06 b            mode set, low 3 bits of b
//! 0x07 b            display mode, low 4 bits of b
//! 0x08 b            cursor pattern, low 3 bits of b (1-8 lines)
//! 0x09 n bytes...   bulk write n bytes (0 means 256) in auto-write mode
//! 0x0A x y          cursor position
//! 0x00, 0x0B..0x1F  ignored
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod interpreter;
pub mod opcode;
pub mod request;

pub use interpreter::{step, Action, Interpreter, State};
pub use request::{pack_pixels, EncodeError, Request, MAX_REQUEST_SIZE};
