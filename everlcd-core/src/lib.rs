//! Board-agnostic core definitions for the everlcd bridge
//!
//! This crate contains everything about the T6963 controller that does not
//! depend on how the bus is wired:
//!
//! - Controller opcodes and status register decoding
//! - The bus timeout error
//! - Configuration type definitions (timing, poll limits, memory layout)
//! - The [`traits::LcdController`] contract used by the command bridge

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod controller;
pub mod error;
pub mod traits;

pub use controller::{ControllerStatus, Ready};
pub use error::BusTimeout;
