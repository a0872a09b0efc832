//! everlcd Hardware Abstraction Layer
//!
//! This crate defines the hardware-access traits the T6963 bus driver is
//! written against. Chip-specific crates implement the pin traits; the bus
//! driver only ever sees a [`bus::ParallelBus`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  everlcd-drivers (T6963 bus protocol)   │
//! └─────────────────────────────────────────┘
//!                     │  ParallelBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  everlcd-hal (this crate - traits)      │
//! │  PinBus: ParallelBus over GPIO traits   │
//! └─────────────────────────────────────────┘
//!                     │  OutputPin / FlexPin
//!                     ▼
//!             ┌───────────────┐
//!             │ everlcd-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`bus::ParallelBus`] - 8-bit parallel bus with C/D, /WR and /RD lines

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod pin_bus;

// Re-export key traits at crate root for convenience
pub use bus::{BusLines, ParallelBus, Register};
pub use gpio::{FlexPin, InputPin, OutputPin};
pub use pin_bus::PinBus;
