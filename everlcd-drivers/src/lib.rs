//! Hardware drivers for the everlcd bridge
//!
//! - [`t6963`]: polled T6963 driver over any [`everlcd_hal::ParallelBus`]
//! - [`bridge`]: runs decoded serial commands against a controller
//! - `sim`: simulated controller for host-side tests (`sim` feature)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bridge;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod t6963;

pub use bridge::Bridge;
pub use t6963::T6963;
