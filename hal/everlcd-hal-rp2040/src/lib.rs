//! RP2040 bindings for the everlcd bridge
//!
//! Implements the `everlcd-hal` pin traits on top of embassy-rp GPIO and
//! provides a cycle-counting delay for bus timing. The pin assignment itself
//! is board code and lives in the firmware.

#![no_std]

pub mod delay;
pub mod gpio;

pub use delay::CycleDelay;
pub use gpio::{FlexLine, OutputLine};

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;
use everlcd_hal::PinBus;

/// Parallel bus on RP2040 GPIO
pub type RpPinBus<'d> = PinBus<FlexLine<'d>, OutputLine<'d>>;

/// Build a parked parallel bus from raw pins
///
/// `data` is D0..D7 in order. The controller stays in reset until the
/// driver releases it.
pub fn pin_bus<'d>(
    data: [Peri<'d, AnyPin>; 8],
    cd: Peri<'d, AnyPin>,
    wr: Peri<'d, AnyPin>,
    rd: Peri<'d, AnyPin>,
    reset: Peri<'d, AnyPin>,
) -> RpPinBus<'d> {
    PinBus::new(
        data.map(FlexLine::new),
        OutputLine::new(cd),
        OutputLine::new(wr),
        OutputLine::new(rd),
        OutputLine::new(reset),
    )
}
