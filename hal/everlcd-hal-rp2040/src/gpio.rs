//! embassy-rp GPIO behind the everlcd pin traits

use embassy_rp::gpio::{AnyPin, Flex, Level, Output};
use embassy_rp::Peri;
use everlcd_hal::{FlexPin, InputPin, OutputPin};

/// Bidirectional data line
pub struct FlexLine<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexLine<'d> {
    /// Take a pin, starting as a high impedance input
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_as_input();
        Self { pin }
    }
}

impl OutputPin for FlexLine<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }
}

impl InputPin for FlexLine<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl FlexPin for FlexLine<'_> {
    fn set_as_output(&mut self) {
        self.pin.set_as_output();
    }

    fn set_as_input(&mut self) {
        self.pin.set_as_input();
    }
}

/// Push-pull control line
pub struct OutputLine<'d> {
    pin: Output<'d>,
}

impl<'d> OutputLine<'d> {
    /// Take a pin, driving it high (strobes inactive)
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self {
            pin: Output::new(pin, Level::High),
        }
    }
}

impl OutputPin for OutputLine<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }
}
