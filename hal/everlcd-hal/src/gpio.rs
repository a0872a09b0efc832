//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Bidirectional pin whose output driver can be switched at runtime
///
/// Used for the shared data lines: the host drives them during a write
/// strobe and releases them (high impedance) so the controller can drive
/// them during a read strobe.
pub trait FlexPin: OutputPin + InputPin {
    /// Enable the output driver; the pin drives the last set level
    fn set_as_output(&mut self);

    /// Disable the output driver (high impedance)
    fn set_as_input(&mut self);
}
