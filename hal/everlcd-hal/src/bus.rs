//! Parallel bus abstraction
//!
//! The T6963 family uses an 8080-style bus: eight bidirectional data lines,
//! a register-select line (C/D) and two active-low strobes (/WR, /RD).
//! [`ParallelBus`] exposes exactly two operations on it: put a set of line
//! levels on the bus, and sample the data lines.

/// Register selected by the C/D line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Data register (C/D low)
    Data,
    /// Command register on write, status register on read (C/D high)
    Command,
}

/// Levels the host drives onto the bus
///
/// Strobes are expressed as "asserted" rather than electrical level, so
/// `write: true` means /WR is pulled low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusLines {
    /// Value on D0..D7, or `None` when the host releases the data lines
    pub data: Option<u8>,
    /// Register selected by C/D
    pub register: Register,
    /// /WR asserted
    pub write: bool,
    /// /RD asserted
    pub read: bool,
}

impl BusLines {
    /// Bus at rest: data released, C/D low, no strobe
    pub const IDLE: Self = Self {
        data: None,
        register: Register::Data,
        write: false,
        read: false,
    };

    /// Host driving `value` towards `register`, strobe not yet asserted
    pub const fn writing(register: Register, value: u8) -> Self {
        Self {
            data: Some(value),
            register,
            write: false,
            read: false,
        }
    }

    /// Data released with `register` selected, strobe not yet asserted
    pub const fn reading(register: Register) -> Self {
        Self {
            data: None,
            register,
            write: false,
            read: false,
        }
    }

    /// Same lines with /WR asserted or released
    pub const fn with_write(self, asserted: bool) -> Self {
        Self {
            write: asserted,
            ..self
        }
    }

    /// Same lines with /RD asserted or released
    pub const fn with_read(self, asserted: bool) -> Self {
        Self {
            read: asserted,
            ..self
        }
    }
}

impl Default for BusLines {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Raw access to an 8080-style parallel bus
///
/// Implementations apply the levels immediately; all timing is the caller's
/// responsibility.
pub trait ParallelBus {
    /// Drive the control lines and (optionally) the data lines
    fn drive(&mut self, lines: BusLines);

    /// Sample D0..D7
    fn sample(&mut self) -> u8;

    /// Release the controller's /RES line so it starts running
    ///
    /// Buses without a reset line leave this as a no-op.
    fn release_reset(&mut self) {}
}

impl<T: ParallelBus + ?Sized> ParallelBus for &mut T {
    fn drive(&mut self, lines: BusLines) {
        (**self).drive(lines)
    }

    fn sample(&mut self) -> u8 {
        (**self).sample()
    }

    fn release_reset(&mut self) {
        (**self).release_reset()
    }
}
