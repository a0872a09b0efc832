//! Bit-banged parallel bus over individual GPIO pins
//!
//! Wiring expected by [`PinBus`]:
//!
//! | Line | Pin trait | Active |
//! |------|-----------|--------|
//! | D0..D7 | [`FlexPin`] | - |
//! | C/D | [`OutputPin`] | high = command/status |
//! | /WR | [`OutputPin`] | low |
//! | /RD | [`OutputPin`] | low |
//! | /RES | [`OutputPin`] | low |
//!
//! /CE is expected to be tied low (or held low by the board code).

use crate::bus::{BusLines, ParallelBus, Register};
use crate::gpio::{FlexPin, InputPin, OutputPin};

/// [`ParallelBus`] built from eight data pins and four control pins
pub struct PinBus<D, O> {
    data: [D; 8],
    cd: O,
    wr: O,
    rd: O,
    reset: O,
}

impl<D, O> PinBus<D, O>
where
    D: FlexPin,
    O: OutputPin,
{
    /// Take ownership of the pins and park the bus
    ///
    /// Strobes are released, the data lines are high impedance and the
    /// controller is held in reset until [`ParallelBus::release_reset`].
    pub fn new(data: [D; 8], cd: O, wr: O, rd: O, reset: O) -> Self {
        let mut bus = Self {
            data,
            cd,
            wr,
            rd,
            reset,
        };
        bus.wr.set_high();
        bus.rd.set_high();
        bus.cd.set_low();
        bus.reset.set_low();
        for pin in bus.data.iter_mut() {
            pin.set_as_input();
        }
        bus
    }

    /// Release the pins
    pub fn into_parts(self) -> ([D; 8], O, O, O, O) {
        (self.data, self.cd, self.wr, self.rd, self.reset)
    }
}

impl<D, O> ParallelBus for PinBus<D, O>
where
    D: FlexPin,
    O: OutputPin,
{
    fn drive(&mut self, lines: BusLines) {
        // Strobes go inactive before anything else changes so a falling
        // data line never lands inside a strobe.
        if !lines.write {
            self.wr.set_high();
        }
        if !lines.read {
            self.rd.set_high();
        }

        match lines.data {
            Some(value) => {
                for (bit, pin) in self.data.iter_mut().enumerate() {
                    pin.set_state(value & (1 << bit) != 0);
                    pin.set_as_output();
                }
            }
            None => {
                for pin in self.data.iter_mut() {
                    pin.set_as_input();
                }
            }
        }

        self.cd.set_state(lines.register == Register::Command);

        if lines.write {
            self.wr.set_low();
        }
        if lines.read {
            self.rd.set_low();
        }
    }

    fn sample(&mut self) -> u8 {
        self.data
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, pin)| {
                if pin.is_high() {
                    acc | (1 << bit)
                } else {
                    acc
                }
            })
    }

    fn release_reset(&mut self) {
        self.reset.set_high();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Pin backed by shared cells so the test can observe it after moving
    /// it into the bus
    struct MockPin<'a> {
        level: &'a Cell<bool>,
        output: &'a Cell<bool>,
        external: &'a Cell<bool>,
    }

    impl OutputPin for MockPin<'_> {
        fn set_high(&mut self) {
            self.level.set(true);
        }

        fn set_low(&mut self) {
            self.level.set(false);
        }
    }

    impl InputPin for MockPin<'_> {
        fn is_high(&self) -> bool {
            if self.output.get() {
                self.level.get()
            } else {
                self.external.get()
            }
        }
    }

    impl FlexPin for MockPin<'_> {
        fn set_as_output(&mut self) {
            self.output.set(true);
        }

        fn set_as_input(&mut self) {
            self.output.set(false);
        }
    }

    struct Cells {
        level: [Cell<bool>; 12],
        output: [Cell<bool>; 12],
        external: [Cell<bool>; 12],
    }

    impl Cells {
        fn new() -> Self {
            Self {
                level: core::array::from_fn(|_| Cell::new(false)),
                output: core::array::from_fn(|_| Cell::new(false)),
                external: core::array::from_fn(|_| Cell::new(false)),
            }
        }

        fn pin(&self, idx: usize) -> MockPin<'_> {
            MockPin {
                level: &self.level[idx],
                output: &self.output[idx],
                external: &self.external[idx],
            }
        }

        fn bus(&self) -> PinBus<MockPin<'_>, MockPin<'_>> {
            PinBus::new(
                core::array::from_fn(|i| self.pin(i)),
                self.pin(8),
                self.pin(9),
                self.pin(10),
                self.pin(11),
            )
        }

        fn data_levels(&self) -> u8 {
            (0..8).fold(0, |acc, i| {
                if self.level[i].get() {
                    acc | (1 << i)
                } else {
                    acc
                }
            })
        }
    }

    const CD: usize = 8;
    const WR: usize = 9;
    const RD: usize = 10;
    const RES: usize = 11;

    #[test]
    fn test_new_parks_bus() {
        let cells = Cells::new();
        let _bus = cells.bus();

        assert!(cells.level[WR].get());
        assert!(cells.level[RD].get());
        assert!(!cells.level[CD].get());
        assert!(!cells.level[RES].get());
        assert!((0..8).all(|i| !cells.output[i].get()));
    }

    #[test]
    fn test_write_strobe_drives_data_and_cd() {
        let cells = Cells::new();
        let mut bus = cells.bus();

        bus.drive(BusLines::writing(Register::Command, 0xA5).with_write(true));

        assert_eq!(cells.data_levels(), 0xA5);
        assert!((0..8).all(|i| cells.output[i].get()));
        assert!(cells.level[CD].get());
        assert!(!cells.level[WR].get());
        assert!(cells.level[RD].get());

        bus.drive(BusLines::IDLE);
        assert!(cells.level[WR].get());
        assert!(!cells.level[CD].get());
        assert!((0..8).all(|i| !cells.output[i].get()));
    }

    #[test]
    fn test_sample_reads_external_levels() {
        let cells = Cells::new();
        let mut bus = cells.bus();

        for (i, bit) in [true, false, true, true, false, false, true, false]
            .iter()
            .enumerate()
        {
            cells.external[i].set(*bit);
        }

        bus.drive(BusLines::reading(Register::Data).with_read(true));
        assert!(!cells.level[RD].get());
        assert_eq!(bus.sample(), 0b0100_1101);
    }

    #[test]
    fn test_release_reset() {
        let cells = Cells::new();
        let mut bus = cells.bus();
        bus.release_reset();
        assert!(cells.level[RES].get());
    }
}
