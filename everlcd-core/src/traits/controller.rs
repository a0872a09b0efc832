//! Controller trait for the T6963 command set

use crate::error::BusTimeout;

/// Polled access to a T6963 controller
///
/// Every method waits for the matching status flag within a bounded poll
/// ceiling and fails with [`BusTimeout`] without touching the bus if the
/// flag never appears. Composite operations stop at the first failure.
pub trait LcdController {
    /// Write a command opcode
    fn command(&mut self, opcode: u8) -> Result<(), BusTimeout>;

    /// Write one data byte, then the command
    fn command_1(&mut self, opcode: u8, data: u8) -> Result<(), BusTimeout>;

    /// Write two data bytes, then the command
    fn command_2(&mut self, opcode: u8, data1: u8, data2: u8) -> Result<(), BusTimeout>;

    /// Write a 16-bit value as LSB, MSB data bytes, then the command
    fn command_word(&mut self, opcode: u8, value: u16) -> Result<(), BusTimeout> {
        let [lsb, msb] = value.to_le_bytes();
        self.command_2(opcode, lsb, msb)
    }

    /// Write the command, then read one data byte
    fn command_read(&mut self, opcode: u8) -> Result<u8, BusTimeout>;

    /// Enter auto-write mode and wait once for the controller to accept data
    fn begin_auto_write(&mut self) -> Result<(), BusTimeout>;

    /// Write one byte in auto-write mode without per-byte polling
    fn bulk_write(&mut self, data: u8) -> Result<(), BusTimeout>;

    /// Leave auto-write mode
    fn end_auto_write(&mut self) -> Result<(), BusTimeout>;

    /// Leave auto mode if one status read shows the controller in it
    ///
    /// Does nothing when the controller reports command-ready or reports
    /// no auto flag at all.
    fn leave_auto_mode(&mut self);

    /// Run the full initialization sequence and clear display RAM
    fn initialize(&mut self) -> Result<(), BusTimeout>;
}

impl<T: LcdController + ?Sized> LcdController for &mut T {
    fn command(&mut self, opcode: u8) -> Result<(), BusTimeout> {
        (**self).command(opcode)
    }

    fn command_1(&mut self, opcode: u8, data: u8) -> Result<(), BusTimeout> {
        (**self).command_1(opcode, data)
    }

    fn command_2(&mut self, opcode: u8, data1: u8, data2: u8) -> Result<(), BusTimeout> {
        (**self).command_2(opcode, data1, data2)
    }

    fn command_word(&mut self, opcode: u8, value: u16) -> Result<(), BusTimeout> {
        (**self).command_word(opcode, value)
    }

    fn command_read(&mut self, opcode: u8) -> Result<u8, BusTimeout> {
        (**self).command_read(opcode)
    }

    fn begin_auto_write(&mut self) -> Result<(), BusTimeout> {
        (**self).begin_auto_write()
    }

    fn bulk_write(&mut self, data: u8) -> Result<(), BusTimeout> {
        (**self).bulk_write(data)
    }

    fn end_auto_write(&mut self) -> Result<(), BusTimeout> {
        (**self).end_auto_write()
    }

    fn leave_auto_mode(&mut self) {
        (**self).leave_auto_mode()
    }

    fn initialize(&mut self) -> Result<(), BusTimeout> {
        (**self).initialize()
    }
}
