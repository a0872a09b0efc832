//! T6963 LCD controller on a parallel bus
//!
//! The controller accepts a byte only after it has raised the matching ready
//! flag in its status register. Every transfer therefore polls the status
//! register first, up to a configured ceiling, and fails with
//! [`BusTimeout`] instead of writing if the flag never shows up.
//!
//! # Bus cycle
//!
//! ```text
//!         setup   pulse
//! D0..D7 ==X=================X== (host drives on write, releases on read)
//! C/D    ==X=================X==
//! /WR    ‾‾‾‾‾‾‾‾|_______|‾‾‾‾‾‾
//! ```
//!
//! Reads are the same with /RD, sampling after the access time.

use embedded_hal::delay::DelayNs;
use everlcd_core::config::LcdConfig;
use everlcd_core::controller::cmd;
use everlcd_core::traits::LcdController;
use everlcd_core::{BusTimeout, ControllerStatus, Ready};
use everlcd_hal::{BusLines, ParallelBus, Register};

/// T6963 bus driver
pub struct T6963<B, D> {
    bus: B,
    delay: D,
    config: LcdConfig,
}

impl<B: ParallelBus, D: DelayNs> T6963<B, D> {
    /// Create a driver over an idle bus
    pub fn new(bus: B, delay: D, config: LcdConfig) -> Self {
        Self { bus, delay, config }
    }

    /// Get the active configuration
    pub fn config(&self) -> &LcdConfig {
        &self.config
    }

    /// Borrow the bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrow the bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Run one write cycle
    ///
    /// The data lines are released again once /WR is back up.
    pub fn write_register(&mut self, value: u8, register: Register) {
        let lines = BusLines::writing(register, value);

        self.bus.drive(lines);
        self.delay.delay_ns(self.config.timing.setup_ns);
        self.bus.drive(lines.with_write(true));
        self.delay.delay_ns(self.config.timing.write_pulse_ns);
        self.bus.drive(lines);
        self.bus.drive(BusLines::IDLE);
    }

    /// Run one read cycle and return D0..D7
    pub fn read_register(&mut self, register: Register) -> u8 {
        let lines = BusLines::reading(register);

        self.bus.drive(lines);
        self.delay.delay_ns(self.config.timing.setup_ns);
        self.bus.drive(lines.with_read(true));
        self.delay.delay_ns(self.config.timing.access_ns);
        let value = self.bus.sample();
        self.bus.drive(lines);
        self.bus.drive(BusLines::IDLE);

        value
    }

    /// Read and decode the status register
    pub fn status(&mut self) -> ControllerStatus {
        ControllerStatus::from_register(self.read_register(Register::Command))
    }

    /// Poll the status register until `ready` is set
    ///
    /// Auto-mode flags use the longer auto-mode ceiling.
    pub fn wait_ready(&mut self, ready: Ready) -> Result<(), BusTimeout> {
        let limit = match ready {
            Ready::Command | Ready::Data => self.config.poll_limit,
            Ready::AutoRead | Ready::AutoWrite => self.config.auto_poll_limit,
        };

        for _ in 0..limit {
            if self.status().is_ready(ready) {
                return Ok(());
            }
        }

        Err(BusTimeout::new(ready))
    }

    /// Wait for the register's ready flag, then write once
    pub fn poll_and_write(&mut self, register: Register, value: u8) -> Result<(), BusTimeout> {
        self.wait_ready(ready_flag(register))?;
        self.write_register(value, register);
        Ok(())
    }

    /// Wait for data-ready, then read the data register once
    pub fn poll_and_read(&mut self) -> Result<u8, BusTimeout> {
        self.wait_ready(Ready::Data)?;
        Ok(self.read_register(Register::Data))
    }

    /// Write one byte in auto-write mode, polling before it
    pub fn auto_write(&mut self, data: u8) -> Result<(), BusTimeout> {
        self.wait_ready(Ready::AutoWrite)?;
        self.write_register(data, Register::Data);
        Ok(())
    }

    /// Write one byte in auto-write mode without polling
    ///
    /// The caller must have seen auto-write-ready since entering auto mode.
    pub fn auto_write_unchecked(&mut self, data: u8) {
        self.write_register(data, Register::Data);
    }

    /// Initialize the controller and clear display RAM
    ///
    /// An auto mode left open by an earlier failure is closed first. Stops
    /// at the first timeout; the steps before it have been applied.
    pub fn initialize_display(&mut self) -> Result<(), BusTimeout> {
        let layout = self.config.layout;

        self.bus.release_reset();
        self.leave_auto_mode();

        self.command(cmd::SET_MODE | cmd::MODE_OR)?;
        self.command(
            cmd::DISPLAY_MODE
                | cmd::DISP_CURSOR
                | cmd::DISP_CURSOR_BLINK
                | cmd::DISP_TEXT
                | cmd::DISP_GRAPHICS,
        )?;
        self.command(cmd::cursor_lines(self.config.cursor_lines))?;
        self.command_2(cmd::CURSOR_POS, 0, 0)?;
        self.command_word(cmd::OFFSET_REGISTER, 0)?;

        self.command_word(cmd::TEXT_AREA, layout.text_columns)?;
        self.command_word(cmd::GRAPHIC_AREA, layout.graphic_columns)?;
        self.command_word(cmd::TEXT_HOME_ADDR, layout.text_home)?;
        self.command_word(cmd::GRAPHIC_HOME_ADDR, layout.graphic_home)?;
        self.command_2(cmd::OFFSET_REGISTER, layout.cgram_offset(), 0)?;

        self.clear_memory()
    }

    /// Zero every byte of display RAM
    ///
    /// Leaves the address pointer where the controller wraps it after the
    /// last byte, which is 0 for a full 64 Kbit part.
    pub fn clear_memory(&mut self) -> Result<(), BusTimeout> {
        self.command_word(cmd::ADDRESS_POINTER, 0)?;
        self.poll_and_write(Register::Command, cmd::AUTO_WRITE)?;

        for _ in 0..self.config.layout.ram_size {
            self.auto_write(0)?;
        }

        self.end_auto_write()
    }
}

/// Ready flag that gates a plain transfer to `register`
fn ready_flag(register: Register) -> Ready {
    match register {
        Register::Command => Ready::Command,
        Register::Data => Ready::Data,
    }
}

impl<B: ParallelBus, D: DelayNs> LcdController for T6963<B, D> {
    fn command(&mut self, opcode: u8) -> Result<(), BusTimeout> {
        self.poll_and_write(Register::Command, opcode)
    }

    fn command_1(&mut self, opcode: u8, data: u8) -> Result<(), BusTimeout> {
        self.poll_and_write(Register::Data, data)?;
        self.poll_and_write(Register::Command, opcode)
    }

    fn command_2(&mut self, opcode: u8, data1: u8, data2: u8) -> Result<(), BusTimeout> {
        self.poll_and_write(Register::Data, data1)?;
        self.poll_and_write(Register::Data, data2)?;
        self.poll_and_write(Register::Command, opcode)
    }

    fn command_read(&mut self, opcode: u8) -> Result<u8, BusTimeout> {
        self.poll_and_write(Register::Command, opcode)?;
        self.poll_and_read()
    }

    fn begin_auto_write(&mut self) -> Result<(), BusTimeout> {
        self.poll_and_write(Register::Command, cmd::AUTO_WRITE)?;
        self.wait_ready(Ready::AutoWrite)
    }

    fn bulk_write(&mut self, data: u8) -> Result<(), BusTimeout> {
        self.auto_write_unchecked(data);
        Ok(())
    }

    fn end_auto_write(&mut self) -> Result<(), BusTimeout> {
        // STA0/STA1 stay low in auto mode, so the reset is gated on STA3
        self.wait_ready(Ready::AutoWrite)?;
        self.write_register(cmd::AUTO_RESET, Register::Command);
        Ok(())
    }

    fn leave_auto_mode(&mut self) {
        let status = self.status();
        let auto = status.auto_read_ready || status.auto_write_ready;

        if auto && !status.command_ready && !status.data_ready {
            self.write_register(cmd::AUTO_RESET, Register::Command);
        }
    }

    fn initialize(&mut self) -> Result<(), BusTimeout> {
        self.initialize_display()
    }
}
