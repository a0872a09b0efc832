//! Serial byte stream to controller bridge
//!
//! Pairs the protocol interpreter with an [`LcdController`]. Each received
//! byte is stepped through the interpreter and the resulting action is run
//! against the controller straight away.

use everlcd_core::controller::cmd;
use everlcd_core::traits::LcdController;
use everlcd_core::{BusTimeout, Ready};
use everlcd_protocol::{Action, Interpreter, State};

/// Command bridge
pub struct Bridge<C> {
    interpreter: Interpreter,
    controller: C,
    /// Auto-write-ready was seen since the current bulk transfer began
    bulk_armed: bool,
}

impl<C: LcdController> Bridge<C> {
    /// Create a bridge in the idle state
    ///
    /// The controller is not initialized here; call [`reset`](Self::reset)
    /// once the bus is up.
    pub fn new(controller: C) -> Self {
        Self {
            interpreter: Interpreter::new(),
            controller,
            bulk_armed: false,
        }
    }

    /// Process one received byte
    ///
    /// Returns the byte to send back to the host, if any. On a timeout the
    /// interpreter has already moved on, so the next byte is decoded as if
    /// the failed operation had completed. Bulk bytes following a failed
    /// bulk start are dropped and each one reports the timeout.
    pub fn feed(&mut self, byte: u8) -> Result<Option<u8>, BusTimeout> {
        match self.interpreter.feed(byte) {
            Some(action) => self.execute(action),
            None => Ok(None),
        }
    }

    /// Drop any partial command and re-initialize the controller
    pub fn reset(&mut self) -> Result<(), BusTimeout> {
        self.interpreter.reset();
        self.bulk_armed = false;
        self.controller.initialize()
    }

    /// Drop any partial command without re-initializing the controller
    ///
    /// A bulk transfer cut short still has the controller in auto-write
    /// mode, which is closed before returning to idle.
    pub fn resync(&mut self) -> Result<(), BusTimeout> {
        let state = self.interpreter.state();
        let armed = core::mem::take(&mut self.bulk_armed);
        self.interpreter.reset();

        match state {
            State::AwaitingBulkCount | State::AwaitingBulkByte { .. } if armed => {
                self.controller.end_auto_write()
            }
            State::AwaitingBulkCount | State::AwaitingBulkByte { .. } => {
                self.controller.leave_auto_mode();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Current interpreter state
    pub fn state(&self) -> State {
        self.interpreter.state()
    }

    /// Borrow the controller
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Mutably borrow the controller
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    fn execute(&mut self, action: Action) -> Result<Option<u8>, BusTimeout> {
        let c = &mut self.controller;

        match action {
            Action::Write(byte) => c.command_1(cmd::DATA_WRITE_INC, byte)?,
            Action::Echo(byte) => return Ok(Some(byte)),
            Action::SetAddress(address) => c.command_word(cmd::ADDRESS_POINTER, address)?,
            Action::ReadData => return c.command_read(cmd::DATA_READ_INC).map(Some),
            Action::Reset => c.initialize()?,
            Action::SetMode(bits) => c.command(cmd::SET_MODE | bits)?,
            Action::SetDisplay(bits) => c.command(cmd::DISPLAY_MODE | bits)?,
            Action::SetCursorPattern(bits) => c.command(cmd::CURSOR_PATTERN | bits)?,
            Action::BeginBulk => {
                let started = c.begin_auto_write();
                self.bulk_armed = started.is_ok();
                started?
            }
            Action::BulkWrite { last, .. } if !self.bulk_armed => {
                // The AUTO_WRITE command may still have gone through
                if last {
                    c.leave_auto_mode();
                }
                return Err(BusTimeout::new(Ready::AutoWrite));
            }
            Action::BulkWrite { byte, last } => {
                let written = c.bulk_write(byte);
                if last {
                    self.bulk_armed = false;
                    // Leave auto mode even when the byte itself failed
                    let closed = c.end_auto_write();
                    written.and(closed)?;
                } else {
                    written?;
                }
            }
            Action::MoveCursor { x, y } => c.command_2(cmd::CURSOR_POS, x, y)?,
        }

        Ok(None)
    }
}
