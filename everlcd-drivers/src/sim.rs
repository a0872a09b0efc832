//! Simulated T6963 on the far side of a [`ParallelBus`]
//!
//! Decodes strobe edges the way the chip does: a write is latched when /WR
//! goes back up, a read presents its value while /RD is down. Only the
//! commands the bridge uses are modelled. Used by the unit tests here and by
//! host-side tests of anything generic over [`ParallelBus`].

use embedded_hal::delay::DelayNs;
use everlcd_core::controller::{cmd, status};
use everlcd_hal::{BusLines, ParallelBus, Register};
use heapless::Vec;

/// Display RAM of the simulated part (64 Kbit)
pub const RAM_SIZE: usize = 0x2000;

/// Commands kept in the command log
const LOG_DEPTH: usize = 32;

/// Delay that returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Simulated controller
pub struct SimController {
    ram: [u8; RAM_SIZE],
    pointer: u16,
    args: Vec<u8, 2>,
    read_latch: u8,
    output: u8,
    auto_write: bool,

    mode: u8,
    display_mode: u8,
    cursor_pattern: u8,
    cursor: (u8, u8),
    offset: u8,
    text_home: u16,
    text_area: u16,
    graphic_home: u16,
    graphic_area: u16,

    lines: BusLines,
    reset_released: bool,
    busy_polls: u32,
    hung: bool,
    auto_stalled: bool,
    contention: bool,

    command_writes: u32,
    data_writes: u32,
    status_reads: u32,
    log: Vec<u8, LOG_DEPTH>,
}

impl SimController {
    /// Create a controller that is ready on every poll
    pub fn new() -> Self {
        Self {
            ram: [0; RAM_SIZE],
            pointer: 0,
            args: Vec::new(),
            read_latch: 0,
            output: 0,
            auto_write: false,
            mode: 0,
            display_mode: 0,
            cursor_pattern: 0,
            cursor: (0, 0),
            offset: 0,
            text_home: 0,
            text_area: 0,
            graphic_home: 0,
            graphic_area: 0,
            lines: BusLines::IDLE,
            reset_released: false,
            busy_polls: 0,
            hung: false,
            auto_stalled: false,
            contention: false,
            command_writes: 0,
            data_writes: 0,
            status_reads: 0,
            log: Vec::new(),
        }
    }

    /// Report busy for the next `polls` status reads
    pub fn set_busy_polls(&mut self, polls: u32) {
        self.busy_polls = polls;
    }

    /// Never report ready again
    pub fn hang(&mut self) {
        self.hung = true;
    }

    /// Report ready again
    pub fn recover(&mut self) {
        self.hung = false;
        self.auto_stalled = false;
    }

    /// Accept commands but never raise the auto-write flag
    pub fn stall_auto_mode(&mut self) {
        self.auto_stalled = true;
    }

    /// Set every RAM byte to `value`
    pub fn fill(&mut self, value: u8) {
        self.ram.fill(value);
    }

    /// Set one RAM byte
    pub fn poke(&mut self, address: u16, value: u8) {
        self.ram[address as usize % RAM_SIZE] = value;
    }

    /// View `len` RAM bytes starting at `start`
    pub fn ram(&self, start: u16, len: usize) -> &[u8] {
        let start = start as usize;
        &self.ram[start..start + len]
    }

    /// Current address pointer
    pub fn address_pointer(&self) -> u16 {
        self.pointer
    }

    /// Whether auto-write mode is active
    pub fn in_auto_write(&self) -> bool {
        self.auto_write
    }

    /// Last mode-set command
    pub fn mode(&self) -> u8 {
        self.mode
    }

    /// Last display-mode command
    pub fn display_mode(&self) -> u8 {
        self.display_mode
    }

    /// Last cursor-pattern command
    pub fn cursor_pattern(&self) -> u8 {
        self.cursor_pattern
    }

    /// Cursor position as (column, row)
    pub fn cursor_position(&self) -> (u8, u8) {
        self.cursor
    }

    /// Offset register (CG RAM base >> 11)
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Text home address
    pub fn text_home(&self) -> u16 {
        self.text_home
    }

    /// Text area width in bytes
    pub fn text_area(&self) -> u16 {
        self.text_area
    }

    /// Graphic home address
    pub fn graphic_home(&self) -> u16 {
        self.graphic_home
    }

    /// Graphic area width in bytes
    pub fn graphic_area(&self) -> u16 {
        self.graphic_area
    }

    /// Whether /RES has been released
    pub fn reset_released(&self) -> bool {
        self.reset_released
    }

    /// Whether the host ever drove D0..D7 while /RD was asserted
    pub fn contention(&self) -> bool {
        self.contention
    }

    /// Command register writes, auto mode included
    pub fn command_writes(&self) -> u32 {
        self.command_writes
    }

    /// Data register writes, auto mode included
    pub fn data_writes(&self) -> u32 {
        self.data_writes
    }

    /// Status register reads
    pub fn status_reads(&self) -> u32 {
        self.status_reads
    }

    /// First commands written since creation
    pub fn command_log(&self) -> &[u8] {
        &self.log
    }

    fn status_register(&mut self) -> u8 {
        self.status_reads += 1;

        if self.hung {
            return 0;
        }
        if self.busy_polls > 0 {
            self.busy_polls -= 1;
            return 0;
        }

        if self.auto_write {
            if self.auto_stalled {
                0
            } else {
                status::AUTO_WRITE_OK
            }
        } else {
            status::CMD_OK | status::DATA_OK
        }
    }

    fn latch_write(&mut self, register: Register, value: u8) {
        match register {
            Register::Data => {
                self.data_writes += 1;
                if self.auto_write {
                    self.store(value);
                } else {
                    if self.args.is_full() {
                        self.args.remove(0);
                    }
                    let _ = self.args.push(value);
                }
            }
            Register::Command => {
                self.command_writes += 1;
                let _ = self.log.push(value);
                self.execute(value);
                self.args.clear();
            }
        }
    }

    fn execute(&mut self, opcode: u8) {
        if self.auto_write {
            if opcode == cmd::AUTO_RESET {
                self.auto_write = false;
            }
            return;
        }

        let a0 = self.args.first().copied().unwrap_or(0);
        let a1 = self.args.get(1).copied().unwrap_or(0);
        let word = u16::from_le_bytes([a0, a1]);

        match opcode {
            cmd::CURSOR_POS => self.cursor = (a0, a1),
            cmd::OFFSET_REGISTER => self.offset = a0,
            cmd::ADDRESS_POINTER => self.pointer = word % RAM_SIZE as u16,
            cmd::TEXT_HOME_ADDR => self.text_home = word,
            cmd::TEXT_AREA => self.text_area = word,
            cmd::GRAPHIC_HOME_ADDR => self.graphic_home = word,
            cmd::GRAPHIC_AREA => self.graphic_area = word,
            0x80..=0x8F => self.mode = opcode,
            0x90..=0x9F => self.display_mode = opcode,
            0xA0..=0xA7 => self.cursor_pattern = opcode,
            cmd::AUTO_WRITE => self.auto_write = true,
            cmd::DATA_WRITE_INC => {
                let value = self.args.last().copied().unwrap_or(0);
                self.store(value);
            }
            cmd::DATA_READ_INC => {
                self.read_latch = self.ram[self.pointer as usize];
                self.advance();
            }
            _ => {}
        }
    }

    fn store(&mut self, value: u8) {
        self.ram[self.pointer as usize] = value;
        self.advance();
    }

    fn advance(&mut self) {
        self.pointer = (self.pointer + 1) % RAM_SIZE as u16;
    }
}

impl Default for SimController {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelBus for SimController {
    fn drive(&mut self, lines: BusLines) {
        let prev = self.lines;

        if lines.read && lines.data.is_some() {
            self.contention = true;
        }

        if prev.write && !lines.write {
            // Floating lines read back as all ones
            self.latch_write(prev.register, prev.data.unwrap_or(0xFF));
        }

        if !prev.read && lines.read {
            self.output = match lines.register {
                Register::Command => self.status_register(),
                Register::Data => self.read_latch,
            };
        }

        self.lines = lines;
    }

    fn sample(&mut self) -> u8 {
        if self.lines.read {
            self.output
        } else {
            0xFF
        }
    }

    fn release_reset(&mut self) {
        self.reset_released = true;
    }
}
