//! T6963 controller command set and status register
//!
//! Commands are written to the command register after their 0-2 data
//! bytes have been written to the data register. Every transfer must be
//! preceded by a status read showing the matching ready flag.

/// Controller opcodes
pub mod cmd {
    /// Cursor position (data: x, y)
    pub const CURSOR_POS: u8 = 0x21;
    /// Offset register (data: CG RAM base >> 11, 0)
    pub const OFFSET_REGISTER: u8 = 0x22;
    /// Address pointer (data: LSB, MSB)
    pub const ADDRESS_POINTER: u8 = 0x24;

    /// Text home address (data: LSB, MSB)
    pub const TEXT_HOME_ADDR: u8 = 0x40;
    /// Text area, columns per line (data: LSB, MSB)
    pub const TEXT_AREA: u8 = 0x41;
    /// Graphic home address (data: LSB, MSB)
    pub const GRAPHIC_HOME_ADDR: u8 = 0x42;
    /// Graphic area, bytes per line (data: LSB, MSB)
    pub const GRAPHIC_AREA: u8 = 0x43;

    /// Mode set, OR-ed with a `MODE_*` combination
    pub const SET_MODE: u8 = 0x80;
    pub const MODE_OR: u8 = 0x00;
    pub const MODE_EXOR: u8 = 0x01;
    pub const MODE_AND: u8 = 0x03;
    pub const MODE_TEXT_ATTRIB: u8 = 0x04;
    /// Use external character generator RAM for all codes
    pub const MODE_EXT_CG: u8 = 0x08;

    /// Display mode, OR-ed with `DISP_*` flags
    pub const DISPLAY_MODE: u8 = 0x90;
    pub const DISP_OFF: u8 = 0x00;
    pub const DISP_CURSOR_BLINK: u8 = 0x01;
    pub const DISP_CURSOR: u8 = 0x02;
    pub const DISP_TEXT: u8 = 0x04;
    pub const DISP_GRAPHICS: u8 = 0x08;

    /// Cursor pattern, OR-ed with (lines - 1)
    pub const CURSOR_PATTERN: u8 = 0xA0;

    /// Enter auto-write mode at the address pointer
    pub const AUTO_WRITE: u8 = 0xB0;
    /// Enter auto-read mode at the address pointer
    pub const AUTO_READ: u8 = 0xB1;
    /// Leave auto mode
    pub const AUTO_RESET: u8 = 0xB2;

    /// Data write, pointer += 1 (data: byte)
    pub const DATA_WRITE_INC: u8 = 0xC0;
    /// Data read, pointer += 1
    pub const DATA_READ_INC: u8 = 0xC1;
    /// Data write, pointer -= 1
    pub const DATA_WRITE_DEC: u8 = 0xC2;
    /// Data read, pointer -= 1
    pub const DATA_READ_DEC: u8 = 0xC3;
    /// Data write, pointer unchanged
    pub const DATA_WRITE: u8 = 0xC4;
    /// Data read, pointer unchanged
    pub const DATA_READ: u8 = 0xC5;

    /// Cursor pattern opcode for a cursor `lines` tall (1-8)
    pub const fn cursor_lines(lines: u8) -> u8 {
        CURSOR_PATTERN | (lines.saturating_sub(1) & 0x07)
    }
}

/// Status register bits
pub mod status {
    /// STA0: command execution capable
    pub const CMD_OK: u8 = 0x01;
    /// STA1: data read/write capable
    pub const DATA_OK: u8 = 0x02;
    /// STA2: auto mode data read capable
    pub const AUTO_READ_OK: u8 = 0x04;
    /// STA3: auto mode data write capable
    pub const AUTO_WRITE_OK: u8 = 0x08;
    /// STA5: controller operation capable
    pub const OPERATION: u8 = 0x20;
    /// STA6: error flag for screen peek/copy
    pub const ERROR: u8 = 0x40;
    /// STA7: blink condition
    pub const BLINK: u8 = 0x80;
}

/// Ready flag a transfer has to wait for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ready {
    /// Command register write
    Command,
    /// Data register read or write
    Data,
    /// Data read while in auto-read mode
    AutoRead,
    /// Data write while in auto-write mode
    AutoWrite,
}

impl Ready {
    /// Status register bit for this flag
    pub const fn mask(self) -> u8 {
        match self {
            Ready::Command => status::CMD_OK,
            Ready::Data => status::DATA_OK,
            Ready::AutoRead => status::AUTO_READ_OK,
            Ready::AutoWrite => status::AUTO_WRITE_OK,
        }
    }
}

/// Decoded status register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerStatus {
    /// Raw register value
    pub raw: u8,
    pub command_ready: bool,
    pub data_ready: bool,
    pub auto_read_ready: bool,
    pub auto_write_ready: bool,
    pub operation: bool,
    pub error: bool,
    pub blink: bool,
}

impl ControllerStatus {
    /// Parse from raw status register value
    pub const fn from_register(raw: u8) -> Self {
        Self {
            raw,
            command_ready: raw & status::CMD_OK != 0,
            data_ready: raw & status::DATA_OK != 0,
            auto_read_ready: raw & status::AUTO_READ_OK != 0,
            auto_write_ready: raw & status::AUTO_WRITE_OK != 0,
            operation: raw & status::OPERATION != 0,
            error: raw & status::ERROR != 0,
            blink: raw & status::BLINK != 0,
        }
    }

    /// Check whether `ready` is set
    pub const fn is_ready(&self, ready: Ready) -> bool {
        self.raw & ready.mask() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        let s = ControllerStatus::from_register(0x03);
        assert!(s.command_ready);
        assert!(s.data_ready);
        assert!(!s.auto_write_ready);
        assert!(s.is_ready(Ready::Command));
        assert!(s.is_ready(Ready::Data));
        assert!(!s.is_ready(Ready::AutoWrite));

        let s = ControllerStatus::from_register(0x08);
        assert!(s.auto_write_ready);
        assert!(!s.command_ready);

        let s = ControllerStatus::from_register(0xC0);
        assert!(s.error);
        assert!(s.blink);
        assert!(!s.operation);
    }

    #[test]
    fn test_status_all_clear() {
        let s = ControllerStatus::from_register(0);
        for ready in [Ready::Command, Ready::Data, Ready::AutoRead, Ready::AutoWrite] {
            assert!(!s.is_ready(ready));
        }
    }

    #[test]
    fn test_cursor_lines() {
        assert_eq!(cmd::cursor_lines(1), 0xA0);
        assert_eq!(cmd::cursor_lines(4), 0xA3);
        assert_eq!(cmd::cursor_lines(8), 0xA7);
    }
}
