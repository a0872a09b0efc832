//! Protocol byte values

/// Ignored
pub const NOP: u8 = 0x00;
/// Write the next byte verbatim
pub const WRITE: u8 = 0x01;
/// Echo the next byte
pub const ECHO: u8 = 0x02;
/// Set the address pointer from the next two bytes (LSB first)
pub const ADDRESS: u8 = 0x03;
/// Read one byte at the pointer
pub const READ: u8 = 0x04;
/// Re-initialize the controller
pub const RESET: u8 = 0x05;
/// Mode set from the next byte
pub const MODE: u8 = 0x06;
/// Display mode from the next byte
pub const DISPLAY: u8 = 0x07;
/// Cursor pattern from the next byte
pub const CURSOR: u8 = 0x08;
/// Bulk write: count byte, then that many data bytes
pub const BULK: u8 = 0x09;
/// Cursor position from the next two bytes (x, y)
pub const CURSOR_POS: u8 = 0x0A;

/// First text byte; text is stored as `byte - TEXT_BASE`
pub const TEXT_BASE: u8 = 0x20;

/// Bits of the mode argument that are forwarded
pub const MODE_MASK: u8 = 0x07;
/// Bits of the display argument that are forwarded
pub const DISPLAY_MASK: u8 = 0x0F;
/// Bits of the cursor argument that are forwarded
pub const CURSOR_MASK: u8 = 0x07;

/// Largest bulk transfer (count byte 0)
pub const MAX_BULK: usize = 256;
