//! Host-side request encoding
//!
//! Builds the byte stream for the bridge from typed requests, and packs
//! pixel rows into the byte format the graphic area expects.

use heapless::Vec;

use crate::opcode;

/// Largest encoded request (bulk prefix, count and 256 data bytes)
pub const MAX_REQUEST_SIZE: usize = 2 + opcode::MAX_BULK;

/// Errors that can occur while encoding a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Output buffer cannot hold the request
    BufferTooSmall,
    /// Text contains a byte below 0x20, which would start a command
    InvalidText,
    /// Bulk payload must be 1-256 bytes
    BulkLength,
    /// Cursor height must be 1-8 lines
    CursorLines,
    /// Font width must be 6 or 8 pixels
    FontWidth,
}

/// A single request to the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// Text bytes, each written as `byte - 0x20`
    Text(&'a [u8]),
    /// One byte written verbatim
    Raw(u8),
    /// Ask the bridge to send a byte back
    Echo(u8),
    /// Move the address pointer
    SetAddress(u16),
    /// Read one byte at the pointer
    Read,
    /// Re-initialize the controller
    Reset,
    /// Mode set bits
    SetMode(u8),
    /// Display mode bits
    SetDisplay(u8),
    /// Cursor height in lines (1-8)
    CursorLines(u8),
    /// Auto-write 1-256 bytes at the pointer
    Bulk(&'a [u8]),
    /// Cursor position
    MoveCursor { x: u8, y: u8 },
}

impl Request<'_> {
    /// Number of bytes this request encodes to
    pub fn encoded_len(&self) -> usize {
        match self {
            Request::Text(text) => text.len(),
            Request::Read | Request::Reset => 1,
            Request::Raw(_)
            | Request::Echo(_)
            | Request::SetMode(_)
            | Request::SetDisplay(_)
            | Request::CursorLines(_) => 2,
            Request::SetAddress(_) | Request::MoveCursor { .. } => 3,
            Request::Bulk(data) => 2 + data.len(),
        }
    }

    /// Encode this request into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        self.check()?;

        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(EncodeError::BufferTooSmall);
        }

        match *self {
            Request::Text(text) => buffer[..len].copy_from_slice(text),
            Request::Raw(b) => buffer[..2].copy_from_slice(&[opcode::WRITE, b]),
            Request::Echo(b) => buffer[..2].copy_from_slice(&[opcode::ECHO, b]),
            Request::SetAddress(addr) => {
                let [lo, hi] = addr.to_le_bytes();
                buffer[..3].copy_from_slice(&[opcode::ADDRESS, lo, hi]);
            }
            Request::Read => buffer[0] = opcode::READ,
            Request::Reset => buffer[0] = opcode::RESET,
            Request::SetMode(bits) => buffer[..2].copy_from_slice(&[opcode::MODE, bits]),
            Request::SetDisplay(bits) => buffer[..2].copy_from_slice(&[opcode::DISPLAY, bits]),
            Request::CursorLines(lines) => {
                buffer[..2].copy_from_slice(&[opcode::CURSOR, lines - 1]);
            }
            Request::Bulk(data) => {
                buffer[0] = opcode::BULK;
                // 256 wraps to the count byte 0
                buffer[1] = data.len() as u8;
                buffer[2..len].copy_from_slice(data);
            }
            Request::MoveCursor { x, y } => {
                buffer[..3].copy_from_slice(&[opcode::CURSOR_POS, x, y]);
            }
        }

        Ok(len)
    }

    /// Encode this request into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_REQUEST_SIZE>, EncodeError> {
        let mut buffer = [0u8; MAX_REQUEST_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| EncodeError::BufferTooSmall)?;
        Ok(vec)
    }

    fn check(&self) -> Result<(), EncodeError> {
        match self {
            Request::Text(text) if text.iter().any(|&b| b < opcode::TEXT_BASE) => {
                Err(EncodeError::InvalidText)
            }
            Request::Bulk(data) if data.is_empty() || data.len() > opcode::MAX_BULK => {
                Err(EncodeError::BulkLength)
            }
            Request::CursorLines(lines) if !(1..=8).contains(lines) => {
                Err(EncodeError::CursorLines)
            }
            _ => Ok(()),
        }
    }
}

/// Pack a row of pixels into graphic area bytes
///
/// Each output byte holds `font_width` (6 or 8) pixels, leftmost pixel in
/// the most significant used bit. A trailing partial byte is padded with
/// unset pixels. Returns the number of bytes written.
pub fn pack_pixels(pixels: &[bool], font_width: u8, out: &mut [u8]) -> Result<usize, EncodeError> {
    if font_width != 6 && font_width != 8 {
        return Err(EncodeError::FontWidth);
    }

    let width = font_width as usize;
    let len = pixels.len().div_ceil(width);
    if out.len() < len {
        return Err(EncodeError::BufferTooSmall);
    }

    for (chunk, byte) in pixels.chunks(width).zip(out.iter_mut()) {
        *byte = chunk.iter().enumerate().fold(0u8, |acc, (i, &set)| {
            if set {
                acc | (1 << (width - 1 - i))
            } else {
                acc
            }
        });
    }

    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{Action, Interpreter};
    use proptest::prelude::*;

    fn decode(bytes: &[u8]) -> std::vec::Vec<Action> {
        let mut interp = Interpreter::new();
        let actions = bytes.iter().filter_map(|&b| interp.feed(b)).collect();
        assert!(interp.is_idle());
        actions
    }

    #[test]
    fn test_encode_text() {
        let encoded = Request::Text(b"Hello.").encode_to_vec().unwrap();
        assert_eq!(&encoded[..], b"Hello.");
    }

    #[test]
    fn test_encode_rejects_control_text() {
        let result = Request::Text(b"a\x05b").encode_to_vec();
        assert_eq!(result, Err(EncodeError::InvalidText));
    }

    #[test]
    fn test_encode_address() {
        let mut buffer = [0u8; 3];
        let len = Request::SetAddress(0x0140).encode(&mut buffer).unwrap();
        assert_eq!(len, 3);
        assert_eq!(buffer, [opcode::ADDRESS, 0x40, 0x01]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buffer = [0u8; 2];
        assert_eq!(
            Request::MoveCursor { x: 27, y: 2 }.encode(&mut buffer),
            Err(EncodeError::BufferTooSmall)
        );
    }

    #[test]
    fn test_encode_cursor_lines() {
        let encoded = Request::CursorLines(8).encode_to_vec().unwrap();
        assert_eq!(&encoded[..], &[opcode::CURSOR, 7]);
        assert_eq!(
            Request::CursorLines(0).encode_to_vec(),
            Err(EncodeError::CursorLines)
        );
        assert_eq!(
            Request::CursorLines(9).encode_to_vec(),
            Err(EncodeError::CursorLines)
        );
    }

    #[test]
    fn test_encode_bulk_limits() {
        assert_eq!(Request::Bulk(&[]).encode_to_vec(), Err(EncodeError::BulkLength));
        assert_eq!(
            Request::Bulk(&[0u8; 257]).encode_to_vec(),
            Err(EncodeError::BulkLength)
        );

        let full = Request::Bulk(&[0xAB; 256]).encode_to_vec().unwrap();
        assert_eq!(full.len(), MAX_REQUEST_SIZE);
        assert_eq!(full[0], opcode::BULK);
        assert_eq!(full[1], 0);
    }

    #[test]
    fn test_script_decodes_to_expected_actions() {
        // Display setup as a host would send it after power-up
        let requests = [
            Request::Reset,
            Request::SetDisplay(0x0F),
            Request::SetMode(0x01),
            Request::SetAddress(0x0140),
            Request::Bulk(&[0x3F, 0x00]),
            Request::MoveCursor { x: 27, y: 2 },
            Request::Echo(0x42),
        ];

        let mut stream: Vec<u8, 64> = Vec::new();
        for request in &requests {
            stream
                .extend_from_slice(&request.encode_to_vec().unwrap())
                .unwrap();
        }

        assert_eq!(
            decode(&stream),
            [
                Action::Reset,
                Action::SetDisplay(0x0F),
                Action::SetMode(0x01),
                Action::SetAddress(0x0140),
                Action::BeginBulk,
                Action::BulkWrite { byte: 0x3F, last: false },
                Action::BulkWrite { byte: 0x00, last: true },
                Action::MoveCursor { x: 27, y: 2 },
                Action::Echo(0x42),
            ]
        );
    }

    #[test]
    fn test_pack_pixels_font6() {
        // 240 pixels per line -> 40 bytes of 6 pixels
        let mut row = [false; 12];
        row[0] = true; // bit 5 of byte 0
        row[5] = true; // bit 0 of byte 0
        row[6] = true; // bit 5 of byte 1
        let mut out = [0u8; 2];
        assert_eq!(pack_pixels(&row, 6, &mut out), Ok(2));
        assert_eq!(out, [0b10_0001, 0b10_0000]);
    }

    #[test]
    fn test_pack_pixels_partial_byte() {
        let row = [true; 10];
        let mut out = [0u8; 2];
        assert_eq!(pack_pixels(&row, 8, &mut out), Ok(2));
        assert_eq!(out, [0xFF, 0b1100_0000]);
    }

    #[test]
    fn test_pack_pixels_errors() {
        let mut out = [0u8; 1];
        assert_eq!(pack_pixels(&[true; 6], 7, &mut out), Err(EncodeError::FontWidth));
        assert_eq!(
            pack_pixels(&[true; 7], 6, &mut out),
            Err(EncodeError::BufferTooSmall)
        );
    }

    proptest! {
        #[test]
        fn prop_bulk_encoding_is_decoded_verbatim(
            data in proptest::collection::vec(any::<u8>(), 1..=256)
        ) {
            let encoded = Request::Bulk(&data).encode_to_vec().unwrap();
            let actions = decode(&encoded);
            prop_assert_eq!(actions.len(), data.len() + 1);
            prop_assert_eq!(actions[0], Action::BeginBulk);
            for (i, (action, byte)) in actions[1..].iter().zip(&data).enumerate() {
                let expected = Action::BulkWrite { byte: *byte, last: i + 1 == data.len() };
                prop_assert_eq!(*action, expected);
            }
        }

        #[test]
        fn prop_font6_bytes_stay_in_six_bits(
            pixels in proptest::collection::vec(any::<bool>(), 0..240)
        ) {
            let mut out = [0u8; 40];
            let len = pack_pixels(&pixels, 6, &mut out).unwrap();
            prop_assert_eq!(len, pixels.len().div_ceil(6));
            prop_assert!(out[..len].iter().all(|b| b & 0xC0 == 0));
        }
    }
}
