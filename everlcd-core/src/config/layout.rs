//! Controller RAM layout
//!
//! The external RAM is split into a text region, a graphic region and the
//! character generator block. Default layout for a 240x64 panel with a
//! 6-pixel font (40 columns):
//!
//! ```text
//! 0x0000 ..0x013f  text, 40 columns x 8 rows
//! 0x0140 ..0x0b3f  graphics, 40 bytes x 64 lines
//! 0x1800 ..0x1fff  character generator RAM
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::ConfigError;

/// Size of the character generator block addressed by the offset register
pub const CGRAM_BLOCK: u32 = 0x800;

/// Memory region of controller RAM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Region {
    Text,
    Graphic,
    CharGen,
}

/// Base addresses and sizes of the RAM regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MemoryLayout {
    /// Text home address
    pub text_home: u16,
    /// Text area: characters per line
    pub text_columns: u16,
    /// Text lines
    pub text_rows: u16,
    /// Graphic home address
    pub graphic_home: u16,
    /// Graphic area: bytes per pixel line
    pub graphic_columns: u16,
    /// Pixel lines
    pub graphic_lines: u16,
    /// Character generator RAM base (multiple of 0x800)
    pub cgram_base: u16,
    /// Total external RAM in bytes
    pub ram_size: u32,
}

impl MemoryLayout {
    /// Layout of the 240x64 reference panel with 8 KiB RAM
    pub const fn new() -> Self {
        Self {
            text_home: 0x0000,
            text_columns: 40,
            text_rows: 8,
            graphic_home: 0x0140,
            graphic_columns: 40,
            graphic_lines: 64,
            cgram_base: 0x1800,
            ram_size: 0x2000,
        }
    }

    /// Address range `[start, end)` of a region
    pub const fn span(&self, region: Region) -> (u32, u32) {
        match region {
            Region::Text => {
                let start = self.text_home as u32;
                (start, start + self.text_columns as u32 * self.text_rows as u32)
            }
            Region::Graphic => {
                let start = self.graphic_home as u32;
                (
                    start,
                    start + self.graphic_columns as u32 * self.graphic_lines as u32,
                )
            }
            Region::CharGen => {
                let start = self.cgram_base as u32;
                (start, start + CGRAM_BLOCK)
            }
        }
    }

    /// Value programmed into the offset register
    pub const fn cgram_offset(&self) -> u8 {
        (self.cgram_base >> 11) as u8
    }

    /// Check alignment, bounds and overlap of all regions
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ram_size == 0 || self.ram_size > 0x1_0000 {
            return Err(ConfigError::RamSize);
        }

        if self.cgram_base as u32 % CGRAM_BLOCK != 0 {
            return Err(ConfigError::CgramMisaligned);
        }

        const REGIONS: [Region; 3] = [Region::Text, Region::Graphic, Region::CharGen];

        for region in REGIONS {
            let (start, end) = self.span(region);
            if end > self.ram_size || end == start {
                return Err(ConfigError::RegionOutOfRange(region));
            }
        }

        for (i, a) in REGIONS.iter().enumerate() {
            for b in &REGIONS[i + 1..] {
                let (a_start, a_end) = self.span(*a);
                let (b_start, b_end) = self.span(*b);
                if a_start < b_end && b_start < a_end {
                    return Err(ConfigError::RegionOverlap(*a, *b));
                }
            }
        }

        Ok(())
    }

    /// Address of text cell (`col`, `row`)
    pub const fn text_address(&self, col: u16, row: u16) -> u16 {
        self.text_home
            .wrapping_add(row.wrapping_mul(self.text_columns))
            .wrapping_add(col)
    }

    /// Address of the first byte of pixel line `line`
    pub const fn graphic_address(&self, line: u16) -> u16 {
        self.graphic_home
            .wrapping_add(line.wrapping_mul(self.graphic_columns))
    }
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self::new()
    }
}
