//! Configuration type definitions
//!
//! One [`LcdConfig`] covers every board variant: bus timing, poll limits,
//! memory layout, initial cursor shape and the serial link.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::layout::{MemoryLayout, Region};

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Character generator base is not a multiple of 0x800
    CgramMisaligned,
    /// Region is empty or extends past the end of RAM
    RegionOutOfRange(Region),
    /// Two regions share addresses
    RegionOverlap(Region, Region),
    /// RAM size is zero or larger than the 16-bit address space
    RamSize,
    /// A poll ceiling of zero would fail every transfer
    ZeroPollLimit,
    /// Cursor height outside 1-8 lines
    CursorLines,
    /// Baud rate of zero
    Baudrate,
}

/// Bus timing in nanoseconds
///
/// Datasheet minimums: C/D setup 100 ns, /WR pulse 80 ns, /RD to data
/// valid 150 ns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BusTiming {
    /// C/D and data setup before a strobe
    pub setup_ns: u32,
    /// /WR low time
    pub write_pulse_ns: u32,
    /// /RD low to data valid
    pub access_ns: u32,
}

impl BusTiming {
    pub const fn new() -> Self {
        Self {
            setup_ns: 100,
            write_pulse_ns: 80,
            access_ns: 150,
        }
    }
}

impl Default for BusTiming {
    fn default() -> Self {
        Self::new()
    }
}

/// Serial command channel settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerialConfig {
    /// Baud rate in bits per second (8N1)
    pub baudrate: u32,
    /// Return a half-received command to idle after this much silence
    ///
    /// 0 disables the timeout; the interpreter then waits indefinitely
    /// for the rest of a multi-byte command.
    pub resync_timeout_ms: u32,
}

impl SerialConfig {
    pub const fn new() -> Self {
        Self {
            baudrate: 9600,
            resync_timeout_ms: 0,
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete bridge configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LcdConfig {
    /// Strobe timing
    pub timing: BusTiming,
    /// Status polls before a register transfer gives up
    pub poll_limit: u32,
    /// Status polls before an auto-mode transfer gives up
    pub auto_poll_limit: u32,
    /// RAM layout programmed at initialization
    pub layout: MemoryLayout,
    /// Cursor height programmed at initialization (1-8 lines)
    pub cursor_lines: u8,
    /// Serial link
    pub serial: SerialConfig,
}

impl LcdConfig {
    pub const fn new() -> Self {
        Self {
            timing: BusTiming::new(),
            poll_limit: 256,
            auto_poll_limit: 65_536,
            layout: MemoryLayout::new(),
            cursor_lines: 4,
            serial: SerialConfig::new(),
        }
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_limit == 0 || self.auto_poll_limit == 0 {
            return Err(ConfigError::ZeroPollLimit);
        }
        if !(1..=8).contains(&self.cursor_lines) {
            return Err(ConfigError::CursorLines);
        }
        if self.serial.baudrate == 0 {
            return Err(ConfigError::Baudrate);
        }
        self.layout.validate()
    }
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LcdConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.poll_limit, 256);
        assert_eq!(config.serial.baudrate, 9600);
        assert_eq!(config.serial.resync_timeout_ms, 0);
    }

    #[test]
    fn test_zero_poll_limit() {
        let config = LcdConfig {
            poll_limit: 0,
            ..LcdConfig::new()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollLimit));

        let config = LcdConfig {
            auto_poll_limit: 0,
            ..LcdConfig::new()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollLimit));
    }

    #[test]
    fn test_cursor_lines_range() {
        for lines in [0u8, 9, 255] {
            let config = LcdConfig {
                cursor_lines: lines,
                ..LcdConfig::new()
            };
            assert_eq!(config.validate(), Err(ConfigError::CursorLines));
        }
        for lines in 1..=8u8 {
            let config = LcdConfig {
                cursor_lines: lines,
                ..LcdConfig::new()
            };
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn test_layout_errors_propagate() {
        let mut config = LcdConfig::new();
        config.layout.cgram_base = 0x0400;
        assert_eq!(config.validate(), Err(ConfigError::CgramMisaligned));
    }
}
