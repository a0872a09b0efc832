//! Board configuration
//!
//! `LCD_CONFIG` is generated by build.rs from board.toml, which has already
//! been checked with `LcdConfig::validate` at build time.

use everlcd_core::config::{BusTiming, LcdConfig, MemoryLayout, SerialConfig};

include!(concat!(env!("OUT_DIR"), "/lcd_config.rs"));
