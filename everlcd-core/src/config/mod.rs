//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware generates an
//! [`LcdConfig`] constant from `board.toml` at build time.

pub mod layout;
pub mod types;

pub use layout::*;
pub use types::*;
