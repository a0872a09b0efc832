//! Hardware abstraction traits
//!
//! These traits define the interface between the command bridge and the
//! bus-level controller driver.

pub mod controller;

pub use controller::LcdController;
