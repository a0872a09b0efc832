//! Busy-wait delay for bus timing
//!
//! The T6963 timings are tens to hundreds of nanoseconds, well below the
//! embassy timer tick, so the bus waits by burning CPU cycles.

use embedded_hal::delay::DelayNs;

/// Default RP2040 system clock
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Delay that spins for a computed number of core cycles
#[derive(Debug, Clone, Copy)]
pub struct CycleDelay {
    sys_clk_hz: u32,
}

impl CycleDelay {
    pub const fn new(sys_clk_hz: u32) -> Self {
        Self { sys_clk_hz }
    }

    /// Cycles needed to cover `ns`, rounded up, at least one
    pub const fn cycles(&self, ns: u32) -> u32 {
        let cycles = (ns as u64 * self.sys_clk_hz as u64).div_ceil(1_000_000_000);
        if cycles == 0 {
            1
        } else if cycles > u32::MAX as u64 {
            u32::MAX
        } else {
            cycles as u32
        }
    }
}

impl Default for CycleDelay {
    fn default() -> Self {
        Self::new(SYS_CLK_HZ)
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        cortex_m::asm::delay(self.cycles(ns));
    }
}
