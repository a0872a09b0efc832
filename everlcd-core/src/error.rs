//! Bus error type

use crate::controller::Ready;

/// The controller never reported `ready` within the poll ceiling
///
/// No transfer was issued. This is the only error the bus protocol raises;
/// it is never retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTimeout {
    /// Flag that was being waited for
    pub ready: Ready,
}

impl BusTimeout {
    pub const fn new(ready: Ready) -> Self {
        Self { ready }
    }
}
