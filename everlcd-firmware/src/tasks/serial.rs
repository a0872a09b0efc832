//! Serial command task
//!
//! Owns the UART and the bridge. Every received byte goes straight through
//! the interpreter to the controller; reply bytes go back over the same
//! UART.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::uart::BufferedUart;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, Write};

use everlcd_drivers::{Bridge, T6963};
use everlcd_hal_rp2040::{CycleDelay, RpPinBus};

/// Bridge as wired on the board
pub type LcdBridge = Bridge<T6963<RpPinBus<'static>, CycleDelay>>;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Serial task - decodes host bytes and drives the display
///
/// `_chip_enable` holds /CE low for as long as the task runs.
#[embassy_executor::task]
pub async fn serial_task(
    mut uart: BufferedUart,
    mut bridge: LcdBridge,
    _chip_enable: Output<'static>,
) {
    info!("Serial task started");

    let resync_ms = bridge.controller().config().serial.resync_timeout_ms;
    let resync_after = (resync_ms > 0).then(|| Duration::from_millis(resync_ms as u64));
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let read = match resync_after {
            Some(timeout) if bridge.state().is_partial() => {
                match with_timeout(timeout, uart.read(&mut buf)).await {
                    Ok(read) => read,
                    Err(_) => {
                        warn!("Partial command timed out in {:?}, resyncing", bridge.state());
                        if let Err(e) = bridge.resync() {
                            warn!("Controller timeout closing auto mode: {:?}", e.ready);
                        }
                        continue;
                    }
                }
            }
            _ => uart.read(&mut buf).await,
        };

        let n = match read {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        trace!("RX: {} bytes", n);

        for &byte in &buf[..n] {
            match bridge.feed(byte) {
                Ok(Some(reply)) => {
                    trace!("TX: {=u8:#x}", reply);
                    if let Err(e) = uart.write_all(&[reply]).await {
                        warn!("UART write error: {:?}", e);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        "Controller timeout waiting for {:?} on byte {=u8:#x}",
                        e.ready, byte
                    );
                }
            }
        }
    }
}
