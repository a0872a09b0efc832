//! everlcd - serial to T6963 LCD bridge
//!
//! Firmware for an RP2040 sitting between a host serial port and a
//! T6963-based graphic LCD. The host sends the byte protocol from
//! `everlcd-protocol` over UART0; the firmware bit-bangs the LCD's parallel
//! bus.
//!
//! # Wiring
//!
//! | Signal | GPIO |
//! |--------|------|
//! | UART0 TX / RX | 0 / 1 |
//! | D0..D7 | 2..9 |
//! | C/D | 10 |
//! | /WR | 11 |
//! | /RD | 12 |
//! | /RES | 13 |
//! | /CE | 14 (held low) |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::Peri;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use everlcd_drivers::{Bridge, T6963};
use everlcd_hal_rp2040::{pin_bus, CycleDelay};

use crate::config::LCD_CONFIG;

mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// A full bulk transfer is 258 bytes; keep it all buffered while the bus is busy
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("everlcd firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = LCD_CONFIG;
    let layout = &config.layout;
    info!(
        "Layout: text {=u16:#x} ({}x{}), graphic {=u16:#x} ({}x{}), CG {=u16:#x}",
        layout.text_home,
        layout.text_columns,
        layout.text_rows,
        layout.graphic_home,
        layout.graphic_columns,
        layout.graphic_lines,
        layout.cgram_base
    );

    let chip_enable = Output::new(p.PIN_14, Level::Low);

    let data: [Peri<'static, AnyPin>; 8] = [
        p.PIN_2.into(),
        p.PIN_3.into(),
        p.PIN_4.into(),
        p.PIN_5.into(),
        p.PIN_6.into(),
        p.PIN_7.into(),
        p.PIN_8.into(),
        p.PIN_9.into(),
    ];
    let bus = pin_bus(
        data,
        p.PIN_10.into(),
        p.PIN_11.into(),
        p.PIN_12.into(),
        p.PIN_13.into(),
    );

    let mut bridge = Bridge::new(T6963::new(bus, CycleDelay::default(), config));

    // Best effort: a dead panel must not stop the serial link
    match bridge.reset() {
        Ok(()) => info!("Display initialized"),
        Err(e) => warn!("Display init timed out waiting for {:?}", e.ready),
    }

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.serial.baudrate;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 512]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);

    info!("UART initialized at {} baud", config.serial.baudrate);

    spawner
        .spawn(tasks::serial_task(uart, bridge, chip_enable))
        .unwrap();

    info!("Bridge running");
}
