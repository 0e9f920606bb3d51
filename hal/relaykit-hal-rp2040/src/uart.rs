//! Blocking UART console
//!
//! Transmit-only: the debug console never reads.

use embassy_rp::uart::{self, Blocking, Instance, TxPin};
use embassy_rp::Peri;

use relaykit_hal::{UartConfig, UartTx};

/// Console on a blocking UART transmitter
pub struct RpConsole<'d> {
    tx: uart::UartTx<'d, Blocking>,
}

impl<'d> RpConsole<'d> {
    pub fn new(tx: uart::UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl UartTx for RpConsole<'_> {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.blocking_write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush()
    }
}

/// Claim a UART and its TX pin as a console
pub fn console<'d, T: Instance>(
    uart: Peri<'d, T>,
    tx: Peri<'d, impl TxPin<T>>,
    config: UartConfig,
) -> RpConsole<'d> {
    let mut uart_config = uart::Config::default();
    uart_config.baudrate = config.baudrate;
    RpConsole::new(uart::UartTx::new_blocking(uart, tx, uart_config))
}
