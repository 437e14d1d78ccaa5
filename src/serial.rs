// SPDX-License-Identifier: GPL-3.0-only

//! USART2 output channel for the report.

#[allow(unused)]
use log::{debug, error, info, trace, warn};

use embassy_stm32::mode::Async;
use embassy_stm32::peripherals::{DMA1_CH7, PA2, USART2};
use embassy_stm32::usart::{self, UartTx};
use embassy_stm32::Peri;
use embassy_time::{with_timeout, Duration};

use puf_report::{ByteSink, SendError};

/// Bound on one record's transmission. A 13 byte record takes ~13.5ms at
/// 9600 baud; a send still pending after this has stalled.
const SEND_TIMEOUT: Duration = Duration::from_secs(1);

pub(crate) struct UartSink {
    tx: UartTx<'static, Async>,
}

/// 9600 8N1, no flow control, DMA driven tx. Matches the capture tooling
/// on the host side of the link.
pub(crate) fn setup(
    usart: Peri<'static, USART2>,
    tx_pin: Peri<'static, PA2>,
    tx_dma: Peri<'static, DMA1_CH7>,
) -> Result<UartSink, usart::ConfigError> {
    let mut config = usart::Config::default();
    config.baudrate = 9600;
    let tx = UartTx::new(usart, tx_pin, tx_dma, config)?;
    Ok(UartSink { tx })
}

impl ByteSink for UartSink {
    type Error = usart::Error;

    async fn send(&mut self, bytes: &[u8]) -> Result<(), SendError<usart::Error>> {
        match with_timeout(SEND_TIMEOUT, self.tx.write(bytes)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(SendError::Channel(e)),
            Err(_) => Err(SendError::Timeout),
        }
    }
}
