// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fingerprint report core.
//!
//! Formats a residual-SRAM fingerprint as `PUF[II]: VV` lines and drives
//! them through an injected byte sink, one record per send. Hardware
//! independent: the firmware supplies the fingerprint bytes and the sink,
//! tests supply synthetic arrays.

#![no_std]

use core::fmt::Write;

use heapless::String;

/// Reservoir length in bytes.
pub const PUF_LEN: usize = 16;

/// One formatted record, e.g. `PUF[07]: 3F\r\n`. Always 13 bytes.
pub type Line = String<16>;

/// Failure kinds of a single send on the output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError<E> {
    /// The channel did not accept the bytes within the maximum wait.
    Timeout,
    /// The channel reported a transmit error.
    Channel(E),
}

/// A byte-stream transmit capability with a bounded wait per send.
#[allow(async_fn_in_trait)]
pub trait ByteSink {
    type Error;

    /// Resolves once the channel has accepted all of `bytes`.
    async fn send(&mut self, bytes: &[u8]) -> Result<(), SendError<Self::Error>>;
}

/// Record `index` did not go out. Records before it are already on the
/// wire; nothing after it was sent. Not corrected or rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportError<E> {
    pub index: usize,
    pub cause: SendError<E>,
}

/// Renders one record: zero-padded 2-digit decimal index, uppercase
/// 2-digit hex value, CRLF terminated.
pub fn line(index: usize, value: u8) -> Line {
    debug_assert!(index < PUF_LEN);
    let mut s = Line::new();
    // 13 bytes, always fits the capacity
    let _ = write!(s, "PUF[{index:02}]: {value:02X}\r\n");
    s
}

/// Lazy sequence of the fingerprint's records, ascending index order.
pub fn lines(fp: &[u8; PUF_LEN]) -> impl Iterator<Item = Line> + '_ {
    fp.iter().enumerate().map(|(i, &b)| line(i, b))
}

/// Transmits the full report, one record per send, in index order.
///
/// Stops at the first record the sink refuses; the caller decides
/// escalation. Re-running over unchanged bytes emits an identical
/// sequence.
pub async fn report<S: ByteSink>(
    fp: &[u8; PUF_LEN],
    sink: &mut S,
) -> Result<(), ReportError<S::Error>> {
    for (index, l) in lines(fp).enumerate() {
        sink.send(l.as_bytes())
            .await
            .map_err(|cause| ReportError { index, cause })?;
    }
    Ok(())
}
