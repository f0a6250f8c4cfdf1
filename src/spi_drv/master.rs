//! Master side: whole messages sent inside one select window.
//!
//! Payloads must not contain the terminator byte. Nothing checks this; the
//! receiving framer simply ends the message at the first terminator it sees.

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi::FullDuplex;
use log::trace;

use crate::codec::unpack_number;
use crate::config::FramerConfig;
use crate::error::{Error, Result};
use crate::spi_drv::select::{with_select, SelectLine};
use crate::spi_drv::transfer::{master_read_byte, transfer_byte};

pub struct Master<S> {
  spi: S,
  terminator: u8,
}

impl<S: FullDuplex<u8>> Master<S> {
  pub fn new(spi: S, config: FramerConfig) -> Self {
    Master { spi, terminator: config.terminator }
  }

  pub fn send_bytes<P: OutputPin>(&mut self, line: &mut SelectLine<P>, bytes: &[u8]) -> Result<(), S::Error, P::Error> {
    trace!("sending {} byte message", bytes.len());
    let spi = &mut self.spi;
    let terminator = self.terminator;
    with_select(line, || write_frame(spi, bytes, terminator).map_err(Error::Spi))
  }

  pub fn send_str<P: OutputPin>(&mut self, line: &mut SelectLine<P>, text: &str) -> Result<(), S::Error, P::Error> {
    self.send_bytes(line, text.as_bytes())
  }

  /// One byte followed by the terminator.
  pub fn send_byte<P: OutputPin>(&mut self, line: &mut SelectLine<P>, byte: u8) -> Result<(), S::Error, P::Error> {
    self.send_bytes(line, &[byte])
  }

  /// Sends the low `byte_count` bytes of `value`, most significant first.
  ///
  /// More than 8 bytes is rejected before the line is touched.
  pub fn send_packed_number<P: OutputPin>(
    &mut self,
    line: &mut SelectLine<P>,
    byte_count: usize,
    value: u64,
  ) -> Result<(), S::Error, P::Error> {
    let bytes = unpack_number(value, byte_count)?;
    self.send_bytes(line, &bytes)
  }

  /// Single unframed read: clocks one dummy byte inside a select window.
  pub fn receive_byte<P: OutputPin>(&mut self, line: &mut SelectLine<P>) -> Result<u8, S::Error, P::Error> {
    let spi = &mut self.spi;
    with_select(line, || master_read_byte(spi).map_err(Error::Spi))
  }

  pub fn free(self) -> S {
    self.spi
  }
}

fn write_frame<S: FullDuplex<u8>>(spi: &mut S, bytes: &[u8], terminator: u8) -> core::result::Result<(), S::Error> {
  for &b in bytes {
    transfer_byte(spi, b)?;
  }
  transfer_byte(spi, terminator)?;
  Ok(())
}
