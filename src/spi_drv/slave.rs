use embedded_hal::spi::FullDuplex;

use crate::spi_drv::framer::{FrameEvent, Framer};
use crate::spi_drv::transfer::{put_byte, read_byte};
use crate::spi_drv::RxInterrupt;

/// SPI peripheral in slave role.
///
/// Received bytes normally reach the application through [`Framer`], fed from
/// the receive interrupt by [`Slave::on_interrupt`].
pub struct Slave<S> {
  spi: S,
}

impl<S: FullDuplex<u8>> Slave<S> {
  pub fn new(spi: S) -> Self {
    Slave { spi }
  }

  /// Body of the receive interrupt handler.
  pub fn on_interrupt<const N: usize>(&mut self, framer: &mut Framer<N>) -> Result<FrameEvent, S::Error> {
    framer.service(&mut self.spi)
  }

  /// Loads `byte` for the master's next transfer.
  pub fn put_byte(&mut self, byte: u8) -> Result<(), S::Error> {
    put_byte(&mut self.spi, byte)
  }

  /// Blocking read for use with the receive interrupt disabled.
  pub fn read_byte(&mut self) -> Result<u8, S::Error> {
    read_byte(&mut self.spi)
  }

  pub fn free(self) -> S {
    self.spi
  }
}

impl<S: RxInterrupt> RxInterrupt for Slave<S> {
  fn listen(&mut self) {
    self.spi.listen()
  }

  fn unlisten(&mut self) {
    self.spi.unlisten()
  }
}
