//! STM32F407 SPI1 in slave role, straight on the PAC registers.
//!
//! `stm32f4xx-hal` only drives SPI as a master, so the slave firmware talks to
//! SPI1 itself. NSS is the hardware pin (PA4), so the peripheral only shifts
//! while the master holds select low.

use embedded_hal::spi::{FullDuplex, Phase, Polarity};
use stm32f4xx_hal::gpio::gpioa::{PA4, PA5, PA6, PA7};
use stm32f4xx_hal::gpio::{Alternate, AF5};
use stm32f4xx_hal::stm32::{RCC, SPI1};

use crate::config::{BitOrder, BusConfig, Role};
use crate::error::RoleError;
use crate::spi_drv::RxInterrupt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  Overrun,
  ModeFault,
}

pub type SlavePins = (
  PA4<Alternate<AF5>>,
  PA5<Alternate<AF5>>,
  PA6<Alternate<AF5>>,
  PA7<Alternate<AF5>>,
);

pub struct SlaveSpi {
  spi: SPI1,
  pins: SlavePins,
}

impl SlaveSpi {
  /// Rejects a master configuration before the peripheral is touched.
  pub fn new(spi: SPI1, pins: SlavePins, config: &BusConfig) -> Result<Self, RoleError> {
    let config = config.for_role(Role::Slave)?;

    // SPI1 sits on APB2
    let rcc = unsafe { &*RCC::ptr() };
    rcc.apb2enr.modify(|_, w| w.spi1en().set_bit());

    spi.cr1.write(|w| {
      w.cpha()
        .bit(config.mode.phase == Phase::CaptureOnSecondTransition)
        .cpol()
        .bit(config.mode.polarity == Polarity::IdleHigh)
        .lsbfirst()
        .bit(config.bit_order == BitOrder::LsbFirst)
        .mstr()
        .clear_bit()
        .ssm()
        .clear_bit()
        .dff()
        .clear_bit()
        .spe()
        .set_bit()
    });

    Ok(SlaveSpi { spi, pins })
  }

  pub fn free(self) -> (SPI1, SlavePins) {
    self.spi.cr1.modify(|_, w| w.spe().clear_bit());
    (self.spi, self.pins)
  }
}

impl FullDuplex<u8> for SlaveSpi {
  type Error = Error;

  fn read(&mut self) -> nb::Result<u8, Error> {
    let sr = self.spi.sr.read();
    if sr.ovr().bit_is_set() {
      // DR then SR read clears the overrun flag
      let _ = self.spi.dr.read();
      let _ = self.spi.sr.read();
      Err(nb::Error::Other(Error::Overrun))
    } else if sr.modf().bit_is_set() {
      Err(nb::Error::Other(Error::ModeFault))
    } else if sr.rxne().bit_is_set() {
      Ok(self.spi.dr.read().bits() as u8)
    } else {
      Err(nb::Error::WouldBlock)
    }
  }

  fn send(&mut self, byte: u8) -> nb::Result<(), Error> {
    if self.spi.sr.read().txe().bit_is_set() {
      self.spi.dr.write(|w| unsafe { w.bits(u32::from(byte)) });
      Ok(())
    } else {
      Err(nb::Error::WouldBlock)
    }
  }
}

impl RxInterrupt for SlaveSpi {
  fn listen(&mut self) {
    self.spi.cr2.modify(|_, w| w.rxneie().set_bit());
  }

  fn unlisten(&mut self) {
    self.spi.cr2.modify(|_, w| w.rxneie().clear_bit());
  }
}

/// The HAL master has no bit order setting; patch it in after construction.
pub fn set_master_bit_order(bit_order: BitOrder) {
  let spi = unsafe { &*SPI1::ptr() };
  spi.cr1.modify(|_, w| w.spe().clear_bit());
  spi.cr1.modify(|_, w| w.lsbfirst().bit(bit_order == BitOrder::LsbFirst));
  spi.cr1.modify(|_, w| w.spe().set_bit());
}
