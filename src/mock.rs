//! Recording doubles for the SPI peripheral and select line.
//!
//! The bus and every pin made from it append to one shared event log, so a
//! test can check the exact order of select edges and bytes on the wire.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi::FullDuplex;

use crate::spi_drv::RxInterrupt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
  Byte(u8),
  Low,
  High,
  Listen,
  Unlisten,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
  Overrun,
  Pin,
}

#[derive(Clone, Default)]
pub struct Bus {
  log: Rc<RefCell<Vec<Event>>>,
}

impl Bus {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn spi(&self) -> MockSpi {
    MockSpi {
      log: Rc::clone(&self.log),
      incoming: VecDeque::new(),
      busy: 0,
      fail: false,
    }
  }

  pub fn pin(&self) -> MockPin {
    MockPin { log: Rc::clone(&self.log), fail: false }
  }

  pub fn events(&self) -> Vec<Event> {
    self.log.borrow().clone()
  }

  pub fn clear(&self) {
    self.log.borrow_mut().clear();
  }
}

pub struct MockSpi {
  log: Rc<RefCell<Vec<Event>>>,
  incoming: VecDeque<u8>,
  busy: usize,
  fail: bool,
}

impl MockSpi {
  /// Queues bytes the peer shifts in; reads past the queue return 0.
  pub fn respond(&mut self, bytes: &[u8]) {
    self.incoming.extend(bytes.iter().copied());
  }

  /// Next `n` register accesses report the peripheral as busy.
  pub fn busy_polls(&mut self, n: usize) {
    self.busy = n;
  }

  pub fn fail_next(&mut self) {
    self.fail = true;
  }

  fn poll(&mut self) -> nb::Result<(), MockError> {
    if self.fail {
      self.fail = false;
      return Err(nb::Error::Other(MockError::Overrun));
    }
    if self.busy > 0 {
      self.busy -= 1;
      return Err(nb::Error::WouldBlock);
    }
    Ok(())
  }
}

impl FullDuplex<u8> for MockSpi {
  type Error = MockError;

  fn read(&mut self) -> nb::Result<u8, MockError> {
    self.poll()?;
    Ok(self.incoming.pop_front().unwrap_or(0))
  }

  fn send(&mut self, word: u8) -> nb::Result<(), MockError> {
    self.poll()?;
    self.log.borrow_mut().push(Event::Byte(word));
    Ok(())
  }
}

impl RxInterrupt for MockSpi {
  fn listen(&mut self) {
    self.log.borrow_mut().push(Event::Listen);
  }

  fn unlisten(&mut self) {
    self.log.borrow_mut().push(Event::Unlisten);
  }
}

pub struct MockPin {
  log: Rc<RefCell<Vec<Event>>>,
  fail: bool,
}

impl MockPin {
  pub fn failing(mut self) -> Self {
    self.fail = true;
    self
  }
}

impl OutputPin for MockPin {
  type Error = MockError;

  fn set_low(&mut self) -> Result<(), MockError> {
    if self.fail {
      return Err(MockError::Pin);
    }
    self.log.borrow_mut().push(Event::Low);
    Ok(())
  }

  fn set_high(&mut self) -> Result<(), MockError> {
    if self.fail {
      return Err(MockError::Pin);
    }
    self.log.borrow_mut().push(Event::High);
    Ok(())
  }
}
