use embedded_hal::digital::v2::OutputPin;

use crate::error::{Error, Result};

/// Level that addresses the slave.
///
/// `Inverted` is for boards where the select signal passes through an
/// inverting stage (e.g. a Schmitt trigger) between master and slave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectPolarity {
  /// Active low
  Default,
  /// Active high
  Inverted,
}

/// A slave select output together with its active level.
pub struct SelectLine<P> {
  pin: P,
  polarity: SelectPolarity,
}

impl<P: OutputPin> SelectLine<P> {
  /// Takes the pin and drives it to the idle (de-asserted) level.
  pub fn new(pin: P, polarity: SelectPolarity) -> core::result::Result<Self, P::Error> {
    let mut line = SelectLine { pin, polarity };
    line.deassert()?;
    Ok(line)
  }

  pub fn polarity(&self) -> SelectPolarity {
    self.polarity
  }

  pub fn assert(&mut self) -> core::result::Result<(), P::Error> {
    match self.polarity {
      SelectPolarity::Default => self.pin.set_low(),
      SelectPolarity::Inverted => self.pin.set_high(),
    }
  }

  pub fn deassert(&mut self) -> core::result::Result<(), P::Error> {
    match self.polarity {
      SelectPolarity::Default => self.pin.set_high(),
      SelectPolarity::Inverted => self.pin.set_low(),
    }
  }

  pub fn free(self) -> P {
    self.pin
  }
}

/// Runs `body` with `line` asserted.
///
/// The line is released even when `body` fails; in that case the body's error
/// is returned and a release failure is dropped.
pub fn with_select<P, S, R, F>(line: &mut SelectLine<P>, body: F) -> Result<R, S, P::Error>
where
  P: OutputPin,
  F: FnOnce() -> Result<R, S, P::Error>,
{
  line.assert().map_err(Error::Pin)?;
  let result = body();
  let released = line.deassert().map_err(Error::Pin);
  match (result, released) {
    (Ok(r), Ok(())) => Ok(r),
    (Ok(_), Err(e)) => Err(e),
    (Err(e), _) => Err(e),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mock::{Bus, Event, MockError};

  #[test]
  fn default_polarity_is_active_low() {
    let bus = Bus::new();
    let mut line = SelectLine::new(bus.pin(), SelectPolarity::Default).unwrap();
    let r: Result<u8, (), MockError> = with_select(&mut line, || Ok(5));
    assert_eq!(r, Ok(5));
    assert_eq!(bus.events(), vec![Event::High, Event::Low, Event::High]);
  }

  #[test]
  fn inverted_polarity_is_active_high() {
    let bus = Bus::new();
    let mut line = SelectLine::new(bus.pin(), SelectPolarity::Inverted).unwrap();
    let _: Result<(), (), MockError> = with_select(&mut line, || Ok(()));
    assert_eq!(bus.events(), vec![Event::Low, Event::High, Event::Low]);
  }

  #[test]
  fn releases_line_when_body_fails() {
    let bus = Bus::new();
    let mut line = SelectLine::new(bus.pin(), SelectPolarity::Default).unwrap();
    bus.clear();
    let r: Result<(), u8, MockError> = with_select(&mut line, || Err(Error::Spi(3)));
    assert_eq!(r, Err(Error::Spi(3)));
    assert_eq!(bus.events(), vec![Event::Low, Event::High]);
  }

  #[test]
  fn free_returns_the_pin_at_idle_level() {
    let bus = Bus::new();
    let line = SelectLine::new(bus.pin(), SelectPolarity::Inverted).unwrap();
    assert_eq!(line.polarity(), SelectPolarity::Inverted);
    let mut pin = line.free();
    pin.set_high().unwrap();
    assert_eq!(bus.events(), vec![Event::Low, Event::High]);
  }

  #[test]
  fn pin_errors_surface() {
    let bus = Bus::new();
    assert_eq!(
      SelectLine::new(bus.pin().failing(), SelectPolarity::Default).err(),
      Some(MockError::Pin)
    );
  }
}
