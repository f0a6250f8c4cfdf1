//! On/off indicator driven by decoded commands.

use embedded_hal::digital::v2::OutputPin;

pub struct Data<P> {
  led: P,
  state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
  TurnOff,
  TurnOn,
  Toggle,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
  Off,
  On,
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
  DoNothing,
  SwitchOn,
  SwitchOff,
}

impl<P: OutputPin> Data<P> {
  /// Takes the pin and switches it off.
  pub fn new(mut led: P) -> Result<Self, P::Error> {
    led.set_low()?;
    Ok(Data { led, state: State::Off })
  }

  pub fn handle(&mut self, msg: Message) -> Result<(), P::Error> {
    let action;
    (self.state, action) = self.state.next(&msg);

    match action {
      Action::SwitchOn => self.led.set_high(),
      Action::SwitchOff => self.led.set_low(),
      Action::DoNothing => Ok(()),
    }
  }

  pub fn state(&self) -> State {
    self.state
  }
}

impl State {
  fn next(self, msg: &Message) -> (State, Action) {
    match (self, msg) {
      (State::Off, Message::TurnOn) => {
        (State::On, Action::SwitchOn)
      }
      (State::Off, Message::Toggle) => {
        (State::On, Action::SwitchOn)
      }
      (State::On, Message::TurnOff) => {
        (State::Off, Action::SwitchOff)
      }
      (State::On, Message::Toggle) => {
        (State::Off, Action::SwitchOff)
      }
      (s, _m) => {
        (s, Action::DoNothing)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mock::{Bus, Event};

  #[test]
  fn toggles_and_ignores_repeats() {
    let bus = Bus::new();
    let mut led = Data::new(bus.pin()).unwrap();
    led.handle(Message::Toggle).unwrap();
    assert_eq!(led.state(), State::On);
    led.handle(Message::TurnOn).unwrap();
    led.handle(Message::Toggle).unwrap();
    led.handle(Message::TurnOff).unwrap();
    assert_eq!(led.state(), State::Off);
    assert_eq!(bus.events(), vec![Event::Low, Event::High, Event::Low]);
  }
}
