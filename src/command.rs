//! Commands understood by the example slave.
//!
//! Two encodings share the bus: the text command `TOGGLE`, and 2-byte packed
//! numbers switching the indicator on (`0x1234`) or off (`0x4321`).

use core::cmp::Ordering;

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi::FullDuplex;

use crate::codec::{compare, pack_bytes_to_number};
use crate::constants::{LED_COMMAND_BYTES, LED_OFF, LED_ON, TOGGLE_COMMAND};
use crate::error::Result;
use crate::indicator;
use crate::spi_drv::{Master, SelectLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Toggle,
  LedOn,
  LedOff,
  Unknown,
}

impl Command {
  pub fn decode(message: &[u8]) -> Command {
    if compare(message, TOGGLE_COMMAND) == Ordering::Equal {
      return Command::Toggle;
    }
    if message.len() != LED_COMMAND_BYTES {
      return Command::Unknown;
    }
    match pack_bytes_to_number(message) {
      Ok(LED_ON) => Command::LedOn,
      Ok(LED_OFF) => Command::LedOff,
      _ => Command::Unknown,
    }
  }

  /// Puts the command on the bus as one framed message.
  pub fn send<S, P>(self, master: &mut Master<S>, line: &mut SelectLine<P>) -> Result<(), S::Error, P::Error>
  where
    S: FullDuplex<u8>,
    P: OutputPin,
  {
    match self {
      Command::Toggle => master.send_str(line, TOGGLE_COMMAND),
      Command::LedOn => master.send_packed_number(line, LED_COMMAND_BYTES, LED_ON),
      Command::LedOff => master.send_packed_number(line, LED_COMMAND_BYTES, LED_OFF),
      Command::Unknown => Ok(()),
    }
  }

  pub fn indicator_message(self) -> Option<indicator::Message> {
    match self {
      Command::Toggle => Some(indicator::Message::Toggle),
      Command::LedOn => Some(indicator::Message::TurnOn),
      Command::LedOff => Some(indicator::Message::TurnOff),
      Command::Unknown => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::FramerConfig;
  use crate::mock::Bus;
  use crate::spi_drv::{Exchange, Framer, SelectPolarity};
  use rtic_core::Exclusive;

  #[test]
  fn decodes_text_and_numbers() {
    assert_eq!(Command::decode(b"TOGGLE"), Command::Toggle);
    assert_eq!(Command::decode(&[0x12, 0x34]), Command::LedOn);
    assert_eq!(Command::decode(&[0x43, 0x21]), Command::LedOff);
    assert_eq!(Command::decode(&[0x00, 0x12, 0x34]), Command::Unknown);
    assert_eq!(Command::decode(b"toggle"), Command::Unknown);
    assert_eq!(Command::decode(b""), Command::Unknown);
  }

  #[test]
  fn master_to_slave_round_trip() {
    let bus = Bus::new();
    let mut master = Master::new(bus.spi(), FramerConfig::default());
    let mut line = SelectLine::new(bus.pin(), SelectPolarity::Default).unwrap();
    let mut framer: Framer = Framer::default();
    let mut exchange: Exchange = Exchange::new();

    for cmd in [Command::Toggle, Command::LedOn, Command::LedOff].iter() {
      bus.clear();
      cmd.send(&mut master, &mut line).unwrap();
      for event in bus.events() {
        if let crate::mock::Event::Byte(b) = event {
          framer.on_byte(b);
        }
      }
      assert!(exchange.message_ready(Exclusive(&mut framer)));
      assert_eq!(Command::decode(exchange.message()), *cmd);
    }
  }

  #[test]
  fn maps_to_indicator() {
    assert_eq!(Command::Toggle.indicator_message(), Some(indicator::Message::Toggle));
    assert_eq!(Command::Unknown.indicator_message(), None);
  }
}
