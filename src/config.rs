//! One-time bus configuration values.
//!
//! These only describe the setup; applying them to registers is the job of the
//! platform adapter (see `hw` under the `firmware` feature).

use core::fmt;

use embedded_hal::spi::{Mode, Phase, Polarity, MODE_0};

use crate::constants::DEFAULT_TERMINATOR;
use crate::error::RoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Master,
  Slave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
  MsbFirst,
  LsbFirst,
}

/// Master clock as a divider of the peripheral clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockRate {
  Div2,
  Div4,
  Div8,
  Div16,
  Div32,
  Div64,
  Div128,
}

impl ClockRate {
  pub const fn divider(self) -> u32 {
    match self {
      ClockRate::Div2 => 2,
      ClockRate::Div4 => 4,
      ClockRate::Div8 => 8,
      ClockRate::Div16 => 16,
      ClockRate::Div32 => 32,
      ClockRate::Div64 => 64,
      ClockRate::Div128 => 128,
    }
  }

  pub const fn frequency(self, pclk: u32) -> u32 {
    pclk / self.divider()
  }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
  pub role: Role,
  pub bit_order: BitOrder,
  pub mode: Mode,
  /// Ignored in slave role, the master drives the clock.
  pub clock_rate: ClockRate,
}

impl BusConfig {
  pub const fn master() -> Self {
    BusConfig {
      role: Role::Master,
      bit_order: BitOrder::MsbFirst,
      mode: MODE_0,
      clock_rate: ClockRate::Div16,
    }
  }

  pub const fn slave() -> Self {
    BusConfig {
      role: Role::Slave,
      ..Self::master()
    }
  }

  /// Hands the configuration back only if it was built for `role`.
  ///
  /// Platform adapters call this before touching registers, so a master
  /// configuration can never set up a slave peripheral or the other way round.
  pub fn for_role(self, role: Role) -> Result<Self, RoleError> {
    if self.role == role {
      Ok(self)
    } else {
      Err(RoleError { expected: role, found: self.role })
    }
  }

  pub const fn bit_order(mut self, bit_order: BitOrder) -> Self {
    self.bit_order = bit_order;
    self
  }

  pub const fn mode(mut self, mode: Mode) -> Self {
    self.mode = mode;
    self
  }

  pub const fn clock_rate(mut self, clock_rate: ClockRate) -> Self {
    self.clock_rate = clock_rate;
    self
  }
}

// embedded-hal's `Mode` has no `Debug`
impl fmt::Debug for BusConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let polarity = match self.mode.polarity {
      Polarity::IdleLow => "IdleLow",
      Polarity::IdleHigh => "IdleHigh",
    };
    let phase = match self.mode.phase {
      Phase::CaptureOnFirstTransition => "CaptureOnFirstTransition",
      Phase::CaptureOnSecondTransition => "CaptureOnSecondTransition",
    };
    f.debug_struct("BusConfig")
      .field("role", &self.role)
      .field("bit_order", &self.bit_order)
      .field("polarity", &format_args!("{}", polarity))
      .field("phase", &format_args!("{}", phase))
      .field("clock_rate", &self.clock_rate)
      .finish()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramerConfig {
  /// Must never appear inside a payload.
  pub terminator: u8,
}

impl Default for FramerConfig {
  fn default() -> Self {
    FramerConfig { terminator: DEFAULT_TERMINATOR }
  }
}
