//! Error types shared by the transfer, select and exchange layers.
//!
//! Everything here is `no_std` and `Copy` whenever the wrapped HAL errors are.
//! A bus that never completes a transfer is not an error: the transfer
//! primitive blocks until the hardware reports completion.

use core::fmt;

use crate::config::Role;
use crate::constants::MAX_PACKED_BYTES;

/// A packed-number request asked for more bytes than a `u64` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthError {
  pub requested: usize,
  pub max: usize,
}

impl WidthError {
  pub(crate) fn check(requested: usize) -> core::result::Result<(), WidthError> {
    if requested > MAX_PACKED_BYTES {
      Err(WidthError { requested, max: MAX_PACKED_BYTES })
    } else {
      Ok(())
    }
  }
}

/// A bus configuration was handed to an adapter for the other role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleError {
  pub expected: Role,
  pub found: Role,
}

/// Driver error, generic over the SPI error `S` and select pin error `P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<S, P> {
  /// The SPI peripheral reported an error (overrun, mode fault, ...)
  Spi(S),
  /// Driving the select line failed
  Pin(P),
  /// Packed number wider than 8 bytes
  Width(WidthError),
}

impl<S, P> From<WidthError> for Error<S, P> {
  fn from(e: WidthError) -> Self {
    Error::Width(e)
  }
}

impl fmt::Display for WidthError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} bytes requested, at most {} fit in a packed number", self.requested, self.max)
  }
}

impl fmt::Display for RoleError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?} peripheral configured with a {:?} bus config", self.expected, self.found)
  }
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Display for Error<S, P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Spi(e) => write!(f, "SPI transfer failed: {:?}", e),
      Self::Pin(e) => write!(f, "select line error: {:?}", e),
      Self::Width(e) => write!(f, "{}", e),
    }
  }
}

/// Result type alias using the driver error
pub type Result<T, S, P> = core::result::Result<T, Error<S, P>>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn width_check_accepts_up_to_eight_bytes() {
    assert!(WidthError::check(0).is_ok());
    assert!(WidthError::check(8).is_ok());
    assert_eq!(WidthError::check(9), Err(WidthError { requested: 9, max: 8 }));
  }

  #[test]
  fn display_mentions_limits() {
    let e: Error<(), ()> = WidthError { requested: 12, max: 8 }.into();
    assert_eq!(e.to_string(), "12 bytes requested, at most 8 fit in a packed number");
  }

  #[test]
  fn role_error_names_both_sides() {
    let e = RoleError { expected: Role::Slave, found: Role::Master };
    assert_eq!(e.to_string(), "Slave peripheral configured with a Master bus config");
  }
}
