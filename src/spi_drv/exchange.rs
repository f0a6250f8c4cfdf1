//! Foreground half of the receive mailbox.

use log::{debug, warn};
use rtic_core::Mutex;

use crate::buffer::FrameBuffer;
use crate::constants::DEFAULT_CAPACITY;
use crate::spi_drv::framer::Framer;
use crate::spi_drv::RxInterrupt;

/// Holds the last message taken from the framer.
///
/// The contents only change inside [`Exchange::message_ready`], so slices
/// handed out by [`Exchange::message`] are stable until the next call.
pub struct Exchange<const N: usize = DEFAULT_CAPACITY> {
  message: FrameBuffer<N>,
  truncated: bool,
}

impl<const N: usize> Exchange<N> {
  pub const fn new() -> Self {
    Exchange { message: FrameBuffer::new(), truncated: false }
  }

  /// Takes a finished frame from `framer` if one is pending.
  ///
  /// `framer` provides the critical section: an RTIC resource proxy, an
  /// `rtic_core::Exclusive` when nothing can preempt, or a [`MaskedFramer`].
  /// Returns true exactly once per completed frame.
  pub fn message_ready<M>(&mut self, mut framer: M) -> bool
  where
    M: Mutex<T = Framer<N>>,
  {
    let message = &mut self.message;
    let taken = framer.lock(|framer| framer.take_into(message));

    match taken {
      Some(truncated) => {
        self.truncated = truncated;
        if truncated {
          warn!("frame exceeded {} bytes, tail discarded", FrameBuffer::<N>::LIMIT);
        }
        debug!("received {} byte message", self.message.len());
        true
      }
      None => false,
    }
  }

  pub fn message(&self) -> &[u8] {
    self.message.as_slice()
  }

  /// Whether the last message lost bytes to the capacity limit.
  pub fn is_truncated(&self) -> bool {
    self.truncated
  }
}

impl<const N: usize> Default for Exchange<N> {
  fn default() -> Self {
    Self::new()
  }
}

/// Lock over a framer that masks the receive interrupt instead of relying on
/// a scheduler.
pub struct MaskedFramer<'a, I, const N: usize> {
  irq: &'a mut I,
  framer: &'a mut Framer<N>,
}

impl<'a, I: RxInterrupt, const N: usize> MaskedFramer<'a, I, N> {
  pub fn new(irq: &'a mut I, framer: &'a mut Framer<N>) -> Self {
    MaskedFramer { irq, framer }
  }
}

impl<'a, I: RxInterrupt, const N: usize> Mutex for MaskedFramer<'a, I, N> {
  type T = Framer<N>;

  fn lock<R>(&mut self, f: impl FnOnce(&mut Framer<N>) -> R) -> R {
    self.irq.unlisten();
    let r = f(&mut *self.framer);
    self.irq.listen();
    r
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mock::{Bus, Event};
  use proptest::prelude::*;
  use rtic_core::Exclusive;

  fn frame(framer: &mut Framer, bytes: &[u8]) {
    for &b in bytes {
      framer.on_byte(b);
    }
  }

  #[test]
  fn toggle_scenario() {
    let mut framer: Framer = Framer::default();
    let mut exchange: Exchange = Exchange::new();
    frame(&mut framer, &[b'T', b'O', b'G', b'G', b'L', b'E', 0x0D]);

    assert!(exchange.message_ready(Exclusive(&mut framer)));
    assert_eq!(exchange.message(), b"TOGGLE");
    assert!(!exchange.is_truncated());
    assert!(!exchange.message_ready(Exclusive(&mut framer)));
    assert_eq!(exchange.message(), b"TOGGLE");
  }

  #[test]
  fn ten_bytes_into_capacity_five() {
    let mut framer: Framer<5> = Framer::new(0x0D);
    let mut exchange: Exchange<5> = Exchange::new();
    for b in 0..10u8 {
      framer.on_byte(b'a' + b);
    }
    framer.on_byte(0x0D);

    assert!(exchange.message_ready(Exclusive(&mut framer)));
    assert_eq!(exchange.message(), b"abcd");
    assert!(exchange.is_truncated());
  }

  #[test]
  fn shorter_message_replaces_longer_one() {
    let mut framer: Framer = Framer::default();
    let mut exchange: Exchange = Exchange::new();
    frame(&mut framer, b"LONGER\r");
    exchange.message_ready(Exclusive(&mut framer));
    frame(&mut framer, b"AB\r");
    exchange.message_ready(Exclusive(&mut framer));
    assert_eq!(exchange.message(), b"AB");
  }

  #[test]
  fn masked_lock_brackets_the_swap() {
    let bus = Bus::new();
    let mut spi = bus.spi();
    let mut framer: Framer = Framer::default();
    let mut exchange: Exchange = Exchange::new();
    frame(&mut framer, b"HI\r");

    assert!(exchange.message_ready(MaskedFramer::new(&mut spi, &mut framer)));
    assert_eq!(bus.events(), vec![Event::Unlisten, Event::Listen]);
    assert_eq!(exchange.message(), b"HI");
  }

  proptest! {
    #[test]
    fn framed_bytes_arrive_once(payload in proptest::collection::vec(
      any::<u8>().prop_filter("terminator", |b| *b != 0x0D), 0..51)) {
      let mut framer: Framer = Framer::default();
      let mut exchange: Exchange = Exchange::new();
      frame(&mut framer, &payload);
      framer.on_byte(0x0D);

      prop_assert!(exchange.message_ready(Exclusive(&mut framer)));
      prop_assert_eq!(exchange.message(), payload.as_slice());
      prop_assert!(!exchange.message_ready(Exclusive(&mut framer)));
    }
  }
}
