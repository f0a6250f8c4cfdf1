//! Receive side of the framing protocol, run from the SPI receive interrupt.
//!
//! Bytes accumulate in the working buffer until the terminator arrives. The
//! finished frame is then handed to the foreground through a single slot: the
//! framer keeps two buffers and flips which one is "working" when a frame
//! completes, so the handler never copies. While the slot is occupied, newly
//! completed frames are dropped and counted.
//!
//! Everything reachable from [`Framer::on_byte`] is constant time, does not
//! block and does not log.

use embedded_hal::spi::FullDuplex;

use crate::buffer::{FrameBuffer, Push};
use crate::config::FramerConfig;
use crate::constants::DEFAULT_CAPACITY;

/// What the handler did with one received byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
  Stored,
  /// Working buffer full, byte discarded
  Overflow,
  /// Terminator seen, frame handed to the foreground
  Complete,
  /// Terminator seen but the previous frame was not drained yet
  Dropped,
  /// Interrupt fired without a byte in the data register
  Spurious,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FramerStats {
  pub frames: u32,
  pub dropped_frames: u32,
  pub overflow_bytes: u32,
  /// Peripheral errors seen while servicing the interrupt
  pub bus_errors: u32,
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum State {
  Receiving,
  Overflowed,
}

#[derive(Debug, Clone, Copy)]
enum Message {
  Data(u8),
  Full,
  Terminator,
}

#[derive(Debug, Clone, Copy)]
enum Action {
  Store(u8),
  Discard,
  Complete { truncated: bool },
}

pub struct Framer<const N: usize = DEFAULT_CAPACITY> {
  terminator: u8,
  state: State,
  buffers: [FrameBuffer<N>; 2],
  active: usize,
  ready: bool,
  pending_truncated: bool,
  stats: FramerStats,
}

impl<const N: usize> Framer<N> {
  pub const fn new(terminator: u8) -> Self {
    Framer {
      terminator,
      state: State::Receiving,
      buffers: [FrameBuffer::new(), FrameBuffer::new()],
      active: 0,
      ready: false,
      pending_truncated: false,
      stats: FramerStats { frames: 0, dropped_frames: 0, overflow_bytes: 0, bus_errors: 0 },
    }
  }

  pub fn with_config(config: FramerConfig) -> Self {
    Self::new(config.terminator)
  }

  /// Interrupt entry point: reads the received byte, which also clears the
  /// peripheral's "byte ready" condition, and feeds it to the state machine.
  pub fn service<S: FullDuplex<u8>>(&mut self, spi: &mut S) -> Result<FrameEvent, S::Error> {
    match spi.read() {
      Ok(byte) => Ok(self.on_byte(byte)),
      Err(nb::Error::WouldBlock) => Ok(FrameEvent::Spurious),
      Err(nb::Error::Other(e)) => {
        self.stats.bus_errors = self.stats.bus_errors.wrapping_add(1);
        Err(e)
      }
    }
  }

  pub fn on_byte(&mut self, byte: u8) -> FrameEvent {
    let msg = if byte == self.terminator {
      Message::Terminator
    } else if self.buffers[self.active].is_full() {
      Message::Full
    } else {
      Message::Data(byte)
    };

    let action;
    (self.state, action) = self.state.next(&msg);

    match action {
      Action::Store(b) => match self.buffers[self.active].push(b) {
        Push::Stored => FrameEvent::Stored,
        Push::Full => self.discard(),
      },
      Action::Discard => self.discard(),
      Action::Complete { truncated } => {
        if self.ready {
          self.stats.dropped_frames = self.stats.dropped_frames.wrapping_add(1);
          self.buffers[self.active].discard();
          FrameEvent::Dropped
        } else {
          // the idle buffer was emptied by the last take, so it can start
          // collecting the next frame right away
          self.active ^= 1;
          self.pending_truncated = truncated;
          self.ready = true;
          self.stats.frames = self.stats.frames.wrapping_add(1);
          FrameEvent::Complete
        }
      }
    }
  }

  fn discard(&mut self) -> FrameEvent {
    self.stats.overflow_bytes = self.stats.overflow_bytes.wrapping_add(1);
    FrameEvent::Overflow
  }

  pub fn is_ready(&self) -> bool {
    self.ready
  }

  /// Bytes collected so far for the frame in progress.
  pub fn byte_count(&self) -> usize {
    self.buffers[self.active].len()
  }

  pub fn terminator(&self) -> u8 {
    self.terminator
  }

  pub fn stats(&self) -> FramerStats {
    self.stats
  }

  /// Moves the pending frame into `dest` and frees the slot.
  ///
  /// Returns whether the frame was truncated, or `None` when nothing was
  /// pending. Callers must hold off the receive interrupt for the duration.
  pub(crate) fn take_into(&mut self, dest: &mut FrameBuffer<N>) -> Option<bool> {
    if !self.ready {
      return None;
    }
    let pending = &mut self.buffers[self.active ^ 1];
    dest.copy_from(pending.as_slice());
    pending.clear();
    self.ready = false;
    Some(core::mem::replace(&mut self.pending_truncated, false))
  }
}

impl<const N: usize> Default for Framer<N> {
  fn default() -> Self {
    Self::with_config(FramerConfig::default())
  }
}

impl State {
  fn next(self, msg: &Message) -> (State, Action) {
    match (self, msg) {
      (State::Receiving, Message::Data(b)) => {
        (State::Receiving, Action::Store(*b))
      }
      (State::Receiving, Message::Full) => {
        (State::Overflowed, Action::Discard)
      }
      (State::Receiving, Message::Terminator) => {
        (State::Receiving, Action::Complete { truncated: false })
      }
      (State::Overflowed, Message::Terminator) => {
        (State::Receiving, Action::Complete { truncated: true })
      }
      (State::Overflowed, _m) => {
        (State::Overflowed, Action::Discard)
      }
    }
  }
}
