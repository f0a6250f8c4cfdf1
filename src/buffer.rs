//! Bounded byte buffer used by both sides of the receive mailbox.
//!
//! `N` is the capacity including the terminator slot, so a buffer holds at
//! most `N - 1` payload bytes. The terminator itself is never stored.

use heapless::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
  Stored,
  Full,
}

#[derive(Debug, Clone)]
pub struct FrameBuffer<const N: usize> {
  bytes: Vec<u8, N>,
}

impl<const N: usize> FrameBuffer<N> {
  /// Payload bytes that fit before the buffer refuses new ones.
  pub const LIMIT: usize = N - 1;

  pub const fn new() -> Self {
    FrameBuffer { bytes: Vec::new() }
  }

  /// Appends `byte` unless the payload limit is reached.
  pub fn push(&mut self, byte: u8) -> Push {
    if self.bytes.len() >= Self::LIMIT {
      return Push::Full;
    }
    match self.bytes.push(byte) {
      Ok(()) => Push::Stored,
      Err(_) => Push::Full,
    }
  }

  pub fn as_slice(&self) -> &[u8] {
    &self.bytes
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  pub fn is_full(&self) -> bool {
    self.bytes.len() >= Self::LIMIT
  }

  /// Replaces the contents with `other`, truncated to the payload limit.
  pub fn copy_from(&mut self, other: &[u8]) {
    self.clear();
    let len = other.len().min(Self::LIMIT);
    // cannot fail, len is within capacity
    let _ = self.bytes.extend_from_slice(&other[..len]);
  }

  /// Empties the buffer without touching the old bytes.
  pub fn discard(&mut self) {
    self.bytes.clear();
  }

  /// Zeroes the used region, then empties the buffer.
  pub fn clear(&mut self) {
    for b in self.bytes.iter_mut() {
      *b = 0;
    }
    self.bytes.clear();
  }
}

impl<const N: usize> Default for FrameBuffer<N> {
  fn default() -> Self {
    Self::new()
  }
}
