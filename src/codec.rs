//! Byte-level helpers for message payloads: big-endian packed numbers and
//! C-string style comparison.

use core::cmp::Ordering;

use heapless::Vec;

use crate::constants::MAX_PACKED_BYTES;
use crate::error::WidthError;

/// Folds `bytes` into a number, most significant byte first.
///
/// At most 8 bytes are accepted; a longer slice would shift the leading bytes
/// out of the `u64` so it is rejected instead. An empty slice packs to 0.
pub fn pack_bytes_to_number(bytes: &[u8]) -> Result<u64, WidthError> {
  WidthError::check(bytes.len())?;
  Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

/// Low `byte_count` bytes of `value`, most significant first.
pub fn unpack_number(value: u64, byte_count: usize) -> Result<Vec<u8, MAX_PACKED_BYTES>, WidthError> {
  WidthError::check(byte_count)?;
  let be = value.to_be_bytes();
  let mut out = Vec::new();
  // byte_count <= 8 so this always fits
  let _ = out.extend_from_slice(&be[MAX_PACKED_BYTES - byte_count..]);
  Ok(out)
}

/// Compares two byte strings the way `strcmp` does.
///
/// Each side ends at its first zero byte, or at the end of the slice if it has
/// none. The first differing byte decides; a string that is a proper prefix of
/// the other orders first. Bytes compare as unsigned, without case folding.
pub fn compare(a: &[u8], b: &str) -> Ordering {
  compare_bytes(a, b.as_bytes())
}

pub fn compare_bytes(a: &[u8], b: &[u8]) -> Ordering {
  let a = until_nul(a);
  let b = until_nul(b);
  a.cmp(b)
}

fn until_nul(s: &[u8]) -> &[u8] {
  match s.iter().position(|&b| b == 0) {
    Some(end) => &s[..end],
    None => s,
  }
}
