use bytemuck::{checked::pod_read_unaligned, Pod};

use crate::{DpxError, Endianness};
use core::mem::size_of;

/// Splits a `T` off the front of the bytes.
///
/// Runs out of bytes as [`DpxError::TooSmall`].
#[inline]
pub(crate) fn try_pull_pod<T: Pod>(bytes: &[u8]) -> Result<(T, &[u8]), DpxError> {
  let position = size_of::<T>();
  if bytes.len() >= position {
    let (head, tail) = bytes.split_at(position);
    let a: T = pod_read_unaligned(head);
    Ok((a, tail))
  } else {
    Err(DpxError::TooSmall)
  }
}

/// Reads a `T` at an absolute byte offset.
#[inline]
pub(crate) fn try_pod_at<T: Pod>(bytes: &[u8], offset: usize) -> Result<T, DpxError> {
  let tail = bytes.get(offset..).ok_or(DpxError::TooSmall)?;
  try_pull_pod::<T>(tail).map(|(t, _)| t)
}

#[inline]
pub(crate) fn try_u32_at(bytes: &[u8], offset: usize, endian: Endianness) -> Result<u32, DpxError> {
  try_pod_at::<[u8; 4]>(bytes, offset).map(|a| endian.u32_from_bytes(a))
}

#[inline]
pub(crate) fn try_u8_at(bytes: &[u8], offset: usize) -> Result<u8, DpxError> {
  bytes.get(offset).copied().ok_or(DpxError::TooSmall)
}

#[test]
fn test_try_pull_pod_short_input() {
  assert_eq!(try_pull_pod::<[u8; 4]>(&[1, 2, 3]), Err(DpxError::TooSmall));
  assert_eq!(try_pull_pod::<[u8; 2]>(&[1, 2, 3]), Ok(([1, 2], &[3_u8][..])));
  assert_eq!(try_u32_at(&[0, 0, 1, 2, 3, 4], 2, Endianness::Big), Ok(0x0102_0304));
  assert_eq!(try_u32_at(&[0, 0, 1, 2, 3, 4], 3, Endianness::Big), Err(DpxError::TooSmall));
  assert_eq!(try_u8_at(&[9], 1), Err(DpxError::TooSmall));
}
