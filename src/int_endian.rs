#![forbid(unsafe_code)]

//! Integers stored as byte arrays of a fixed byte order.
//!
//! A DPX file can be written in either byte order, so the header reader picks
//! one of these at runtime through [`Endianness`].

use bytemuck::{Pod, Zeroable};

/// The byte order of a DPX file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endianness {
  /// Magic reads as `SDPX`. This is the usual case.
  #[default]
  Big,
  /// Magic reads as `XPDS`.
  Little,
}
impl Endianness {
  /// Converts 4 bytes into a `u32` using this byte order.
  #[inline]
  #[must_use]
  pub const fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
    match self {
      Self::Big => u32::from_be_bytes(bytes),
      Self::Little => u32::from_le_bytes(bytes),
    }
  }
  /// Converts a `u32` into 4 bytes using this byte order.
  #[inline]
  #[must_use]
  pub const fn u32_to_bytes(self, u: u32) -> [u8; 4] {
    match self {
      Self::Big => u.to_be_bytes(),
      Self::Little => u.to_le_bytes(),
    }
  }
  /// Converts 2 bytes into a `u16` using this byte order.
  #[inline]
  #[must_use]
  pub const fn u16_from_bytes(self, bytes: [u8; 2]) -> u16 {
    match self {
      Self::Big => u16::from_be_bytes(bytes),
      Self::Little => u16::from_le_bytes(bytes),
    }
  }
  /// Converts a `u16` into 2 bytes using this byte order.
  #[inline]
  #[must_use]
  pub const fn u16_to_bytes(self, u: u16) -> [u8; 2] {
    match self {
      Self::Big => u.to_be_bytes(),
      Self::Little => u.to_le_bytes(),
    }
  }
  /// The byte order of the machine running this code.
  #[inline]
  #[must_use]
  pub const fn native() -> Self {
    if cfg!(target_endian = "big") {
      Self::Big
    } else {
      Self::Little
    }
  }
}

/// A `u32` stored as big-endian bytes.
///
/// This stores only an array of bytes, so unlike a normal `u32` it has an
/// alignment of 1.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct U32BE([u8; 4]);
impl U32BE {
  /// Convert this value to a native `u32`
  #[inline]
  #[must_use]
  pub const fn to_u32(self) -> u32 {
    u32::from_be_bytes(self.0)
  }
  /// Make a value from a native `u32`
  #[inline]
  #[must_use]
  pub const fn from_u32(u: u32) -> Self {
    Self(u.to_be_bytes())
  }
}
impl core::fmt::Debug for U32BE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("U32BE").field(&self.to_u32()).finish()
  }
}

#[test]
fn test_endianness_u32_round_trip() {
  let be = Endianness::Big.u32_to_bytes(0x5344_5058);
  assert_eq!(&be, b"SDPX");
  let le = Endianness::Little.u32_to_bytes(0x5344_5058);
  assert_eq!(&le, b"XPDS");
  assert_eq!(Endianness::Little.u32_from_bytes(le), 0x5344_5058);
  assert_eq!(U32BE::from_u32(7).to_u32(), 7);
  assert_eq!(bytemuck::cast::<U32BE, [u8; 4]>(U32BE::from_u32(1)), [0, 0, 0, 1]);
}
