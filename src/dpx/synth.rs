//! Writes minimal DPX frames for the unit tests.

use super::*;
use alloc::{vec, vec::Vec};

pub(crate) const SYNTH_DATA_OFFSET: usize = 2048;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SynthDpx {
  pub endianness: Endianness,
  pub descriptor: u8,
  pub bits: u8,
  pub width: u32,
  pub height: u32,
  pub aspect: (u32, u32),
}
impl SynthDpx {
  pub fn rgb8() -> Self {
    Self { endianness: Endianness::Big, descriptor: 50, bits: 8, width: 1, height: 1, aspect: (1, 1) }
  }
  pub fn rgba8() -> Self {
    Self { descriptor: 51, ..Self::rgb8() }
  }
  pub fn rgb10() -> Self {
    Self { bits: 10, ..Self::rgb8() }
  }
  pub fn rgb12() -> Self {
    Self { bits: 12, ..Self::rgb8() }
  }
  pub fn rgba16() -> Self {
    Self { descriptor: 51, bits: 16, ..Self::rgb8() }
  }
  /// A 2048 byte header followed by `pixels`.
  pub fn build(&self, pixels: &[u8]) -> Vec<u8> {
    let e = self.endianness;
    let mut out = vec![0_u8; SYNTH_DATA_OFFSET];
    out[0..4].copy_from_slice(&e.u32_to_bytes(DPX_MAGIC));
    out[4..8].copy_from_slice(&e.u32_to_bytes(SYNTH_DATA_OFFSET as u32));
    out[OFFSET_IMAGE_SIZE..][..4].copy_from_slice(&e.u32_to_bytes(self.width));
    out[OFFSET_IMAGE_SIZE + 4..][..4].copy_from_slice(&e.u32_to_bytes(self.height));
    out[OFFSET_DESCRIPTOR] = self.descriptor;
    out[OFFSET_BITS_PER_SAMPLE] = self.bits;
    out[OFFSET_ASPECT_RATIO..][..4].copy_from_slice(&e.u32_to_bytes(self.aspect.0));
    out[OFFSET_ASPECT_RATIO + 4..][..4].copy_from_slice(&e.u32_to_bytes(self.aspect.1));
    out.extend_from_slice(pixels);
    out
  }
}

/// Packs `r`, `g`, `b` the way a 10-bit DPX word holds them.
pub(crate) fn pack_10bit(r: u16, g: u16, b: u16) -> u32 {
  (u32::from(r & 0x3FF) << 22) | (u32::from(g & 0x3FF) << 12) | (u32::from(b & 0x3FF) << 2)
}
