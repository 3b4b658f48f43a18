#![forbid(unsafe_code)]

//! Module for Digital Picture Exchange files (DPX).
//!
//! ## Parsing The Format
//!
//! * A DPX file starts with a 4 byte magic value. It's `SDPX` if the file is
//!   big-endian and `XPDS` if it's little-endian. Every multi-byte value after
//!   that uses the same byte order.
//! * The next 4 bytes are the offset of the pixel data from the start of the
//!   file.
//! * The rest of the header is a fixed layout, so each field is at a fixed
//!   offset. The decoder reads:
//!   * Width and height at `0x304`.
//!   * The descriptor of the first image element at `0x320`. This is 50 for
//!     RGB and 51 for RGBA.
//!   * The bits per sample of the first image element at `0x323`.
//!   * The pixel aspect ratio (two signed words) at `0x65C`.
//! * The pixel data is rows of pixels, top to bottom, with no padding between
//!   rows:
//!   * 8 and 16 bits per sample store channels one after the other, R, G, B
//!     (and A).
//!   * 12 bits per sample stores each channel in a 16-bit word.
//!   * 10 bits per sample packs the three channels of a pixel into a single
//!     32-bit word, see [`split_10bit_word`].
//!
//! ## Decoding
//!
//! With the `alloc` feature just call [`dpx_decode`], or make a
//! [`DpxDecoder`] if you want to control the row alignment or reuse the output
//! allocation between frames.
//!
//! Without allocation, call [`parse_header`], then [`resolve_format`], and
//! then [`unpack_into_planes`] with planes you've sized from the
//! [`DpxPixelFormat`].

use crate::{
  try_pull_pod, try_u32_at, try_u8_at, DpxError, DpxResult, Endianness, PlaneMut, Rational, U32BE,
};

mod header;
pub use header::*;

mod format;
pub use format::*;

mod unpack;
pub use unpack::*;

mod options;
pub use options::*;

#[cfg(feature = "alloc")]
mod decoded_image;
#[cfg(feature = "alloc")]
pub use decoded_image::*;

#[cfg(feature = "alloc")]
mod decoder;
#[cfg(feature = "alloc")]
pub use decoder::*;

#[cfg(all(test, feature = "alloc"))]
pub(crate) mod synth;
