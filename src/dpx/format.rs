use super::*;

/// The channel layout of a DPX image element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Descriptor {
  /// Red, green, blue.
  Rgb,
  /// Red, green, blue, alpha.
  Rgba,
}
impl Descriptor {
  /// Converts a descriptor byte.
  ///
  /// SMPTE 268M uses 50 for RGB and 51 for RGBA. The element count shorthand
  /// (3 and 4) is also accepted for the same layouts.
  ///
  /// Careful: in SMPTE 268M itself code 3 is a single Blue channel and code 4
  /// is a single Alpha channel. A file that really holds one of those
  /// single-channel elements is read here as RGB or RGBA, which gives wrong
  /// pixels (or [`DpxError::BufferOverread`] when the data is too short).
  #[inline]
  #[must_use]
  pub const fn from_byte(b: u8) -> Option<Self> {
    match b {
      50 | 3 => Some(Self::Rgb),
      51 | 4 => Some(Self::Rgba),
      _ => None,
    }
  }
  /// Channels per pixel.
  #[inline]
  #[must_use]
  pub const fn element_count(self) -> u8 {
    match self {
      Self::Rgb => 3,
      Self::Rgba => 4,
    }
  }
}

/// The layout of decoded pixels.
///
/// Packed formats have one plane with all channels of a pixel next to each
/// other. Planar formats have one plane per channel, in G, B, R order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum DpxPixelFormat {
  /// Packed `[r, g, b]`, 8 bits each.
  Rgb24,
  /// Packed `[r, g, b, a]`, 8 bits each.
  Rgba32,
  /// Planar G, B, R. Each sample is a native-endian `u16` holding 10 bits.
  Gbrp10,
  /// Planar G, B, R. Each sample is a big-endian `u16` holding 12 bits.
  Gbrp12Be,
  /// Planar G, B, R. Each sample is a little-endian `u16` holding 12 bits.
  Gbrp12Le,
  Rgb48Be,
  Rgb48Le,
  Rgba64Be,
  Rgba64Le,
}
impl DpxPixelFormat {
  /// If each channel has its own plane.
  #[inline]
  #[must_use]
  pub const fn is_planar(self) -> bool {
    matches!(self, Self::Gbrp10 | Self::Gbrp12Be | Self::Gbrp12Le)
  }
  /// How many planes an image of this format has.
  #[inline]
  #[must_use]
  pub const fn plane_count(self) -> usize {
    if self.is_planar() {
      3
    } else {
      1
    }
  }
  /// Channels per pixel.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Rgba32 | Self::Rgba64Be | Self::Rgba64Le => 4,
      _ => 3,
    }
  }
  /// Channels stored in each plane for one pixel.
  #[inline]
  #[must_use]
  pub const fn channels_per_plane(self) -> usize {
    if self.is_planar() {
      1
    } else {
      self.channel_count()
    }
  }
  /// Bytes used by one channel sample.
  #[inline]
  #[must_use]
  pub const fn bytes_per_sample(self) -> usize {
    match self {
      Self::Rgb24 | Self::Rgba32 => 1,
      _ => 2,
    }
  }
  /// Significant bits in each sample.
  #[inline]
  #[must_use]
  pub const fn bit_depth(self) -> u8 {
    match self {
      Self::Rgb24 | Self::Rgba32 => 8,
      Self::Gbrp10 => 10,
      Self::Gbrp12Be | Self::Gbrp12Le => 12,
      _ => 16,
    }
  }
  /// The largest value a sample can hold.
  #[inline]
  #[must_use]
  pub const fn max_sample_value(self) -> u16 {
    ((1_u32 << self.bit_depth() as u32) - 1) as u16
  }
  /// Byte order of the multi-byte samples, `None` for 8-bit formats.
  #[inline]
  #[must_use]
  pub const fn sample_endianness(self) -> Option<Endianness> {
    match self {
      Self::Rgb24 | Self::Rgba32 => None,
      Self::Gbrp10 => Some(Endianness::native()),
      Self::Gbrp12Be | Self::Rgb48Be | Self::Rgba64Be => Some(Endianness::Big),
      Self::Gbrp12Le | Self::Rgb48Le | Self::Rgba64Le => Some(Endianness::Little),
    }
  }
  /// Bytes used by one row of one plane, or `None` on overflow.
  #[inline]
  #[must_use]
  pub const fn row_bytes(self, width: u32) -> Option<usize> {
    (width as usize).checked_mul(self.channels_per_plane() * self.bytes_per_sample())
  }
  /// The conventional short name of this layout, as used by raw video tools
  /// (`rgb24`, `gbrp12be`, and so on).
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Rgb24 => "rgb24",
      Self::Rgba32 => "rgba",
      Self::Gbrp10 if cfg!(target_endian = "big") => "gbrp10be",
      Self::Gbrp10 => "gbrp10le",
      Self::Gbrp12Be => "gbrp12be",
      Self::Gbrp12Le => "gbrp12le",
      Self::Rgb48Be => "rgb48be",
      Self::Rgb48Le => "rgb48le",
      Self::Rgba64Be => "rgba64be",
      Self::Rgba64Le => "rgba64le",
    }
  }
  /// The plane that holds a channel (0 = red, 1 = green, 2 = blue, 3 =
  /// alpha), and the channel's position within a pixel of that plane.
  #[inline]
  #[must_use]
  pub const fn locate_channel(self, channel: usize) -> Option<(usize, usize)> {
    if channel >= self.channel_count() {
      return None;
    }
    if self.is_planar() {
      Some((PLANE_OF_CHANNEL[channel], 0))
    } else {
      Some((0, channel))
    }
  }
}

/// Planar output plane for each source channel. Source order is R, G, B and
/// planes are G, B, R.
pub const PLANE_OF_CHANNEL: [usize; 3] = [2, 0, 1];

/// How the pixel data of a frame maps to the decoded layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormatDescriptor {
  /// Channels per pixel, 3 or 4.
  pub element_count: u8,
  /// If the output has one plane per channel.
  pub planar: bool,
  /// Bytes read from the pixel data per pixel.
  pub source_packet_size: u8,
  /// Bytes written to the output per pixel (summed over all planes).
  pub target_packet_size: u8,
  /// Bits per channel in the source.
  pub bits_per_sample: u8,
  /// Byte order of the source words.
  pub endianness: Endianness,
  /// The output layout.
  pub pixel_format: DpxPixelFormat,
}

/// Works out the output layout for a descriptor byte and bit depth.
///
/// | descriptor | bits | output |
/// |:-:|:-:|:-|
/// | RGB | 8 | [`Rgb24`](DpxPixelFormat::Rgb24) |
/// | RGBA | 8 | [`Rgba32`](DpxPixelFormat::Rgba32) |
/// | RGB | 10 | [`Gbrp10`](DpxPixelFormat::Gbrp10) |
/// | RGB | 12 | `Gbrp12Be`/`Gbrp12Le` |
/// | RGB | 16 | `Rgb48Be`/`Rgb48Le` |
/// | RGBA | 16 | `Rgba64Be`/`Rgba64Le` |
///
/// RGBA at 10 or 12 bits has no three-plane output, so it's rejected with
/// [`DpxError::UnsupportedFormat`].
pub fn resolve_format(
  descriptor: u8, bits_per_sample: u8, endianness: Endianness,
) -> DpxResult<PixelFormatDescriptor> {
  let layout = Descriptor::from_byte(descriptor).ok_or_else(|| {
    log::error!("Unsupported descriptor {descriptor}");
    DpxError::UnsupportedDescriptor(descriptor)
  })?;
  let element_count = layout.element_count();
  let big = endianness == Endianness::Big;
  let (planar, source_packet_size, target_packet_size, pixel_format) =
    match (bits_per_sample, layout) {
      (8, Descriptor::Rgb) => (false, 3, 3, DpxPixelFormat::Rgb24),
      (8, Descriptor::Rgba) => (false, 4, 4, DpxPixelFormat::Rgba32),
      (10, Descriptor::Rgb) => (true, 4, 6, DpxPixelFormat::Gbrp10),
      (12, Descriptor::Rgb) => {
        (true, 6, 6, if big { DpxPixelFormat::Gbrp12Be } else { DpxPixelFormat::Gbrp12Le })
      }
      (16, Descriptor::Rgb) => {
        (false, 6, 6, if big { DpxPixelFormat::Rgb48Be } else { DpxPixelFormat::Rgb48Le })
      }
      (16, Descriptor::Rgba) => {
        (false, 8, 8, if big { DpxPixelFormat::Rgba64Be } else { DpxPixelFormat::Rgba64Le })
      }
      (10 | 12, Descriptor::Rgba) => {
        log::error!("Unsupported {bits_per_sample}-bit depth with an alpha channel");
        return Err(DpxError::UnsupportedFormat);
      }
      _ => {
        log::error!("Unsupported color depth: {bits_per_sample}");
        return Err(DpxError::UnsupportedBitDepth(bits_per_sample));
      }
    };
  Ok(PixelFormatDescriptor {
    element_count,
    planar,
    source_packet_size,
    target_packet_size,
    bits_per_sample,
    endianness,
    pixel_format,
  })
}
