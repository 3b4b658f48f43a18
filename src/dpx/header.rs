use super::*;

/// `SDPX` read as a big-endian `u32`.
pub const DPX_MAGIC: u32 = u32::from_be_bytes(*b"SDPX");

/// `SDPX` with the bytes reversed, which is how little-endian files start.
pub const DPX_MAGIC_SWAPPED: u32 = u32::from_le_bytes(*b"SDPX");

/// Smallest byte count that can hold every header field the decoder reads.
pub const DPX_MIN_LEN: usize = 1635;

/// Absolute offset of the pixels-per-line and lines-per-element words.
pub const OFFSET_IMAGE_SIZE: usize = 0x304;

/// Absolute offset of the first image element's descriptor byte.
pub const OFFSET_DESCRIPTOR: usize = OFFSET_IMAGE_SIZE + 8 + 20;

/// Absolute offset of the first image element's bit size byte.
pub const OFFSET_BITS_PER_SAMPLE: usize = OFFSET_DESCRIPTOR + 3;

/// Absolute offset of the pixel aspect ratio words (orientation header).
pub const OFFSET_ASPECT_RATIO: usize = OFFSET_BITS_PER_SAMPLE + 825;

/// Largest numerator or denominator kept after reducing the aspect ratio.
pub const ASPECT_RATIO_MAX: i32 = 0x10000;

/// The fields of a DPX header that decoding needs.
///
/// The rest of the header (film, TV, and user data) is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DpxHeader {
  /// Byte order of every multi-byte value in the file.
  pub endianness: Endianness,
  /// Byte offset of the pixel data. Always less than the data length.
  pub data_offset: u32,
  /// Pixels per line.
  pub width: u32,
  /// Lines per image element.
  pub height: u32,
  /// Raw descriptor byte. See [`Descriptor::from_byte`].
  pub descriptor: u8,
  /// Bits per channel sample.
  pub bits_per_sample: u8,
  /// Pixel aspect ratio, or [`Rational::UNKNOWN`].
  pub aspect_ratio: Rational,
}
impl DpxHeader {
  /// Parses the header at the start of a DPX frame.
  ///
  /// ## Failure
  /// * [`DpxError::TooSmall`] if there's less than [`DPX_MIN_LEN`] bytes.
  /// * [`DpxError::BadMagic`] if the frame doesn't start with `SDPX` in either
  ///   byte order.
  /// * [`DpxError::OffsetOutOfRange`] if the data offset isn't within the
  ///   bytes given.
  ///
  /// The descriptor and bit depth aren't checked here, that's done by
  /// [`resolve_format`].
  pub fn try_from_bytes(bytes: &[u8]) -> DpxResult<Self> {
    if bytes.len() < DPX_MIN_LEN {
      log::error!("Data too small for a DPX header: {} bytes", bytes.len());
      return Err(DpxError::TooSmall);
    }
    let (magic, rest) = try_pull_pod::<U32BE>(bytes)?;
    let endianness = match magic.to_u32() {
      DPX_MAGIC => Endianness::Big,
      DPX_MAGIC_SWAPPED => Endianness::Little,
      other => {
        log::error!("DPX marker not found: {other:#010X}");
        return Err(DpxError::BadMagic);
      }
    };
    let (offset_bytes, _) = try_pull_pod::<[u8; 4]>(rest)?;
    let data_offset = endianness.u32_from_bytes(offset_bytes);
    if usize::try_from(data_offset).map_or(true, |off| off >= bytes.len()) {
      log::error!("Invalid data start offset: {data_offset} (len {})", bytes.len());
      return Err(DpxError::OffsetOutOfRange);
    }

    let width = try_u32_at(bytes, OFFSET_IMAGE_SIZE, endianness)?;
    let height = try_u32_at(bytes, OFFSET_IMAGE_SIZE + 4, endianness)?;
    let descriptor = try_u8_at(bytes, OFFSET_DESCRIPTOR)?;
    let bits_per_sample = try_u8_at(bytes, OFFSET_BITS_PER_SAMPLE)?;
    let aspect_ratio = read_aspect_ratio(bytes, endianness);

    let header =
      Self { endianness, data_offset, width, height, descriptor, bits_per_sample, aspect_ratio };
    log::debug!("DPX header: {header:?}");
    Ok(header)
  }

  /// The pixel data, which is everything from the data offset onward.
  #[inline]
  #[must_use]
  pub fn pixel_data<'b>(&self, bytes: &'b [u8]) -> Option<&'b [u8]> {
    bytes.get(usize::try_from(self.data_offset).ok()?..)
  }
}

/// Parses the header at the start of a DPX frame.
///
/// Same as [`DpxHeader::try_from_bytes`].
#[inline]
pub fn parse_header(bytes: &[u8]) -> DpxResult<DpxHeader> {
  DpxHeader::try_from_bytes(bytes)
}

/// The aspect ratio words are signed. If either part isn't positive, or the
/// words run off the end of a minimum size frame, the ratio is unknown.
fn read_aspect_ratio(bytes: &[u8], endianness: Endianness) -> Rational {
  let num = try_u32_at(bytes, OFFSET_ASPECT_RATIO, endianness);
  let den = try_u32_at(bytes, OFFSET_ASPECT_RATIO + 4, endianness);
  match (num, den) {
    (Ok(num), Ok(den)) => {
      let (num, den) = (num as i32, den as i32);
      if num > 0 && den > 0 {
        Rational::reduce(i64::from(num), i64::from(den), ASPECT_RATIO_MAX).0
      } else {
        Rational::UNKNOWN
      }
    }
    _ => {
      log::warn!("DPX aspect ratio is past the end of the data");
      Rational::UNKNOWN
    }
  }
}
