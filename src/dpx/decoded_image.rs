use super::*;
use alloc::vec::Vec;

/// One owned image plane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Plane {
  /// The plane bytes, `stride * height` long.
  pub data: Vec<u8>,
  /// Byte distance between the starts of two rows.
  pub stride: usize,
}

/// A decoded DPX frame.
///
/// Packed formats have one plane, planar formats have three (G, B, R). The
/// fields are public, but if you put them together weirdly the accessor
/// methods will return `None`.
///
/// The same value can be passed to [`DpxDecoder::decode_into`] again and
/// again, and the plane allocations are reused when they're big enough.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedImage {
  /// Width in pixels.
  pub width: u32,
  /// Height in pixels.
  pub height: u32,
  /// Layout of the plane data.
  pub pixel_format: DpxPixelFormat,
  /// Pixel aspect ratio from the header, or [`Rational::UNKNOWN`].
  pub aspect_ratio: Rational,
  /// The planes.
  pub planes: Vec<Plane>,
}
impl Default for DecodedImage {
  #[inline]
  fn default() -> Self {
    Self {
      width: 0,
      height: 0,
      pixel_format: DpxPixelFormat::Rgb24,
      aspect_ratio: Rational::UNKNOWN,
      planes: Vec::new(),
    }
  }
}
impl DecodedImage {
  /// Sizes the planes for an image, reusing the existing allocations.
  ///
  /// Plane bytes are zeroed. If the size check or an allocation fails the
  /// image is left as it was.
  pub fn prepare(
    &mut self, width: u32, height: u32, pixel_format: DpxPixelFormat, options: &DecodeOptions,
  ) -> DpxResult<()> {
    options.check_dimensions(width, height)?;
    let row_bytes = pixel_format.row_bytes(width).ok_or(DpxError::AllocationFailed)?;
    let stride = options.stride_for(row_bytes).ok_or(DpxError::AllocationFailed)?;
    let plane_len =
      stride.checked_mul(usize::try_from(height)?).ok_or(DpxError::AllocationFailed)?;
    let plane_count = pixel_format.plane_count();
    // every allocation happens before the plane list changes
    let missing = plane_count.saturating_sub(self.planes.len());
    let mut new_planes = Vec::new();
    new_planes.try_reserve(missing)?;
    for _ in 0..missing {
      let mut data = Vec::new();
      data.try_reserve(plane_len)?;
      new_planes.push(Plane { data, stride });
    }
    for plane in self.planes.iter_mut().take(plane_count) {
      plane.data.try_reserve(plane_len.saturating_sub(plane.data.len()))?;
    }
    self.planes.try_reserve(missing)?;
    self.planes.append(&mut new_planes);
    self.planes.truncate(plane_count);
    for plane in self.planes.iter_mut() {
      plane.data.clear();
      plane.data.resize(plane_len, 0);
      plane.stride = stride;
    }
    self.width = width;
    self.height = height;
    self.pixel_format = pixel_format;
    Ok(())
  }

  /// Borrows the planes for [`unpack_into_planes`].
  #[inline]
  pub fn planes_mut(&mut self) -> DpxResult<Vec<PlaneMut<'_>>> {
    let mut out = Vec::new();
    out.try_reserve(self.planes.len())?;
    out.extend(self.planes.iter_mut().map(|p| PlaneMut::new(p.data.as_mut_slice(), p.stride)));
    Ok(out)
  }

  /// Gets a plane, or `None` if the index is out of bounds.
  #[inline]
  #[must_use]
  pub fn plane(&self, index: usize) -> Option<&Plane> {
    self.planes.get(index)
  }

  /// Gets the used bytes of row `y` of a plane, without the stride padding.
  #[inline]
  #[must_use]
  pub fn row(&self, plane: usize, y: u32) -> Option<&[u8]> {
    if y >= self.height {
      return None;
    }
    let p = self.planes.get(plane)?;
    let start = usize::try_from(y).ok()?.checked_mul(p.stride)?;
    let len = self.pixel_format.row_bytes(self.width)?;
    p.data.get(start..start.checked_add(len)?)
  }

  /// Reads one channel sample (0 = red, 1 = green, 2 = blue, 3 = alpha).
  ///
  /// Multi-byte samples are read in the byte order of the pixel format.
  #[inline]
  #[must_use]
  pub fn sample(&self, x: u32, y: u32, channel: usize) -> Option<u16> {
    if x >= self.width {
      return None;
    }
    let (plane, position) = self.pixel_format.locate_channel(channel)?;
    let row = self.row(plane, y)?;
    let bytes_per_sample = self.pixel_format.bytes_per_sample();
    let per_pixel = self.pixel_format.channels_per_plane() * bytes_per_sample;
    let start = usize::try_from(x).ok()? * per_pixel + position * bytes_per_sample;
    let bytes = row.get(start..start + bytes_per_sample)?;
    match self.pixel_format.sample_endianness() {
      None => bytes.first().copied().map(u16::from),
      Some(e) => Some(e.u16_from_bytes(bytes.try_into().ok()?)),
    }
  }

  /// Reads a pixel as `[r, g, b, a]` sample values.
  ///
  /// Formats without alpha give the format's maximum sample value for alpha.
  #[inline]
  #[must_use]
  pub fn rgba_u16(&self, x: u32, y: u32) -> Option<[u16; 4]> {
    let r = self.sample(x, y, 0)?;
    let g = self.sample(x, y, 1)?;
    let b = self.sample(x, y, 2)?;
    let a = if self.pixel_format.channel_count() == 4 {
      self.sample(x, y, 3)?
    } else {
      self.pixel_format.max_sample_value()
    };
    Some([r, g, b, a])
  }
}
