use super::*;
use crate::image::Bitmap;
use alloc::vec::Vec;
use pixel_formats::r32g32b32a32_Sfloat;

/// Unpacks a frame into a newly allocated image, with default options.
#[inline]
pub fn unpack(
  bytes: &[u8], header: &DpxHeader, fmt: &PixelFormatDescriptor,
) -> DpxResult<DecodedImage> {
  let mut image = DecodedImage::default();
  unpack_with(bytes, header, fmt, &DecodeOptions::default(), &mut image)?;
  Ok(image)
}

/// Unpacks a frame into a caller owned image, reusing its planes.
///
/// `fmt` and the data length go through [`check_source_len`] once, before
/// the image is touched, so a [`DpxError::BufferOverread`] or
/// [`DpxError::UnsupportedFormat`] from it leaves `image` as it was.
pub fn unpack_with(
  bytes: &[u8], header: &DpxHeader, fmt: &PixelFormatDescriptor, options: &DecodeOptions,
  image: &mut DecodedImage,
) -> DpxResult<()> {
  let data = check_source_len(bytes, header, fmt)?;
  image.prepare(header.width, header.height, fmt.pixel_format, options)?;
  image.aspect_ratio = header.aspect_ratio;
  let mut planes = image.planes_mut()?;
  super::unpack::unpack_checked_into_planes(data, header, fmt, &mut planes)
}

/// Decodes DPX frames.
///
/// The decoder itself holds only settings. Output goes into the
/// [`DecodedImage`] you pass in (or get back), so one decoder can be shared
/// between threads as long as each thread uses its own image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DpxDecoder {
  /// Output layout and size limits.
  pub options: DecodeOptions,
}
impl DpxDecoder {
  /// Makes a decoder with the options given.
  #[inline]
  #[must_use]
  pub const fn new(options: DecodeOptions) -> Self {
    Self { options }
  }

  /// Decodes one frame into a new image.
  #[inline]
  pub fn decode(&self, bytes: &[u8]) -> DpxResult<DecodedImage> {
    let mut image = DecodedImage::default();
    self.decode_into(bytes, &mut image)?;
    Ok(image)
  }

  /// Decodes one frame into an existing image, reusing its allocations.
  pub fn decode_into(&self, bytes: &[u8], image: &mut DecodedImage) -> DpxResult<()> {
    let header = parse_header(bytes)?;
    let fmt = resolve_format(header.descriptor, header.bits_per_sample, header.endianness)?;
    unpack_with(bytes, &header, &fmt, &self.options, image)?;
    log::debug!(
      "Decoded DPX {}x{} {:?}, aspect {}/{}",
      image.width,
      image.height,
      image.pixel_format,
      image.aspect_ratio.num,
      image.aspect_ratio.den
    );
    Ok(())
  }
}

/// Decodes one DPX frame with default options.
#[inline]
pub fn dpx_decode(bytes: &[u8]) -> DpxResult<DecodedImage> {
  DpxDecoder::default().decode(bytes)
}

/// Decodes one DPX frame into a [`Bitmap`] of any pixel type that converts
/// from linear floats.
///
/// Each sample is divided by the format's maximum value, so every channel
/// lands in `0.0 ..= 1.0`. Rows stay in file order (top to bottom).
pub fn dpx_try_bitmap<P>(bytes: &[u8]) -> DpxResult<Bitmap<P>>
where
  P: From<r32g32b32a32_Sfloat>,
{
  let image = DpxDecoder::new(DecodeOptions::PACKED).decode(bytes)?;
  let max = f32::from(image.pixel_format.max_sample_value());
  let pixel_count = usize::try_from(u64::from(image.width) * u64::from(image.height))?;
  let mut pixels: Vec<P> = Vec::new();
  pixels.try_reserve(pixel_count)?;
  for y in 0..image.height {
    for x in 0..image.width {
      let [r, g, b, a] = image.rgba_u16(x, y).ok_or(DpxError::OutputTooSmall)?;
      let (r, g, b, a) =
        (f32::from(r) / max, f32::from(g) / max, f32::from(b) / max, f32::from(a) / max);
      pixels.push(P::from(r32g32b32a32_Sfloat { r, g, b, a }));
    }
  }
  Ok(Bitmap { width: image.width, height: image.height, pixels })
}
