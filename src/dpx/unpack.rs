use super::*;

/// Splits a 10-bit DPX word into `[r, g, b]`.
///
/// The word holds red in bits 22..=31, green in 12..=21, blue in 2..=11, and
/// two padding bits at the bottom.
#[inline]
#[must_use]
pub const fn split_10bit_word(word: u32) -> [u16; 3] {
  let r = ((word >> 22) & 0x3FF) as u16;
  let g = ((word >> 12) & 0x3FF) as u16;
  let b = ((word >> 2) & 0x3FF) as u16;
  [r, g, b]
}

/// Checks that `fmt` is self-consistent and that the pixel data holds every
/// row the header declares.
///
/// Returns the pixel data on success.
///
/// ## Failure
/// * [`DpxError::UnsupportedFormat`] if the packet sizes of `fmt` don't match
///   its pixel format.
/// * [`DpxError::BufferOverread`] if the data is too short.
pub fn check_source_len<'b>(
  bytes: &'b [u8], header: &DpxHeader, fmt: &PixelFormatDescriptor,
) -> DpxResult<&'b [u8]> {
  check_packet_sizes(fmt)?;
  let data = header.pixel_data(bytes).ok_or(DpxError::OffsetOutOfRange)?;
  let needed = u64::from(fmt.source_packet_size)
    .checked_mul(u64::from(header.width))
    .and_then(|n| n.checked_mul(u64::from(header.height)));
  match needed {
    Some(needed) if needed <= data.len() as u64 => Ok(data),
    _ => {
      log::error!(
        "Overread buffer: {}x{} at {} bytes per pixel needs more than {} bytes. Invalid header?",
        header.width,
        header.height,
        fmt.source_packet_size,
        data.len()
      );
      Err(DpxError::BufferOverread)
    }
  }
}

/// Output rows are sized from `pixel_format`, so the packet sizes and
/// planarity of `fmt` have to agree with it.
fn check_packet_sizes(fmt: &PixelFormatDescriptor) -> DpxResult<()> {
  let pixel_format = fmt.pixel_format;
  let target_matches = fmt.planar == pixel_format.is_planar()
    && pixel_format
      .row_bytes(1)
      .and_then(|b| b.checked_mul(pixel_format.plane_count()))
      .map_or(false, |b| b == usize::from(fmt.target_packet_size));
  let source_ok = match (fmt.bits_per_sample, fmt.planar) {
    (10, true) => fmt.source_packet_size == 4,
    (_, true) => fmt.source_packet_size > 0 && fmt.element_count >= 3,
    _ => fmt.source_packet_size > 0,
  };
  if target_matches && source_ok {
    Ok(())
  } else {
    log::error!("Packet sizes don't fit the pixel format: {fmt:?}");
    Err(DpxError::UnsupportedFormat)
  }
}

/// Unpacks the pixel data of a frame into planes that you provide.
///
/// * `planes` needs at least [`plane_count`](DpxPixelFormat::plane_count)
///   entries, and each must [fit](PlaneMut::fits) `height` rows of
///   [`row_bytes`](DpxPixelFormat::row_bytes).
/// * Rows are written top to bottom in file order.
/// * Bytes past the end of each row (up to the stride) aren't touched.
///
/// ## Failure
/// * [`DpxError::BufferOverread`] if the declared dimensions need more data
///   than the frame has.
/// * [`DpxError::OutputTooSmall`] if the planes can't hold the image.
/// * [`DpxError::UnsupportedFormat`] if `fmt` pairs a bit depth with a
///   layout that no strategy handles, or its packet sizes don't match its
///   pixel format.
///
/// All checks happen before anything is written.
pub fn unpack_into_planes(
  bytes: &[u8], header: &DpxHeader, fmt: &PixelFormatDescriptor, planes: &mut [PlaneMut<'_>],
) -> DpxResult<()> {
  let data = check_source_len(bytes, header, fmt)?;
  unpack_checked_into_planes(data, header, fmt, planes)
}

/// Same as [`unpack_into_planes`], for pixel data that already passed
/// [`check_source_len`].
pub(crate) fn unpack_checked_into_planes(
  data: &[u8], header: &DpxHeader, fmt: &PixelFormatDescriptor, planes: &mut [PlaneMut<'_>],
) -> DpxResult<()> {
  let pixel_format = fmt.pixel_format;
  let height = usize::try_from(header.height)?;
  let row_bytes = pixel_format.row_bytes(header.width).ok_or(DpxError::AllocationFailed)?;
  let plane_count = pixel_format.plane_count();
  if planes.len() < plane_count
    || !planes[..plane_count].iter().all(|p| p.fits(row_bytes, height))
  {
    log::error!("Output planes can't hold {}x{} {pixel_format:?}", header.width, header.height);
    return Err(DpxError::OutputTooSmall);
  }
  let width = usize::try_from(header.width)?;
  if width == 0 || height == 0 {
    return Ok(());
  }
  let src_row_bytes = usize::from(fmt.source_packet_size) * width;

  match (fmt.bits_per_sample, fmt.planar) {
    (10, true) => {
      log::trace!("DPX unpack: 10-bit words to planes");
      unpack_10bit_planar(data, src_row_bytes, row_bytes, height, fmt.endianness, planes)
    }
    (8 | 12 | 16, true) => {
      log::trace!("DPX unpack: per-channel copy to planes");
      unpack_planar(data, src_row_bytes, row_bytes, height, fmt, planes)
    }
    (8 | 16, false) if fmt.source_packet_size == fmt.target_packet_size => {
      log::trace!("DPX unpack: row copy");
      unpack_packed_rows(data, src_row_bytes, height, &mut planes[0])
    }
    (8 | 16, false) => {
      log::trace!("DPX unpack: per-pixel copy");
      unpack_packed_pixels(data, src_row_bytes, row_bytes, height, fmt, &mut planes[0])
    }
    _ => {
      log::error!("No unpacker for {} bits (planar: {})", fmt.bits_per_sample, fmt.planar);
      Err(DpxError::UnsupportedFormat)
    }
  }
}

fn unpack_10bit_planar(
  data: &[u8], src_row_bytes: usize, dst_row_bytes: usize, height: usize, endianness: Endianness,
  planes: &mut [PlaneMut<'_>],
) -> DpxResult<()> {
  let [g_plane, b_plane, r_plane, ..] = planes else {
    return Err(DpxError::OutputTooSmall);
  };
  for (y, src_row) in data.chunks_exact(src_row_bytes.max(1)).take(height).enumerate() {
    let g_row = g_plane.row_mut(y, dst_row_bytes).ok_or(DpxError::OutputTooSmall)?;
    let b_row = b_plane.row_mut(y, dst_row_bytes).ok_or(DpxError::OutputTooSmall)?;
    let r_row = r_plane.row_mut(y, dst_row_bytes).ok_or(DpxError::OutputTooSmall)?;
    let dst = g_row.chunks_exact_mut(2).zip(b_row.chunks_exact_mut(2)).zip(r_row.chunks_exact_mut(2));
    for (src, ((g, b), r)) in src_row.chunks_exact(4).zip(dst) {
      let word = endianness.u32_from_bytes(src.try_into().unwrap_or_default());
      let [rv, gv, bv] = split_10bit_word(word);
      g.copy_from_slice(&gv.to_ne_bytes());
      b.copy_from_slice(&bv.to_ne_bytes());
      r.copy_from_slice(&rv.to_ne_bytes());
    }
  }
  Ok(())
}

fn unpack_planar(
  data: &[u8], src_row_bytes: usize, dst_row_bytes: usize, height: usize,
  fmt: &PixelFormatDescriptor, planes: &mut [PlaneMut<'_>],
) -> DpxResult<()> {
  let [g_plane, b_plane, r_plane, ..] = planes else {
    return Err(DpxError::OutputTooSmall);
  };
  let elements = usize::from(fmt.element_count);
  if elements < 3 {
    return Err(DpxError::UnsupportedFormat);
  }
  let source_bpc = usize::from(fmt.source_packet_size) / elements;
  let target_bpc = usize::from(fmt.target_packet_size) / elements;
  let copy_len = source_bpc.min(target_bpc);
  let source_packet = usize::from(fmt.source_packet_size);
  for (y, src_row) in data.chunks_exact(src_row_bytes.max(1)).take(height).enumerate() {
    let mut dst: [&mut [u8]; 3] = [
      g_plane.row_mut(y, dst_row_bytes).ok_or(DpxError::OutputTooSmall)?,
      b_plane.row_mut(y, dst_row_bytes).ok_or(DpxError::OutputTooSmall)?,
      r_plane.row_mut(y, dst_row_bytes).ok_or(DpxError::OutputTooSmall)?,
    ];
    for (x, src_px) in src_row.chunks_exact(source_packet).enumerate() {
      for (channel, &plane) in PLANE_OF_CHANNEL.iter().enumerate() {
        let src = &src_px[channel * source_bpc..][..copy_len];
        dst[plane][x * target_bpc..][..copy_len].copy_from_slice(src);
      }
    }
  }
  Ok(())
}

fn unpack_packed_rows(
  data: &[u8], src_row_bytes: usize, height: usize, plane: &mut PlaneMut<'_>,
) -> DpxResult<()> {
  for (y, src_row) in data.chunks_exact(src_row_bytes.max(1)).take(height).enumerate() {
    plane.row_mut(y, src_row_bytes).ok_or(DpxError::OutputTooSmall)?.copy_from_slice(src_row);
  }
  Ok(())
}

/// The source pixel can be bigger or smaller than the target pixel. Only the
/// overlapping bytes are copied and any extra target bytes are zeroed.
fn unpack_packed_pixels(
  data: &[u8], src_row_bytes: usize, dst_row_bytes: usize, height: usize,
  fmt: &PixelFormatDescriptor, plane: &mut PlaneMut<'_>,
) -> DpxResult<()> {
  let source_packet = usize::from(fmt.source_packet_size).max(1);
  let target_packet = usize::from(fmt.target_packet_size).max(1);
  let copy_len = source_packet.min(target_packet);
  for (y, src_row) in data.chunks_exact(src_row_bytes.max(1)).take(height).enumerate() {
    let dst_row = plane.row_mut(y, dst_row_bytes).ok_or(DpxError::OutputTooSmall)?;
    for (src, dst) in src_row.chunks_exact(source_packet).zip(dst_row.chunks_exact_mut(target_packet))
    {
      let (head, tail) = dst.split_at_mut(copy_len);
      head.copy_from_slice(&src[..copy_len]);
      tail.fill(0);
    }
  }
  Ok(())
}
