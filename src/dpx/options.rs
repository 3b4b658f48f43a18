use super::*;

/// Settings for decoding with allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
  /// Every plane stride is rounded up to a multiple of this.
  ///
  /// Values that aren't a power of two are rounded up to one. Use 1 for
  /// tightly packed rows.
  pub row_align: usize,
  /// Frames wider than this fail with [`DpxError::AllocationFailed`].
  pub max_width: Option<u32>,
  /// Frames taller than this fail with [`DpxError::AllocationFailed`].
  pub max_height: Option<u32>,
}
impl Default for DecodeOptions {
  #[inline]
  fn default() -> Self {
    Self { row_align: 32, max_width: None, max_height: None }
  }
}
impl DecodeOptions {
  /// Options with tightly packed rows and no extra limits.
  pub const PACKED: Self = Self { row_align: 1, max_width: None, max_height: None };

  /// The stride to use for rows of `row_bytes`, or `None` on overflow.
  #[inline]
  #[must_use]
  pub fn stride_for(&self, row_bytes: usize) -> Option<usize> {
    let align = self.row_align.max(1).checked_next_power_of_two()?;
    Some(row_bytes.checked_add(align - 1)? & !(align - 1))
  }

  /// Checks the dimensions against [`image_size_is_sane`] and the limits set
  /// here.
  pub fn check_dimensions(&self, width: u32, height: u32) -> DpxResult<()> {
    if !image_size_is_sane(width, height) {
      log::error!("Picture size {width}x{height} is invalid");
      return Err(DpxError::AllocationFailed);
    }
    if self.max_width.map_or(false, |max| width > max)
      || self.max_height.map_or(false, |max| height > max)
    {
      log::error!("Picture size {width}x{height} is over the configured limit");
      return Err(DpxError::AllocationFailed);
    }
    Ok(())
  }
}

/// If an image of this size is reasonable to allocate.
///
/// Both sides, taken as signed 32-bit values, must be positive, and
/// `(width + 128) * (height + 128)` must be under `i32::MAX / 8`. This keeps
/// every plane size calculation well inside 32-bit range.
#[inline]
#[must_use]
pub const fn image_size_is_sane(width: u32, height: u32) -> bool {
  let (w, h) = (width as i32, height as i32);
  w > 0 && h > 0 && (w as u64 + 128) * (h as u64 + 128) < (i32::MAX / 8) as u64
}
