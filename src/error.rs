use core::num::TryFromIntError;

/// An error from decoding a DPX frame.
///
/// Every variant is terminal for the decode call that produced it. Nothing is
/// written to the output when an error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum DpxError {
  /// The data is too short to hold a DPX header (1635 bytes minimum).
  TooSmall,

  /// The first four bytes aren't `SDPX` in either byte order.
  BadMagic,

  /// The offset to the pixel data points at or past the end of the data.
  OffsetOutOfRange,

  /// The descriptor byte isn't an RGB or RGBA layout.
  ///
  /// One of the three "unsupported format" kinds, see
  /// [`is_unsupported_format`](Self::is_unsupported_format).
  UnsupportedDescriptor(u8),

  /// The bits per sample isn't 8, 10, 12, or 16.
  ///
  /// One of the three "unsupported format" kinds, see
  /// [`is_unsupported_format`](Self::is_unsupported_format).
  UnsupportedBitDepth(u8),

  /// The descriptor and bit depth are each fine, but not together, or a
  /// hand-built format description doesn't add up.
  ///
  /// A bad descriptor or bit depth alone gets its own variant. To catch any
  /// unsupported format, match with
  /// [`is_unsupported_format`](Self::is_unsupported_format) rather than on
  /// this variant.
  UnsupportedFormat,

  /// The declared dimensions need more pixel data than the frame holds.
  BufferOverread,

  /// The image dimensions failed the size check, or the output couldn't be
  /// allocated.
  AllocationFailed,

  /// Caller provided output planes are too few or too small.
  OutputTooSmall,
}
impl DpxError {
  /// If this is any of the "format not supported" errors.
  ///
  /// [`UnsupportedDescriptor`](Self::UnsupportedDescriptor),
  /// [`UnsupportedBitDepth`](Self::UnsupportedBitDepth), and
  /// [`UnsupportedFormat`](Self::UnsupportedFormat) all say that the frame
  /// can't be decoded as given. They only differ in which part of the header
  /// was to blame.
  #[inline]
  #[must_use]
  pub const fn is_unsupported_format(self) -> bool {
    matches!(
      self,
      Self::UnsupportedDescriptor(_) | Self::UnsupportedBitDepth(_) | Self::UnsupportedFormat
    )
  }
}
impl core::fmt::Display for DpxError {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::TooSmall => write!(f, "data too small for a DPX header"),
      Self::BadMagic => write!(f, "DPX marker not found"),
      Self::OffsetOutOfRange => write!(f, "invalid pixel data start offset"),
      Self::UnsupportedDescriptor(d) => write!(f, "unsupported descriptor: {d}"),
      Self::UnsupportedBitDepth(b) => write!(f, "unsupported bits per sample: {b}"),
      Self::UnsupportedFormat => write!(f, "unsupported descriptor and bit depth combination"),
      Self::BufferOverread => write!(f, "declared dimensions overread the pixel data"),
      Self::AllocationFailed => write!(f, "image buffer could not be sized or allocated"),
      Self::OutputTooSmall => write!(f, "output planes are too small for the image"),
    }
  }
}
#[cfg(feature = "alloc")]
impl From<alloc::collections::TryReserveError> for DpxError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::AllocationFailed
  }
}
impl From<TryFromIntError> for DpxError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::AllocationFailed
  }
}

/// Alias for a result with a [`DpxError`].
pub type DpxResult<T> = Result<T, DpxError>;

#[test]
fn test_unsupported_format_grouping() {
  for e in [
    DpxError::UnsupportedDescriptor(7),
    DpxError::UnsupportedBitDepth(32),
    DpxError::UnsupportedFormat,
  ] {
    assert!(e.is_unsupported_format(), "{e:?}");
  }
  for e in [
    DpxError::TooSmall,
    DpxError::BadMagic,
    DpxError::OffsetOutOfRange,
    DpxError::BufferOverread,
    DpxError::AllocationFailed,
    DpxError::OutputTooSmall,
  ] {
    assert!(!e.is_unsupported_format(), "{e:?}");
  }
}
