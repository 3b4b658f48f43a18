//! Borrowed output planes, for decoding without allocation.

/// Mutable borrow of one image plane.
///
/// Row `y` starts at byte `y * stride`. The stride can be larger than the
/// bytes actually used by a row.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlaneMut<'a> {
  /// Borrow of the plane bytes.
  pub data: &'a mut [u8],
  /// Byte distance between the starts of two rows.
  pub stride: usize,
}
impl<'a> PlaneMut<'a> {
  /// Wraps a byte slice as a plane.
  #[inline]
  #[must_use]
  pub fn new(data: &'a mut [u8], stride: usize) -> Self {
    Self { data, stride }
  }

  /// If this plane can hold `height` rows of `row_bytes` each.
  ///
  /// The last row only needs `row_bytes`, not a full stride.
  #[inline]
  #[must_use]
  pub fn fits(&self, row_bytes: usize, height: usize) -> bool {
    if height == 0 {
      return true;
    }
    if self.stride < row_bytes {
      return false;
    }
    match (height - 1).checked_mul(self.stride).and_then(|n| n.checked_add(row_bytes)) {
      Some(needed) => needed <= self.data.len(),
      None => false,
    }
  }

  /// Gets the first `row_bytes` of row `y`, or `None` if that's out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn row_mut(&mut self, y: usize, row_bytes: usize) -> Option<&mut [u8]> {
    let start = y.checked_mul(self.stride)?;
    let end = start.checked_add(row_bytes)?;
    self.data.get_mut(start..end)
  }
}

#[test]
fn test_plane_fits() {
  let mut buf = [0_u8; 20];
  let plane = PlaneMut::new(&mut buf, 8);
  // rows at 0, 8, 16: the last row has 4 bytes left
  assert!(plane.fits(4, 3));
  assert!(!plane.fits(5, 3));
  assert!(!plane.fits(9, 1));
  assert!(plane.fits(100, 0));
  let mut plane = plane;
  assert_eq!(plane.row_mut(2, 4).map(|r| r.len()), Some(4));
  assert!(plane.row_mut(2, 5).is_none());
}
