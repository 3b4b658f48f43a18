//! Provides heap-allocated image types.

use alloc::vec::Vec;
use pixel_formats::r32g32b32a32_Sfloat;

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  y.wrapping_mul(width).wrapping_add(x) as usize
}

/// An owned direct-color image, one pixel value per position.
///
/// Produced by [`dpx_try_bitmap`](crate::dpx::dpx_try_bitmap). The fields are
/// public, but if you put them together weirdly the methods return `None`.
#[derive(Debug, Clone, Default, PartialEq, PartialOrd)]
#[allow(missing_docs)]
pub struct Bitmap<P = r32g32b32a32_Sfloat> {
  pub width: u32,
  pub height: u32,
  pub pixels: Vec<P>,
}
impl<P> Bitmap<P> {
  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<&P> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }
  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut P> {
    if x < self.width && y < self.height {
      let i = xy_width_to_index(x, y, self.width);
      self.pixels.get_mut(i)
    } else {
      None
    }
  }
}

#[test]
fn test_bitmap_bounds() {
  let mut b: Bitmap<u8> = Bitmap { width: 2, height: 2, pixels: alloc::vec![1, 2, 3, 4] };
  assert_eq!(b.get(1, 1), Some(&4));
  assert_eq!(b.get(2, 0), None);
  *b.get_mut(0, 1).unwrap() = 9;
  assert_eq!(b.pixels[2], 9);
  assert!(b.get_mut(0, 2).is_none());
}
