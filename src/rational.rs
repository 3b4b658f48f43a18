#![forbid(unsafe_code)]

//! Small rational numbers, used for the pixel aspect ratio.

/// A rational number `num / den`.
///
/// The "unknown" value is `0/1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
  /// Numerator.
  pub num: i32,
  /// Denominator.
  pub den: i32,
}
impl Default for Rational {
  #[inline]
  fn default() -> Self {
    Self::UNKNOWN
  }
}
impl Rational {
  /// `0/1`, meaning no ratio was given.
  pub const UNKNOWN: Self = Self { num: 0, den: 1 };

  /// Reduces `num / den` to the closest fraction with both parts at most
  /// `max`.
  ///
  /// The bool is `true` when the result is exactly equal to the input. When
  /// the input can't be represented within `max` the best continued-fraction
  /// convergent is used instead.
  #[must_use]
  pub fn reduce(num: i64, den: i64, max: i32) -> (Self, bool) {
    let negative = (num < 0) ^ (den < 0);
    let max = u64::from(max.max(1).unsigned_abs());
    let mut n = num.unsigned_abs();
    let mut d = den.unsigned_abs();
    let g = gcd(n, d);
    if g != 0 {
      n /= g;
      d /= g;
    }
    // (num, den) pairs of the two previous convergents
    let mut a0: (u64, u64) = (0, 1);
    let mut a1: (u64, u64) = (1, 0);
    if n <= max && d <= max {
      a1 = (n, d);
      d = 0;
    }
    while d != 0 {
      let x = n / d;
      let next_d = n % d;
      let a2n = x.saturating_mul(a1.0).saturating_add(a0.0);
      let a2d = x.saturating_mul(a1.1).saturating_add(a0.1);
      if a2n > max || a2d > max {
        let mut x = x;
        if a1.0 != 0 {
          x = (max - a0.0) / a1.0;
        }
        if a1.1 != 0 {
          x = x.min((max - a0.1) / a1.1);
        }
        // take the semiconvergent only when it beats the last convergent
        let lhs = u128::from(d) * (2 * u128::from(x) * u128::from(a1.1) + u128::from(a0.1));
        let rhs = u128::from(n) * u128::from(a1.1);
        if lhs > rhs {
          a1 = (x * a1.0 + a0.0, x * a1.1 + a0.1);
        }
        break;
      }
      a0 = a1;
      a1 = (a2n, a2d);
      n = d;
      d = next_d;
    }
    // both parts are bounded by `max`, which came from an i32
    let out_num = a1.0 as i32;
    let out = Self { num: if negative { -out_num } else { out_num }, den: a1.1 as i32 };
    (out, d == 0)
  }

  /// The ratio as an `f64`, or `0.0` for an unknown ratio.
  #[inline]
  #[must_use]
  pub fn to_f64(self) -> f64 {
    if self.den == 0 {
      0.0
    } else {
      f64::from(self.num) / f64::from(self.den)
    }
  }
}

#[inline]
const fn gcd(mut a: u64, mut b: u64) -> u64 {
  while b != 0 {
    let t = a % b;
    a = b;
    b = t;
  }
  a
}
