//! Fixed-point decomposition of real multipliers.
//!
//! A multiplier `m` is written as `q * 2^-31 * 2^-shift` where `q` is a Q0.31
//! mantissa in `[2^30, 2^31)`. Positive shifts are right shifts (`m < 1`),
//! negative shifts are left shifts (`m >= 1`).

use crate::error::{QuantError, Result};
use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};

/// 1.0 in Q0.31.
pub const FIXED_POINT_ONE: i64 = 1 << 31;

/// Widest shift a 32-bit kernel can apply.
pub const MAX_KERNEL_SHIFT: i32 = 31;

/// Tie-break used when the scaled mantissa lies exactly halfway between two integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Rounding {
    /// Round halves away from zero
    #[default]
    #[value(name = "away")]
    HalfAwayFromZero,
    /// Round halves to the even neighbour
    #[value(name = "even")]
    HalfToEven,
}

impl Rounding {
    #[inline]
    fn apply(self, x: f64) -> f64 {
        match self {
            Rounding::HalfAwayFromZero => x.round(),
            Rounding::HalfToEven => x.round_ties_even(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecomposeParams {
    pub rounding: Rounding,
    /// Channel count at which per-channel work moves onto the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for DecomposeParams {
    fn default() -> Self { Self { rounding: Rounding::HalfAwayFromZero, parallel_threshold: 1024 } }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiplierShiftPair {
    pub multiplier: i32,
    pub shift: i32,
}

impl MultiplierShiftPair {
    pub const ZERO: MultiplierShiftPair = MultiplierShiftPair { multiplier: 0, shift: 0 };

    pub fn new(multiplier: i32, shift: i32) -> Self { Self { multiplier, shift } }

    /// Real value represented by the pair.
    pub fn to_f64(&self) -> f64 {
        (self.multiplier as f64 / FIXED_POINT_ONE as f64) * 2f64.powi(-self.shift)
    }

    pub fn is_left_shift(&self) -> bool { self.shift < 0 }
}

// m = mantissa * 2^exp with mantissa in [0.5, 1). Scaling by two is exact, so
// the loops only move the exponent.
fn normalize(m: f64) -> (f64, i32) {
    let mut mantissa = m;
    let mut exp = 0i32;
    while mantissa >= 1.0 { mantissa *= 0.5; exp += 1; }
    while mantissa < 0.5 { mantissa *= 2.0; exp -= 1; }
    (mantissa, exp)
}

// Rounds the mantissa to Q0.31. A mantissa that rounds up to 1.0 is halved and
// the exponent bumped so the value is unchanged and q stays below 2^31.
fn quantize_mantissa(mantissa: f64, exp: i32, rounding: Rounding) -> (i32, i32) {
    let mut q = rounding.apply(mantissa * FIXED_POINT_ONE as f64) as i64;
    let mut exp = exp;
    if q == FIXED_POINT_ONE {
        q /= 2;
        exp += 1;
    }
    debug_assert!((FIXED_POINT_ONE / 2..FIXED_POINT_ONE).contains(&q));
    (q as i32, exp)
}

// Callers have already rejected zero, negatives and non-finite values, so
// `normalize` always terminates.
fn sub_unity(m: f64, rounding: Rounding) -> (i32, i32) {
    let (mantissa, exp) = normalize(m);
    let (q, exp) = quantize_mantissa(mantissa, exp, rounding);
    (q, -exp)
}

fn super_unity(m: f64, rounding: Rounding) -> (i32, i32) {
    let (mantissa, exp) = normalize(m);
    quantize_mantissa(mantissa, exp, rounding)
}

/// Decomposes `0 < m < 1` into `(q, right_shift)` with `right_shift >= 0`.
///
/// Within `2^-32` of 1.0 the mantissa rounds up to one; there `q` saturates to
/// `2^31 - 1` with no shift. `decompose` expresses the same case as `(2^30, -1)`.
pub fn decompose_sub_unity(m: f64) -> Result<(i32, i32)> {
    if !(m > 0.0 && m < 1.0) {
        return Err(QuantError::InvalidMultiplier(m));
    }
    match sub_unity(m, Rounding::default()) {
        (_, right_shift) if right_shift < 0 => Ok((i32::MAX, 0)),
        pair => Ok(pair),
    }
}

/// Decomposes finite `m >= 1` into `(q, left_shift)` with `left_shift >= 1`.
pub fn decompose_super_unity(m: f64) -> Result<(i32, i32)> {
    if !(m >= 1.0 && m.is_finite()) {
        return Err(QuantError::InvalidMultiplier(m));
    }
    Ok(super_unity(m, Rounding::default()))
}

pub fn decompose(m: f64) -> Result<MultiplierShiftPair> { decompose_with(m, Rounding::default()) }

pub fn decompose_with(m: f64, rounding: Rounding) -> Result<MultiplierShiftPair> {
    if !m.is_finite() || m < 0.0 {
        return Err(QuantError::InvalidMultiplier(m));
    }
    if m == 0.0 {
        return Ok(MultiplierShiftPair::ZERO);
    }
    let pair = if m < 1.0 {
        let (q, right_shift) = sub_unity(m, rounding);
        MultiplierShiftPair::new(q, right_shift)
    } else {
        let (q, left_shift) = super_unity(m, rounding);
        MultiplierShiftPair::new(q, -left_shift)
    };
    if pair.shift.abs() > MAX_KERNEL_SHIFT {
        warn!("multiplier {:e} needs a shift of {} which 32-bit kernels cannot apply", m, pair.shift);
    }
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_value() {
        for m in [0.5, 0.75, 1.0, 3.0, 1e-9, 123456.0, 0.00789] {
            let (mantissa, exp) = normalize(m);
            assert!((0.5..1.0).contains(&mantissa), "mantissa {} for {}", mantissa, m);
            assert_eq!(mantissa * 2f64.powi(exp), m);
        }
    }

    #[test]
    fn rounding_to_one_bumps_exponent() {
        let m = 1.0 - f64::EPSILON;
        assert_eq!(decompose_sub_unity(m).unwrap(), (i32::MAX, 0));
        let p = decompose(m).unwrap();
        assert_eq!(p, MultiplierShiftPair::new(1 << 30, -1));
        assert_eq!(p.to_f64(), 1.0);
    }

    #[test]
    fn tie_break_modes_differ_on_exact_halves() {
        // mantissa * 2^31 = 2^30 + 0.5 exactly
        let m = 0.5 + 2f64.powi(-32);
        assert_eq!(sub_unity(m, Rounding::HalfAwayFromZero), ((1 << 30) + 1, 0));
        assert_eq!(sub_unity(m, Rounding::HalfToEven), (1 << 30, 0));
    }
}
