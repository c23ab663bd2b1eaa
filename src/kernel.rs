//! Scalar fixed-point primitives of the integer output stage.

use crate::decompose::MultiplierShiftPair;
use crate::range::QuantizedRange;

/// `round(a * b / 2^31)` with the single overflowing case saturated.
#[inline]
pub fn saturating_rounding_doubling_high_mul(a: i32, b: i32) -> i32 {
    if a == i32::MIN && b == i32::MIN { return i32::MAX; }
    let ab = (a as i64) * (b as i64);
    let nudge: i64 = if ab >= 0 { 1 << 30 } else { 1 - (1 << 30) };
    ((ab + nudge) / (1i64 << 31)) as i32
}

/// Arithmetic right shift by `exponent` rounding half away from zero.
#[inline]
pub fn rounding_divide_by_pot(x: i32, exponent: i32) -> i32 {
    debug_assert!((0..=31).contains(&exponent));
    let mask = ((1i64 << exponent) - 1) as i32;
    let remainder = x & mask;
    let threshold = (mask >> 1) + (x < 0) as i32;
    (x >> exponent) + (remainder > threshold) as i32
}

#[inline]
fn saturating_left_shift(x: i32, bits: i32) -> i32 {
    let wide = (x as i64) << bits;
    wide.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Requantizes one accumulator: scale by the pair, add the zero point, clamp.
///
/// Right shifts past 31 bits round every accumulator to zero; left shifts past
/// 31 bits saturate any nonzero accumulator.
pub fn requantize(acc: i32, pair: MultiplierShiftPair, zero_point: i32, range: QuantizedRange) -> i32 {
    let scaled = if pair.shift > 31 {
        0
    } else if pair.shift < -31 {
        match acc.signum() * pair.multiplier.signum() {
            1 => i32::MAX,
            -1 => i32::MIN,
            _ => 0,
        }
    } else if pair.shift < 0 {
        let lifted = saturating_left_shift(acc, -pair.shift);
        saturating_rounding_doubling_high_mul(lifted, pair.multiplier)
    } else {
        let high = saturating_rounding_doubling_high_mul(acc, pair.multiplier);
        rounding_divide_by_pot(high, pair.shift)
    };
    range.clamp(scaled.saturating_add(zero_point))
}
