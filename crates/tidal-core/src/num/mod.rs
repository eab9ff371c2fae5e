// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Float Tolerance
//!
//! Interpolated values are computed in floating point, so equality checks
//! that decide whether an instant is redundant or whether two pieces join
//! must tolerate rounding, and nothing more: the tolerance is a small number
//! of units in the last place of the operands, never an absolute slack.

/// Relative rounding tolerance: 64 units in the last place.
pub const EPSILON: f64 = 64.0 * f64::EPSILON;

/// `true` if `a` and `b` differ by no more than rounding at their own
/// magnitude.
#[inline]
pub fn float_eq(a: f64, b: f64) -> bool {
    float_eq_at(a, b, 0.0)
}

/// `true` if `a` and `b` differ by no more than rounding at the magnitude of
/// `a`, `b` or `scale`, whichever is largest.
///
/// `scale` is the magnitude of the operands a value was computed from: a
/// point interpolated between `-1e9` and `1e9` carries rounding error of
/// that size even when it lands near zero.
#[inline]
pub fn float_eq_at(a: f64, b: f64, scale: f64) -> bool {
    if a == b {
        return true;
    }
    let magnitude = a.abs().max(b.abs()).max(scale.abs());
    (a - b).abs() <= EPSILON * magnitude
}

/// Clamps a ratio into `[0, 1]`.
#[inline]
pub fn clamp_ratio(r: f64) -> f64 {
    r.clamp(0.0, 1.0)
}

/// Solves `start + (end - start) * r = target` for `r ∈ [0, 1]`.
///
/// A constant segment yields `Some(0.0)` when it equals `target`.
pub fn solve_linear(start: f64, end: f64, target: f64) -> Option<f64> {
    if float_eq(start, end) {
        return float_eq(start, target).then_some(0.0);
    }
    let (lo, hi) = if start < end { (start, end) } else { (end, start) };
    if (target < lo && !float_eq(target, lo)) || (target > hi && !float_eq(target, hi)) {
        return None;
    }
    Some(clamp_ratio((target - start) / (end - start)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_eq() {
        assert!(float_eq(1.0, 1.0 + 4.0 * f64::EPSILON));
        assert!(float_eq(0.1 + 0.2, 0.3));
        assert!(!float_eq(1.0, 1.001));
        assert!(!float_eq(0.0, 1e-3));
    }

    #[test]
    fn test_float_eq_keeps_large_and_small_differences() {
        assert!(!float_eq(1e9, 1e9 + 1e-3));
        assert!(!float_eq(1_000_000_000.0, 1_000_000_500.0));
        assert!(!float_eq(0.0, 5e-7));
        assert!(!float_eq(1e-12, 2e-12));
        assert!(float_eq(1e9, 1e9 + 1e-7));
    }

    #[test]
    fn test_float_eq_at_scale() {
        assert!(!float_eq(0.0, 1e-8));
        assert!(float_eq_at(0.0, 1e-8, 1e9));
        assert!(!float_eq_at(0.0, 1e-3, 1e9));
    }

    #[test]
    fn test_solve_linear() {
        assert_eq!(solve_linear(0.0, 10.0, 5.0), Some(0.5));
        assert_eq!(solve_linear(10.0, 0.0, 2.5), Some(0.75));
        assert_eq!(solve_linear(0.0, 10.0, 10.0), Some(1.0));
        assert_eq!(solve_linear(0.0, 10.0, 11.0), None);
        assert_eq!(solve_linear(3.0, 3.0, 3.0), Some(0.0));
        assert_eq!(solve_linear(3.0, 3.0, 4.0), None);
    }

    #[test]
    fn test_solve_linear_large_values() {
        assert_eq!(solve_linear(1e9, 1_000_000_500.0, 1_000_000_250.0), Some(0.5));
        assert_eq!(solve_linear(1e9, 1e9 + 1e-3, 1e9 + 2e-3), None);
        assert_eq!(solve_linear(0.0, 5e-7, 2.5e-7), Some(0.5));
    }
}
