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

//! # Base Values
//!
//! The scalar types every collection and temporal value is built from, and
//! the traits that describe what each of them supports.
//!
//! | Type | `BaseValue` | `SetValue` | `SpanValue` | `TemporalValue` |
//! |---|---|---|---|---|
//! | `i32` (int) | ✓ | ✓ | ✓ discrete | ✓ step |
//! | `f64` (float) | ✓ | ✓ | ✓ | ✓ linear |
//! | `bool` | ✓ | | | ✓ step |
//! | `NaiveDate` (date) | ✓ | ✓ | ✓ discrete | |
//! | `Timestamp` | ✓ | ✓ | ✓ | |
//! | `String` (text) | ✓ | ✓ | | ✓ step |
//! | `GeomPoint` | ✓ | ✓ | | ✓ linear |

pub mod geo;
pub mod number;
pub mod text;
pub mod time;

use crate::context::Context;
use crate::err::Result;
use crate::io::wkb::{MeosType, WkbReader, WkbWriter};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::ops::Add;

pub use geo::GeomPoint;
pub use time::Timestamp;

/// A scalar usable inside collections and temporal values.
///
/// Values are totally ordered through [`BaseValue::compare`]; for floats this
/// is `f64::total_cmp` and for points the lexicographic `(x, y)` order, which
/// only serves as a canonical order for set purposes.
pub trait BaseValue: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Name used in error messages.
    const TYPE_NAME: &'static str;

    fn compare(&self, other: &Self) -> Ordering;

    /// Writes the literal form used inside collection and temporal literals.
    fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result;

    /// Parses a trimmed literal.
    fn parse_literal(literal: &str, ctx: &Context) -> Result<Self>;

    fn write_wkb(&self, w: &mut WkbWriter);

    fn read_wkb(r: &mut WkbReader<'_>) -> Result<Self>;

    #[inline]
    fn is_less(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }

    #[inline]
    fn same(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// The literal as an owned string.
    fn to_literal(&self) -> String {
        let mut s = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_literal(&mut s);
        s
    }
}

/// A base value that forms discrete sets.
pub trait SetValue: BaseValue {
    const SET_TYPE: MeosType;
}

/// An ordered base value that can bound a span.
pub trait SpanValue: SetValue + Copy {
    /// Difference between two values (`i32` for ints and days, `f64` for
    /// floats, `chrono::TimeDelta` for timestamps).
    type Distance: Copy + Debug + PartialEq + PartialOrd + Add<Output = Self::Distance> + Send + Sync;

    /// Discrete spans are canonicalized to `[lower, upper)`.
    const DISCRETE: bool;

    const SPAN_TYPE: MeosType;
    const SPANSET_TYPE: MeosType;

    /// The next representable value of a discrete type; identity otherwise.
    fn successor(self) -> Result<Self>;

    /// The previous representable value of a discrete type; identity otherwise.
    fn predecessor(self) -> Result<Self>;

    /// `other - self`.
    fn distance_to(self, other: Self) -> Self::Distance;

    fn shift(self, delta: Self::Distance) -> Result<Self>;

    fn zero_distance() -> Self::Distance;

    /// A distance as a plain number (seconds for timestamps, days for dates).
    fn distance_as_f64(d: Self::Distance) -> f64;

    /// Position of the value on a numeric axis, used for affine rescaling.
    fn to_axis(self) -> f64;

    /// Inverse of [`SpanValue::to_axis`], rounding for discrete types.
    fn from_axis(v: f64) -> Result<Self>;

    /// Writes a distance for error messages.
    fn distance_literal(d: Self::Distance) -> String {
        format!("{d:?}")
    }
}

/// A base value that can vary over time.
pub trait TemporalValue: BaseValue {
    /// Whether LINEAR interpolation is meaningful for the type.
    const CONTINUOUS: bool;

    const TEMPORAL_TYPE: MeosType;

    /// The value at `ratio ∈ [0, 1]` along the linear segment `start → end`.
    /// Non-continuous types return `start`.
    fn interpolate(start: &Self, end: &Self, ratio: f64) -> Self;

    /// The fraction of the linear segment `start → end` at which the value
    /// equals `target`, if any. A constant segment equal to `target` yields
    /// `Some(0.0)`.
    fn locate(start: &Self, end: &Self, target: &Self) -> Option<f64>;

    /// Equality up to the interpolation tolerance.
    fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Like [`TemporalValue::approx_eq`] for a value interpolated along the
    /// segment `start → end`, tolerating rounding at the magnitude of the
    /// segment ends.
    fn approx_eq_along(&self, other: &Self, _start: &Self, _end: &Self) -> bool {
        self.approx_eq(other)
    }
}

/// A temporal value whose [`BaseValue::compare`] order is meaningful for
/// ever/always comparisons (ints, floats and text).
pub trait OrderedValue: TemporalValue {}

/// A temporal value with a numeric domain (int and float).
pub trait NumericValue: TemporalValue + SpanValue {
    fn to_f64(self) -> f64;
}
