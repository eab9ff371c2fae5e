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

//! Integer, float and boolean base values.

use super::{BaseValue, NumericValue, OrderedValue, SetValue, SpanValue, TemporalValue};
use crate::context::Context;
use crate::err::{InvalidArgumentError, ParseError, Result};
use crate::io::wkb::{MeosType, WkbReader, WkbWriter};
use crate::num::{float_eq, float_eq_at, solve_linear};
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::fmt;

#[inline]
fn overflow(argument: &'static str) -> InvalidArgumentError {
    InvalidArgumentError::new(argument, "the result is out of range for int")
}

impl BaseValue for i32 {
    const TYPE_NAME: &'static str = "int";

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "{self}")
    }

    fn parse_literal(literal: &str, _ctx: &Context) -> Result<Self> {
        literal
            .parse::<i32>()
            .map_err(|e| ParseError::new(literal, Self::TYPE_NAME, e.to_string()).into())
    }

    #[inline]
    fn write_wkb(&self, w: &mut WkbWriter) {
        w.write_i32(*self);
    }

    #[inline]
    fn read_wkb(r: &mut WkbReader<'_>) -> Result<Self> {
        r.read_i32()
    }
}

impl SetValue for i32 {
    const SET_TYPE: MeosType = MeosType::IntSet;
}

impl SpanValue for i32 {
    type Distance = i32;
    const DISCRETE: bool = true;
    const SPAN_TYPE: MeosType = MeosType::IntSpan;
    const SPANSET_TYPE: MeosType = MeosType::IntSpanSet;

    #[inline]
    fn successor(self) -> Result<Self> {
        self.checked_add(1).ok_or_else(|| overflow("upper").into())
    }

    #[inline]
    fn predecessor(self) -> Result<Self> {
        self.checked_sub(1).ok_or_else(|| overflow("lower").into())
    }

    #[inline]
    fn distance_to(self, other: Self) -> Self::Distance {
        other.saturating_sub(self)
    }

    #[inline]
    fn shift(self, delta: Self::Distance) -> Result<Self> {
        self.checked_add(delta).ok_or_else(|| overflow("delta").into())
    }

    #[inline]
    fn zero_distance() -> Self::Distance {
        0
    }

    #[inline]
    fn distance_as_f64(d: Self::Distance) -> f64 {
        d as f64
    }

    #[inline]
    fn to_axis(self) -> f64 {
        self as f64
    }

    fn from_axis(v: f64) -> Result<Self> {
        v.round().to_i32().ok_or_else(|| overflow("width").into())
    }

    fn distance_literal(d: Self::Distance) -> String {
        d.to_string()
    }
}

impl TemporalValue for i32 {
    const CONTINUOUS: bool = false;
    const TEMPORAL_TYPE: MeosType = MeosType::TInt;

    #[inline]
    fn interpolate(start: &Self, _end: &Self, _ratio: f64) -> Self {
        *start
    }

    #[inline]
    fn locate(start: &Self, _end: &Self, target: &Self) -> Option<f64> {
        (start == target).then_some(0.0)
    }
}

impl OrderedValue for i32 {}

impl NumericValue for i32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl BaseValue for f64 {
    const TYPE_NAME: &'static str = "float";

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "{self}")
    }

    fn parse_literal(literal: &str, _ctx: &Context) -> Result<Self> {
        literal
            .parse::<f64>()
            .map_err(|e| ParseError::new(literal, Self::TYPE_NAME, e.to_string()).into())
    }

    #[inline]
    fn write_wkb(&self, w: &mut WkbWriter) {
        w.write_f64(*self);
    }

    #[inline]
    fn read_wkb(r: &mut WkbReader<'_>) -> Result<Self> {
        r.read_f64()
    }
}

impl SetValue for f64 {
    const SET_TYPE: MeosType = MeosType::FloatSet;
}

impl SpanValue for f64 {
    type Distance = f64;
    const DISCRETE: bool = false;
    const SPAN_TYPE: MeosType = MeosType::FloatSpan;
    const SPANSET_TYPE: MeosType = MeosType::FloatSpanSet;

    #[inline]
    fn successor(self) -> Result<Self> {
        Ok(self)
    }

    #[inline]
    fn predecessor(self) -> Result<Self> {
        Ok(self)
    }

    #[inline]
    fn distance_to(self, other: Self) -> Self::Distance {
        other - self
    }

    #[inline]
    fn shift(self, delta: Self::Distance) -> Result<Self> {
        Ok(self + delta)
    }

    #[inline]
    fn zero_distance() -> Self::Distance {
        0.0
    }

    #[inline]
    fn distance_as_f64(d: Self::Distance) -> f64 {
        d
    }

    #[inline]
    fn to_axis(self) -> f64 {
        self
    }

    #[inline]
    fn from_axis(v: f64) -> Result<Self> {
        Ok(v)
    }

    fn distance_literal(d: Self::Distance) -> String {
        d.to_string()
    }
}

impl TemporalValue for f64 {
    const CONTINUOUS: bool = true;
    const TEMPORAL_TYPE: MeosType = MeosType::TFloat;

    fn interpolate(start: &Self, end: &Self, ratio: f64) -> Self {
        if ratio <= 0.0 {
            *start
        } else if ratio >= 1.0 {
            *end
        } else {
            start + (end - start) * ratio
        }
    }

    #[inline]
    fn locate(start: &Self, end: &Self, target: &Self) -> Option<f64> {
        solve_linear(*start, *end, *target)
    }

    #[inline]
    fn approx_eq(&self, other: &Self) -> bool {
        float_eq(*self, *other)
    }

    #[inline]
    fn approx_eq_along(&self, other: &Self, start: &Self, end: &Self) -> bool {
        float_eq_at(*self, *other, start.abs().max(end.abs()))
    }
}

impl OrderedValue for f64 {}

impl NumericValue for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

impl BaseValue for bool {
    const TYPE_NAME: &'static str = "bool";

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str(if *self { "t" } else { "f" })
    }

    fn parse_literal(literal: &str, _ctx: &Context) -> Result<Self> {
        match literal.to_ascii_lowercase().as_str() {
            "t" | "true" => Ok(true),
            "f" | "false" => Ok(false),
            _ => Err(ParseError::new(literal, Self::TYPE_NAME, "expected t, f, true or false").into()),
        }
    }

    #[inline]
    fn write_wkb(&self, w: &mut WkbWriter) {
        w.write_u8(u8::from(*self));
    }

    fn read_wkb(r: &mut WkbReader<'_>) -> Result<Self> {
        match r.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(r.error(format!("invalid boolean byte {b}")).into()),
        }
    }
}

impl TemporalValue for bool {
    const CONTINUOUS: bool = false;
    const TEMPORAL_TYPE: MeosType = MeosType::TBool;

    #[inline]
    fn interpolate(start: &Self, _end: &Self, _ratio: f64) -> Self {
        *start
    }

    #[inline]
    fn locate(start: &Self, _end: &Self, target: &Self) -> Option<f64> {
        (start == target).then_some(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::default()
    }

    #[test]
    fn test_int_literals() {
        assert_eq!(i32::parse_literal("-7", &ctx()).unwrap(), -7);
        assert!(i32::parse_literal("7.5", &ctx()).is_err());
        assert_eq!(42i32.to_literal(), "42");
    }

    #[test]
    fn test_int_span_arithmetic() {
        assert_eq!(7i32.successor().unwrap(), 8);
        assert!(i32::MAX.successor().is_err());
        assert_eq!(3i32.distance_to(10), 7);
        assert_eq!(3i32.shift(-5).unwrap(), -2);
        assert_eq!(i32::from_axis(2.6).unwrap(), 3);
        assert!(i32::from_axis(1e12).is_err());
    }

    #[test]
    fn test_float_literals_are_shortest() {
        assert_eq!(1.5f64.to_literal(), "1.5");
        assert_eq!(2.0f64.to_literal(), "2");
        assert_eq!(f64::parse_literal("2.5", &ctx()).unwrap(), 2.5);
        assert!(f64::parse_literal("abc", &ctx()).is_err());
    }

    #[test]
    fn test_float_interpolation() {
        assert_eq!(f64::interpolate(&0.0, &10.0, 0.25), 2.5);
        assert_eq!(f64::interpolate(&0.0, &10.0, 1.0), 10.0);
        assert_eq!(f64::locate(&0.0, &10.0, &2.5), Some(0.25));
        assert_eq!(f64::locate(&0.0, &10.0, &-1.0), None);
    }

    #[test]
    fn test_float_tolerance_is_rounding_only() {
        assert!(!1e9f64.approx_eq(&1_000_000_500.0));
        assert!(!0.0f64.approx_eq(&5e-7));
        let mid = f64::interpolate(&-1e9, &1e9, 0.3);
        assert!(mid.approx_eq_along(&-4e8, &-1e9, &1e9));
        assert!(1e-8f64.approx_eq_along(&0.0, &-1e9, &1e9));
        assert!(!1e-3f64.approx_eq_along(&0.0, &-1e9, &1e9));
    }

    #[test]
    fn test_float_total_order() {
        assert_eq!(1.0f64.compare(&2.0), Ordering::Less);
        assert_eq!(f64::NAN.compare(&f64::NAN), Ordering::Equal);
    }

    #[test]
    fn test_bool_literals() {
        assert_eq!(true.to_literal(), "t");
        assert_eq!(false.to_literal(), "f");
        assert!(bool::parse_literal("TRUE", &ctx()).unwrap());
        assert!(!bool::parse_literal("f", &ctx()).unwrap());
        assert!(bool::parse_literal("yes", &ctx()).is_err());
    }

    #[test]
    fn test_step_types_do_not_interpolate() {
        assert_eq!(i32::interpolate(&1, &5, 0.9), 1);
        assert!(bool::interpolate(&true, &false, 0.5));
        assert_eq!(i32::locate(&3, &4, &3), Some(0.0));
        assert_eq!(i32::locate(&3, &4, &4), None);
    }
}
