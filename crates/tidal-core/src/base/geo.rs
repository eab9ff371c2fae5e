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

//! Planar points.

use super::{BaseValue, SetValue, TemporalValue};
use crate::context::Context;
use crate::err::{ParseError, Result};
use crate::io::wkb::{MeosType, WkbReader, WkbWriter};
use crate::num::{float_eq, float_eq_at};
use std::cmp::Ordering;
use std::fmt;

/// A 2D point. Literal form: `POINT(x y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeomPoint {
    pub x: f64,
    pub y: f64,
}

impl GeomPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(&self, other: &GeomPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for GeomPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_literal(f)
    }
}

impl BaseValue for GeomPoint {
    const TYPE_NAME: &'static str = "geometry";

    fn compare(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }

    fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "POINT({} {})", self.x, self.y)
    }

    fn parse_literal(literal: &str, _ctx: &Context) -> Result<Self> {
        let err = |reason: &str| ParseError::new(literal, Self::TYPE_NAME, reason);
        let body = literal
            .get(..5)
            .filter(|head| head.eq_ignore_ascii_case("point"))
            .map(|_| literal[5..].trim())
            .ok_or_else(|| err("expected POINT(x y)"))?;
        let coords = body
            .strip_prefix('(')
            .and_then(|b| b.strip_suffix(')'))
            .ok_or_else(|| err("expected parenthesized coordinates"))?;
        let mut parts = coords.split_whitespace().map(str::parse::<f64>);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(x)), Some(Ok(y)), None) => Ok(GeomPoint::new(x, y)),
            _ => Err(err("expected two coordinates").into()),
        }
    }

    #[inline]
    fn write_wkb(&self, w: &mut WkbWriter) {
        w.write_f64(self.x);
        w.write_f64(self.y);
    }

    fn read_wkb(r: &mut WkbReader<'_>) -> Result<Self> {
        let x = r.read_f64()?;
        let y = r.read_f64()?;
        Ok(GeomPoint::new(x, y))
    }
}

impl SetValue for GeomPoint {
    const SET_TYPE: MeosType = MeosType::GeomSet;
}

impl TemporalValue for GeomPoint {
    const CONTINUOUS: bool = true;
    const TEMPORAL_TYPE: MeosType = MeosType::TGeomPoint;

    fn interpolate(start: &Self, end: &Self, ratio: f64) -> Self {
        if ratio <= 0.0 {
            *start
        } else if ratio >= 1.0 {
            *end
        } else {
            GeomPoint::new(
                start.x + (end.x - start.x) * ratio,
                start.y + (end.y - start.y) * ratio,
            )
        }
    }

    fn locate(start: &Self, end: &Self, target: &Self) -> Option<f64> {
        if start.approx_eq(end) {
            return start.approx_eq(target).then_some(0.0);
        }
        // Project on the dominant axis, then check the point is on the segment.
        let (dx, dy) = (end.x - start.x, end.y - start.y);
        let ratio = if dx.abs() >= dy.abs() {
            (target.x - start.x) / dx
        } else {
            (target.y - start.y) / dy
        };
        if !(-crate::num::EPSILON..=1.0 + crate::num::EPSILON).contains(&ratio) {
            return None;
        }
        let ratio = crate::num::clamp_ratio(ratio);
        Self::interpolate(start, end, ratio)
            .approx_eq_along(target, start, end)
            .then_some(ratio)
    }

    #[inline]
    fn approx_eq(&self, other: &Self) -> bool {
        float_eq(self.x, other.x) && float_eq(self.y, other.y)
    }

    #[inline]
    fn approx_eq_along(&self, other: &Self, start: &Self, end: &Self) -> bool {
        float_eq_at(self.x, other.x, start.x.abs().max(end.x.abs()))
            && float_eq_at(self.y, other.y, start.y.abs().max(end.y.abs()))
    }
}
