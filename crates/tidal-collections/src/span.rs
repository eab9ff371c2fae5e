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

//! Contiguous ranges over an ordered base value.

use crate::intersection::Intersection;
use crate::spanset::SpanSet;
use smallvec::{SmallVec, smallvec};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tidal_core::base::SpanValue;
use tidal_core::context::Context;
use tidal_core::err::{Error, InvalidArgumentError, InvalidBoundsError, Result};
use tidal_core::io::wkb::{decode_hex, encode_hex};
use tidal_core::io::{Lexer, WkbByteOrder, WkbReader, WkbWriter};

const LOWER_INC: u8 = 0x01;
const UPPER_INC: u8 = 0x02;

/// A span `[lower, upper]` with independent bound inclusivity.
///
/// Spans over discrete base values (int, date) are kept in the canonical
/// form `[lower, upper)`, so `(7, 10)` and `[8, 9]` are the same span.
/// A span over a continuous base value with `lower == upper` must include
/// both bounds.
///
/// # Invariants
/// `lower <= upper`, and the span contains at least one value.
#[derive(Clone, Copy, Debug)]
pub struct Span<T>
where
    T: SpanValue,
{
    lower: T,
    upper: T,
    lower_inc: bool,
    upper_inc: bool,
}

/// A collection with an encompassing span, against which the position
/// predicates (`is_left`, `is_over_or_right`, ...) are evaluated.
pub trait Extent<T>
where
    T: SpanValue,
{
    /// The smallest span covering the collection, `None` when it is empty.
    fn extent(&self) -> Option<Span<T>>;
}

impl<T> Extent<T> for Span<T>
where
    T: SpanValue,
{
    #[inline]
    fn extent(&self) -> Option<Span<T>> {
        Some(*self)
    }
}

/// Orders two lower bounds; at equal values the inclusive one comes first.
#[inline]
pub(crate) fn cmp_lower<T: SpanValue>(a: T, a_inc: bool, b: T, b_inc: bool) -> Ordering {
    a.compare(&b).then_with(|| b_inc.cmp(&a_inc))
}

/// Orders two upper bounds; at equal values the exclusive one comes first.
#[inline]
pub(crate) fn cmp_upper<T: SpanValue>(a: T, a_inc: bool, b: T, b_inc: bool) -> Ordering {
    a.compare(&b).then_with(|| a_inc.cmp(&b_inc))
}

/// `true` if a lower bound and an upper bound enclose at least one value.
#[inline]
fn encloses<T: SpanValue>(lower: T, lower_inc: bool, upper: T, upper_inc: bool) -> bool {
    match lower.compare(&upper) {
        Ordering::Less => true,
        Ordering::Equal => lower_inc && upper_inc,
        Ordering::Greater => false,
    }
}

impl<T> Span<T>
where
    T: SpanValue,
{
    /// Creates a new span, canonicalizing discrete spans to `[lower, upper)`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBoundsError`] if `lower > upper` or the span contains
    /// no value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::span::Span;
    /// let s = Span::new(7, 10, false, true).unwrap();
    /// assert_eq!(s.to_string(), "[8, 11)");
    /// assert!(Span::new(2.0, 1.0, true, true).is_err());
    /// ```
    pub fn new(lower: T, upper: T, lower_inc: bool, upper_inc: bool) -> Result<Self> {
        if lower.compare(&upper) == Ordering::Greater {
            tracing::debug!(lower = %lower.to_literal(), upper = %upper.to_literal(), "rejected span");
            return Err(InvalidBoundsError::new(format!(
                "the lower bound {} is greater than the upper bound {}",
                lower.to_literal(),
                upper.to_literal()
            ))
            .into());
        }

        let (lower, upper, lower_inc, upper_inc) = if T::DISCRETE {
            let lower = if lower_inc { lower } else { lower.successor()? };
            let upper = if upper_inc { upper.successor()? } else { upper };
            (lower, upper, true, false)
        } else {
            (lower, upper, lower_inc, upper_inc)
        };

        if !encloses(lower, lower_inc, upper, upper_inc) {
            tracing::debug!(lower = %lower.to_literal(), upper = %upper.to_literal(), "rejected empty span");
            return Err(InvalidBoundsError::new(format!(
                "the span from {} to {} contains no value",
                lower.to_literal(),
                upper.to_literal()
            ))
            .into());
        }

        Ok(Self {
            lower,
            upper,
            lower_inc,
            upper_inc,
        })
    }

    /// Creates `[lower, upper]`.
    #[inline]
    pub fn closed(lower: T, upper: T) -> Result<Self> {
        Self::new(lower, upper, true, true)
    }

    /// Creates `[lower, upper)`.
    #[inline]
    pub fn closed_open(lower: T, upper: T) -> Result<Self> {
        Self::new(lower, upper, true, false)
    }

    /// Creates the span holding exactly `value`.
    #[inline]
    pub fn point(value: T) -> Result<Self> {
        Self::new(value, value, true, true)
    }

    /// Creates a span from bounds that are already canonical.
    ///
    /// # Panics
    ///
    /// In debug builds, if the bounds enclose no value.
    #[inline]
    pub fn new_unchecked(lower: T, upper: T, lower_inc: bool, upper_inc: bool) -> Self {
        debug_assert!(
            encloses(lower, lower_inc, upper, upper_inc),
            "Invalid span: the bounds must enclose at least one value"
        );
        Self {
            lower,
            upper,
            lower_inc,
            upper_inc,
        }
    }

    #[inline]
    pub const fn lower(&self) -> T {
        self.lower
    }

    #[inline]
    pub const fn upper(&self) -> T {
        self.upper
    }

    #[inline]
    pub const fn lower_inc(&self) -> bool {
        self.lower_inc
    }

    #[inline]
    pub const fn upper_inc(&self) -> bool {
        self.upper_inc
    }

    /// The largest value in the span for discrete types, the upper bound otherwise.
    #[inline]
    pub(crate) fn last_value(&self) -> T {
        if T::DISCRETE {
            self.upper.predecessor().unwrap_or(self.upper)
        } else {
            self.upper
        }
    }

    /// `upper - lower`.
    #[inline]
    pub fn width(&self) -> T::Distance {
        self.lower.distance_to(self.upper)
    }

    #[inline]
    pub fn to_spanset(&self) -> SpanSet<T> {
        SpanSet::from(*self)
    }

    /// Total order: by lower bound (inclusive first), then by upper bound
    /// (exclusive first).
    #[inline]
    pub fn compare(&self, other: &Self) -> Ordering {
        cmp_lower(self.lower, self.lower_inc, other.lower, other.lower_inc).then_with(|| {
            cmp_upper(self.upper, self.upper_inc, other.upper, other.upper_inc)
        })
    }

    #[inline]
    pub(crate) fn cmp_upper_with(&self, other: &Self) -> Ordering {
        cmp_upper(self.upper, self.upper_inc, other.upper, other.upper_inc)
    }

    #[inline]
    pub(crate) fn cmp_lower_with(&self, other: &Self) -> Ordering {
        cmp_lower(self.lower, self.lower_inc, other.lower, other.lower_inc)
    }

    /// Returns `true` if `value` lies within the span.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::span::Span;
    /// let s = Span::closed_open(1.0, 5.0).unwrap();
    /// assert!(s.contains_value(1.0));
    /// assert!(!s.contains_value(5.0));
    /// ```
    #[inline]
    pub fn contains_value(&self, value: T) -> bool {
        encloses(self.lower, self.lower_inc, value, true) && encloses(value, true, self.upper, self.upper_inc)
    }

    /// Returns `true` if every value of `other` lies within `self`.
    #[inline]
    pub fn contains_span(&self, other: &Self) -> bool {
        self.cmp_lower_with(other) != Ordering::Greater && other.cmp_upper_with(self) != Ordering::Greater
    }

    /// Returns `true` if every span of `other` lies within `self`.
    #[inline]
    pub fn contains_spanset(&self, other: &SpanSet<T>) -> bool {
        other.to_span().is_some_and(|s| self.contains_span(&s))
    }

    #[inline]
    pub fn is_contained_in(&self, other: &Self) -> bool {
        other.contains_span(self)
    }

    /// Returns `true` if the spans share at least one value.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        encloses(self.lower, self.lower_inc, other.upper, other.upper_inc)
            && encloses(other.lower, other.lower_inc, self.upper, self.upper_inc)
    }

    /// Returns `true` if the spans share exactly one bound value and exactly
    /// one of them includes it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::span::Span;
    /// let a = Span::closed_open(0.0, 10.0).unwrap();
    /// assert!(a.is_adjacent(&Span::closed(10.0, 20.0).unwrap()));
    /// assert!(!a.is_adjacent(&Span::new(10.0, 20.0, false, true).unwrap()));
    /// ```
    #[inline]
    pub fn is_adjacent(&self, other: &Self) -> bool {
        (self.upper.same(&other.lower) && self.upper_inc != other.lower_inc)
            || (other.upper.same(&self.lower) && other.upper_inc != self.lower_inc)
    }

    pub fn is_adjacent_value(&self, value: T) -> bool {
        Self::point(value).is_ok_and(|p| self.is_adjacent(&p))
    }

    /// Returns `true` if both spans have the same bound values, regardless
    /// of inclusivity.
    #[inline]
    pub fn is_same(&self, other: &Self) -> bool {
        self.lower.same(&other.lower) && self.upper.same(&other.upper)
    }

    #[inline]
    fn left_of(&self, other: &Self) -> bool {
        !encloses(other.lower, other.lower_inc, self.upper, self.upper_inc)
    }

    /// Returns `true` if `self` ends before `other` starts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::span::Span;
    /// let a = Span::closed_open(1, 3).unwrap();
    /// let b = Span::closed_open(3, 5).unwrap();
    /// assert!(a.is_left(&b));
    /// assert!(b.is_right(&a));
    /// ```
    pub fn is_left<E: Extent<T> + ?Sized>(&self, other: &E) -> bool {
        other.extent().is_some_and(|o| self.left_of(&o))
    }

    /// Returns `true` if `self` does not extend to the right of `other`.
    pub fn is_over_or_left<E: Extent<T> + ?Sized>(&self, other: &E) -> bool {
        other
            .extent()
            .is_some_and(|o| self.cmp_upper_with(&o) != Ordering::Greater)
    }

    pub fn is_right<E: Extent<T> + ?Sized>(&self, other: &E) -> bool {
        other.extent().is_some_and(|o| o.left_of(self))
    }

    /// Returns `true` if `self` does not extend to the left of `other`.
    pub fn is_over_or_right<E: Extent<T> + ?Sized>(&self, other: &E) -> bool {
        other
            .extent()
            .is_some_and(|o| self.cmp_lower_with(&o) != Ordering::Less)
    }

    /// Every value of the span is smaller than `value`.
    #[inline]
    pub fn is_left_value(&self, value: T) -> bool {
        !encloses(value, true, self.upper, self.upper_inc)
    }

    /// Every value of the span is at most `value`.
    #[inline]
    pub fn is_over_or_left_value(&self, value: T) -> bool {
        self.last_value().compare(&value) != Ordering::Greater
    }

    /// Every value of the span is greater than `value`.
    #[inline]
    pub fn is_right_value(&self, value: T) -> bool {
        !encloses(self.lower, self.lower_inc, value, true)
    }

    /// Every value of the span is at least `value`.
    #[inline]
    pub fn is_over_or_right_value(&self, value: T) -> bool {
        self.lower.compare(&value) != Ordering::Less
    }

    /// The overlapping part as a span, if any.
    pub(crate) fn overlap(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        let (lower, lower_inc) = match self.cmp_lower_with(other) {
            Ordering::Less => (other.lower, other.lower_inc),
            _ => (self.lower, self.lower_inc),
        };
        let (upper, upper_inc) = match self.cmp_upper_with(other) {
            Ordering::Greater => (other.upper, other.upper_inc),
            _ => (self.upper, self.upper_inc),
        };
        Some(Self::new_unchecked(lower, upper, lower_inc, upper_inc))
    }

    /// Calculates the intersection of two spans.
    ///
    /// For discrete base values an overlap of a single value is returned as
    /// [`Intersection::Scalar`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::{intersection::Intersection, span::Span};
    /// let a = Span::closed(1, 5).unwrap();
    /// let b = Span::closed(5, 9).unwrap();
    /// assert_eq!(a.intersection(&b), Intersection::Scalar(5));
    /// ```
    pub fn intersection(&self, other: &Self) -> Intersection<T, Span<T>> {
        match self.overlap(other) {
            None => Intersection::Empty,
            Some(s) if T::DISCRETE && s.lower.successor().is_ok_and(|next| next.same(&s.upper)) => {
                Intersection::Scalar(s.lower)
            }
            Some(s) => Intersection::Collection(s),
        }
    }

    #[inline]
    pub fn intersection_value(&self, value: T) -> Option<T> {
        self.contains_value(value).then_some(value)
    }

    /// The parts of `self` not covered by `other`, in order.
    pub(crate) fn difference(&self, other: &Self) -> SmallVec<[Self; 2]> {
        if !self.overlaps(other) {
            return smallvec![*self];
        }

        let mut result = SmallVec::new();
        if self.cmp_lower_with(other) == Ordering::Less {
            result.push(Self::new_unchecked(
                self.lower,
                other.lower,
                self.lower_inc,
                !other.lower_inc,
            ));
        }
        if self.cmp_upper_with(other) == Ordering::Greater {
            result.push(Self::new_unchecked(
                other.upper,
                self.upper,
                !other.upper_inc,
                self.upper_inc,
            ));
        }
        result
    }

    /// Calculates the set difference `self - other`.
    ///
    /// The result may hold zero, one or two spans.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::span::Span;
    /// let a = Span::closed_open(1.0, 5.0).unwrap();
    /// let b = Span::closed_open(2.0, 3.0).unwrap();
    /// assert_eq!(a.minus(&b).to_string(), "{[1, 2), [3, 5)}");
    /// ```
    pub fn minus(&self, other: &Self) -> SpanSet<T> {
        SpanSet::from_normalized(self.difference(other).into_vec())
    }

    /// Calculates the union: one span when the operands overlap or touch,
    /// two otherwise.
    pub fn union(&self, other: &Self) -> SpanSet<T> {
        if let Some(merged) = self.merge(other) {
            return SpanSet::from(merged);
        }
        let (first, second) = if self.compare(other) == Ordering::Greater {
            (*other, *self)
        } else {
            (*self, *other)
        };
        SpanSet::from_normalized(vec![first, second])
    }

    /// The single span covering both operands if they overlap or touch.
    pub(crate) fn merge(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) && !self.is_adjacent(other) {
            return None;
        }
        let (lower, lower_inc) = match self.cmp_lower_with(other) {
            Ordering::Greater => (other.lower, other.lower_inc),
            _ => (self.lower, self.lower_inc),
        };
        let (upper, upper_inc) = match self.cmp_upper_with(other) {
            Ordering::Less => (other.upper, other.upper_inc),
            _ => (self.upper, self.upper_inc),
        };
        Some(Self::new_unchecked(lower, upper, lower_inc, upper_inc))
    }

    /// Distance to `value`: zero when contained, the gap otherwise.
    pub fn distance_value(&self, value: T) -> f64 {
        if self.contains_value(value) {
            return 0.0;
        }
        if value.compare(&self.lower) == Ordering::Less {
            T::distance_as_f64(value.distance_to(self.lower))
        } else {
            T::distance_as_f64(self.last_value().distance_to(value))
        }
    }

    /// Distance between spans: zero when they overlap, the gap otherwise.
    pub fn distance(&self, other: &Self) -> f64 {
        if self.overlaps(other) {
            return 0.0;
        }
        let (first, second) = if self.left_of(other) { (self, other) } else { (other, self) };
        T::distance_as_f64(first.last_value().distance_to(second.lower))
    }

    #[inline]
    pub fn shift(&self, delta: T::Distance) -> Result<Self> {
        self.shift_scale(Some(delta), None)
    }

    #[inline]
    pub fn scale(&self, width: T::Distance) -> Result<Self> {
        self.shift_scale(None, Some(width))
    }

    /// Shifts the span by `delta` and/or rescales it to `width`.
    ///
    /// For discrete base values the width is that of the closed form, so
    /// `[7, 10)` scaled to 4 becomes `[7, 12)`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if both arguments are `None` or the
    /// width is not positive.
    pub fn shift_scale(&self, delta: Option<T::Distance>, width: Option<T::Distance>) -> Result<Self> {
        check_shift_scale::<T>(delta, width)?;
        let lower = match delta {
            Some(d) => self.lower.shift(d)?,
            None => self.lower,
        };
        let last = match width {
            Some(w) => lower.shift(w)?,
            None => self.last_value().shift(delta.unwrap_or_else(T::zero_distance))?,
        };
        Self::new(lower, last, self.lower_inc, T::DISCRETE || self.upper_inc)
    }

    /// Parses a span from the current position of `lx`.
    pub(crate) fn parse_from(lx: &mut Lexer<'_>, ctx: &Context) -> Result<Self> {
        let lower_inc = lx.expect_one_of(&['[', '('])? == '[';
        let lower = lx.parse_value::<T>(&[','], ctx)?;
        lx.expect(',')?;
        let upper = lx.parse_value::<T>(&[']', ')'], ctx)?;
        let upper_inc = lx.expect_one_of(&[']', ')'])? == ']';
        Self::new(lower, upper, lower_inc, upper_inc)
    }

    /// Parses a span literal, reading timestamps without offset in the
    /// timezone of `ctx`.
    pub fn parse_with(literal: &str, ctx: &Context) -> Result<Self> {
        let mut lx = Lexer::new(literal, T::SPAN_TYPE.name());
        let span = Self::parse_from(&mut lx, ctx)?;
        lx.expect_end()?;
        Ok(span)
    }

    pub(crate) fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_char(if self.lower_inc { '[' } else { '(' })?;
        self.lower.write_literal(w)?;
        w.write_str(", ")?;
        self.upper.write_literal(w)?;
        w.write_char(if self.upper_inc { ']' } else { ')' })
    }

    #[inline]
    pub(crate) fn flags(&self) -> u8 {
        (if self.lower_inc { LOWER_INC } else { 0 }) | (if self.upper_inc { UPPER_INC } else { 0 })
    }

    pub(crate) fn write_wkb_body(&self, w: &mut WkbWriter) {
        w.write_u8(self.flags());
        self.lower.write_wkb(w);
        self.upper.write_wkb(w);
    }

    pub(crate) fn read_wkb_body(r: &mut WkbReader<'_>) -> Result<Self> {
        let flags = r.read_u8()?;
        let lower = T::read_wkb(r)?;
        let upper = T::read_wkb(r)?;
        Self::new(lower, upper, flags & LOWER_INC != 0, flags & UPPER_INC != 0)
    }

    /// Binary encoding in the given byte order.
    pub fn as_wkb(&self, order: WkbByteOrder) -> Vec<u8> {
        let mut w = WkbWriter::new(order, T::SPAN_TYPE);
        self.write_wkb_body(&mut w);
        w.finish()
    }

    pub fn from_wkb(bytes: &[u8]) -> Result<Self> {
        let mut r = WkbReader::new(bytes, T::SPAN_TYPE)?;
        let span = Self::read_wkb_body(&mut r)?;
        r.finish()?;
        Ok(span)
    }

    #[inline]
    pub fn as_hexwkb(&self, order: WkbByteOrder) -> String {
        encode_hex(&self.as_wkb(order))
    }

    pub fn from_hexwkb(hexwkb: &str) -> Result<Self> {
        Self::from_wkb(&decode_hex(hexwkb, T::SPAN_TYPE.name())?)
    }
}

/// Validates the argument pair shared by every `shift_scale`.
pub(crate) fn check_shift_scale<T: SpanValue>(
    delta: Option<T::Distance>,
    width: Option<T::Distance>,
) -> Result<()> {
    if delta.is_none() && width.is_none() {
        return Err(InvalidArgumentError::new("delta", "at least one of delta and width must be given").into());
    }
    if let Some(w) = width {
        if T::distance_as_f64(w) <= 0.0 {
            return Err(InvalidArgumentError::new(
                "width",
                format!("the width {} must be positive", T::distance_literal(w)),
            )
            .into());
        }
    }
    Ok(())
}

impl<T> PartialEq for Span<T>
where
    T: SpanValue,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl<T> Eq for Span<T> where T: SpanValue {}

impl<T> PartialOrd for Span<T>
where
    T: SpanValue,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Span<T>
where
    T: SpanValue,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl<T> fmt::Display for Span<T>
where
    T: SpanValue,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_literal(f)
    }
}

impl<T> FromStr for Span<T>
where
    T: SpanValue,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with(s, &Context::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidal_core::base::Timestamp;

    fn int(lower: i32, upper: i32) -> Span<i32> {
        Span::closed_open(lower, upper).unwrap()
    }

    fn float(s: &str) -> Span<f64> {
        s.parse().unwrap()
    }

    #[test]
    fn test_discrete_canonical_form() {
        assert_eq!(Span::new(7, 10, false, false).unwrap(), int(8, 10));
        assert_eq!(Span::new(7, 10, true, true).unwrap(), int(7, 11));
        assert_eq!(Span::point(3).unwrap(), int(3, 4));
        assert_eq!(int(8, 10).to_string(), "[8, 10)");
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(Span::closed(5, 1), Err(Error::InvalidBounds(_))));
        assert!(matches!(Span::new(3, 3, true, false), Err(Error::InvalidBounds(_))));
        assert!(matches!(Span::new(3, 4, false, false), Err(Error::InvalidBounds(_))));
        assert!(matches!(Span::new(1.0, 1.0, true, false), Err(Error::InvalidBounds(_))));
        assert!(Span::new(1.0, 1.0, true, true).is_ok());
    }

    #[test]
    fn test_contains() {
        let s = float("[1, 5)");
        assert!(s.contains_value(1.0));
        assert!(s.contains_value(4.999));
        assert!(!s.contains_value(5.0));
        assert!(s.contains_span(&float("(1, 5)")));
        assert!(!s.contains_span(&float("[1, 5]")));
        assert!(float("(1, 5)").is_contained_in(&s));
        let set: SpanSet<f64> = "{[1, 2], [3, 4]}".parse().unwrap();
        assert!(s.contains_spanset(&set));
        assert!(!float("[2, 5)").contains_spanset(&set));
    }

    #[test]
    fn test_overlaps_and_adjacent() {
        let a = float("[1, 3)");
        let b = float("[3, 5]");
        let c = float("(3, 5]");
        let d = float("[3, 3]");
        assert!(!a.overlaps(&b));
        assert!(a.is_adjacent(&b));
        assert!(!a.is_adjacent(&c));
        assert!(b.overlaps(&d));
        assert!(c.is_adjacent(&d));
        assert!(int(1, 3).is_adjacent(&int(3, 6)));
        assert!(int(1, 3).is_adjacent_value(3));
        assert!(!int(1, 3).is_adjacent_value(2));
    }

    #[test]
    fn test_position_predicates() {
        let a = float("[1, 3]");
        let b = float("[3, 5]");
        assert!(!a.is_left(&b));
        assert!(a.is_over_or_left(&b));
        assert!(b.is_over_or_right(&a));
        assert!(float("[1, 3)").is_left(&b));
        assert!(b.is_right(&float("[1, 3)")));

        assert!(int(1, 5).is_left_value(5));
        assert!(int(1, 5).is_over_or_left_value(4));
        assert!(!int(1, 5).is_over_or_left_value(3));
        assert!(float("(1, 5)").is_right_value(1.0));
        assert!(float("[1, 5)").is_over_or_right_value(1.0));
    }

    #[test]
    fn test_intersection() {
        assert_eq!(
            float("[1, 5)").intersection(&float("[3, 8]")),
            Intersection::Collection(float("[3, 5)"))
        );
        assert_eq!(float("[1, 3)").intersection(&float("[3, 8]")), Intersection::Empty);
        assert_eq!(int(1, 6).intersection(&int(5, 9)), Intersection::Scalar(5));
        assert_eq!(
            float("[1, 3]").intersection(&float("[3, 8]")),
            Intersection::Collection(float("[3, 3]"))
        );
        assert_eq!(float("[1, 3]").intersection_value(2.0), Some(2.0));
    }

    #[test]
    fn test_minus() {
        let a = float("[1, 5)");
        assert_eq!(a.minus(&float("[2, 3)")).to_string(), "{[1, 2), [3, 5)}");
        assert_eq!(a.minus(&float("[0, 2]")).to_string(), "{(2, 5)}");
        assert!(a.minus(&float("[0, 9]")).is_empty());
        assert_eq!(a.minus(&float("[7, 9]")).to_string(), "{[1, 5)}");
        assert_eq!(int(1, 10).minus(&int(3, 5)).to_string(), "{[1, 3), [5, 10)}");
    }

    #[test]
    fn test_union() {
        assert_eq!(float("[1, 3)").union(&float("[3, 5]")).to_string(), "{[1, 5]}");
        assert_eq!(float("[4, 5]").union(&float("[1, 2]")).to_string(), "{[1, 2], [4, 5]}");
        assert_eq!(int(1, 3).union(&int(3, 5)).to_string(), "{[1, 5)}");
    }

    #[test]
    fn test_distance() {
        assert_eq!(float("[1, 3]").distance(&float("[5, 6]")), 2.0);
        assert_eq!(float("[5, 6]").distance(&float("[1, 3]")), 2.0);
        assert_eq!(float("[1, 3]").distance(&float("[2, 6]")), 0.0);
        assert_eq!(int(1, 5).distance_value(7), 3.0);
        assert_eq!(int(1, 5).distance_value(-1), 2.0);
        assert_eq!(float("[1, 3]").distance_value(2.0), 0.0);
    }

    #[test]
    fn test_shift_scale() {
        assert_eq!(int(7, 10).shift(2).unwrap(), int(9, 12));
        assert_eq!(int(7, 10).scale(4).unwrap(), int(7, 12));
        assert_eq!(float("[1, 3)").shift_scale(Some(1.0), Some(4.0)).unwrap(), float("[2, 6)"));
        assert!(matches!(float("[1, 3]").shift_scale(None, None), Err(Error::InvalidArgument(_))));
        assert!(matches!(float("[1, 3]").scale(0.0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_ordering() {
        let mut v = vec![float("(1, 2]"), float("[1, 3]"), float("[1, 2)"), float("[0, 9]")];
        v.sort();
        let s: Vec<String> = v.iter().map(ToString::to_string).collect();
        assert_eq!(s, vec!["[0, 9]", "[1, 2)", "[1, 3]", "(1, 2]"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("[1, 2".parse::<Span<i32>>(), Err(Error::Parse(_))));
        assert!(matches!("1, 2]".parse::<Span<i32>>(), Err(Error::Parse(_))));
        assert!(matches!("[1, x]".parse::<Span<i32>>(), Err(Error::Parse(_))));
        assert!(matches!("[1, 2] z".parse::<Span<i32>>(), Err(Error::Parse(_))));
    }

    #[test]
    fn test_timestamp_span_text() {
        let s: Span<Timestamp> = "[2019-09-01, 2019-09-02)".parse().unwrap();
        assert_eq!(s.to_string(), "[2019-09-01 00:00:00+00, 2019-09-02 00:00:00+00)");
        assert_eq!(Timestamp::distance_as_f64(s.width()), 86_400.0);
    }

    #[test]
    fn test_wkb_layout_and_round_trip() {
        let s = int(7, 10);
        let bytes = s.as_wkb(WkbByteOrder::Ndr);
        assert_eq!(bytes, vec![1, 19, 0, LOWER_INC, 7, 0, 0, 0, 10, 0, 0, 0]);
        assert_eq!(Span::<i32>::from_wkb(&bytes).unwrap(), s);

        let hex = float("(1.5, 2]").as_hexwkb(WkbByteOrder::Xdr);
        assert_eq!(Span::<f64>::from_hexwkb(&hex).unwrap(), float("(1.5, 2]"));
        assert!(Span::<f64>::from_wkb(&bytes).is_err());
    }
}
