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

//! Normalized, ordered collections of disjoint spans.
//!
//! The set algebra between span sets runs as a two-pointer sweep over both
//! sorted span lists, so every binary operation is `O(n + m)`.

use crate::span::{Extent, Span, check_shift_scale};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tidal_core::algorithm::lower_bound_by;
use tidal_core::base::SpanValue;
use tidal_core::context::Context;
use tidal_core::err::{
    Error, IndexOutOfRangeError, InvalidArgumentError, InvalidBoundsError, Result,
};
use tidal_core::io::wkb::{decode_hex, encode_hex};
use tidal_core::io::{Lexer, WkbByteOrder, WkbReader, WkbWriter};

/// An ordered set of spans with gaps.
///
/// # Invariants
/// Spans are sorted, and no two consecutive spans overlap or touch in a
/// way that would let them merge into one. A span set is only ever empty
/// as the result of [`Span::minus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanSet<T>
where
    T: SpanValue,
{
    spans: Vec<Span<T>>,
}

/// Appends `span` to a sorted list, merging it with the last span when they
/// overlap or touch.
#[inline]
fn push_coalesce<T: SpanValue>(out: &mut Vec<Span<T>>, span: Span<T>) {
    if let Some(last) = out.last_mut() {
        if let Some(merged) = last.merge(&span) {
            *last = merged;
            return;
        }
    }
    out.push(span);
}

impl<T> SpanSet<T>
where
    T: SpanValue,
{
    /// Creates a normalized span set: sorts the spans and merges the ones
    /// that overlap or touch.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `spans` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::{span::Span, spanset::SpanSet};
    /// let ss = SpanSet::new([
    ///     Span::closed(5, 6).unwrap(),
    ///     Span::closed_open(1, 3).unwrap(),
    ///     Span::closed(3, 4).unwrap(),
    /// ])
    /// .unwrap();
    /// assert_eq!(ss.to_string(), "{[1, 7)}");
    /// ```
    pub fn new<I>(spans: I) -> Result<Self>
    where
        I: IntoIterator<Item = Span<T>>,
    {
        Self::from_spans(spans)
            .ok_or_else(|| InvalidArgumentError::new("spans", "a span set needs at least one span").into())
    }

    /// The span set holding `span` alone.
    #[inline]
    pub fn from_span(span: Span<T>) -> Self {
        Self { spans: vec![span] }
    }

    /// Like [`SpanSet::new`], returning `None` when there are no spans.
    pub fn from_spans<I>(spans: I) -> Option<Self>
    where
        I: IntoIterator<Item = Span<T>>,
    {
        let mut spans: Vec<Span<T>> = spans.into_iter().collect();
        if spans.is_empty() {
            return None;
        }
        spans.sort();
        let mut out = Vec::with_capacity(spans.len());
        for span in spans {
            push_coalesce(&mut out, span);
        }
        Some(Self { spans: out })
    }

    /// Creates a span set from spans that must already be normalized.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBoundsError`] if the spans are unsorted, overlap, or
    /// touch, and [`InvalidArgumentError`] if `spans` is empty.
    pub fn new_unnormalized(spans: Vec<Span<T>>) -> Result<Self> {
        if spans.is_empty() {
            return Err(InvalidArgumentError::new("spans", "a span set needs at least one span").into());
        }
        for w in spans.windows(2) {
            if !w[0].is_left(&w[1]) || w[0].is_adjacent(&w[1]) {
                tracing::debug!(first = %w[0], second = %w[1], "rejected unnormalized span set");
                return Err(InvalidBoundsError::new(format!(
                    "the spans {} and {} are not sorted and disjoint",
                    w[0], w[1]
                ))
                .into());
            }
        }
        Ok(Self { spans })
    }

    /// Wraps spans already known to be normalized (possibly none).
    #[inline]
    pub(crate) fn from_normalized(spans: Vec<Span<T>>) -> Self {
        debug_assert!(
            spans.windows(2).all(|w| w[0].is_left(&w[1]) && !w[0].is_adjacent(&w[1])),
            "called `from_normalized` with spans that are not normalized"
        );
        Self { spans }
    }

    /// Re-applies normalization. Span sets are normalized on construction,
    /// so this returns an equal value.
    pub fn normalize(&self) -> Self {
        let mut out = Vec::with_capacity(self.spans.len());
        for span in &self.spans {
            push_coalesce(&mut out, *span);
        }
        Self { spans: out }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    #[inline]
    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }

    /// The `index`-th span (0-based).
    pub fn span_n(&self, index: usize) -> Result<Span<T>> {
        self.spans
            .get(index)
            .copied()
            .ok_or_else(|| IndexOutOfRangeError::new("span", index, self.spans.len()).into())
    }

    #[inline]
    pub fn spans(&self) -> &[Span<T>] {
        &self.spans
    }

    #[inline]
    pub fn start_span(&self) -> Option<Span<T>> {
        self.spans.first().copied()
    }

    #[inline]
    pub fn end_span(&self) -> Option<Span<T>> {
        self.spans.last().copied()
    }

    #[inline]
    pub fn lower(&self) -> Option<T> {
        self.spans.first().map(Span::lower)
    }

    #[inline]
    pub fn upper(&self) -> Option<T> {
        self.spans.last().map(Span::upper)
    }

    /// The encompassing span from the first lower bound to the last upper
    /// bound, ignoring gaps.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::{span::Span, spanset::SpanSet};
    /// let ss: SpanSet<f64> = "{[1, 2], (3, 4)}".parse().unwrap();
    /// assert_eq!(ss.to_span().unwrap().to_string(), "[1, 4)");
    /// ```
    pub fn to_span(&self) -> Option<Span<T>> {
        let first = self.spans.first()?;
        let last = self.spans.last()?;
        Some(Span::new_unchecked(
            first.lower(),
            last.upper(),
            first.lower_inc(),
            last.upper_inc(),
        ))
    }

    /// Sum of the component widths, or the width of [`SpanSet::to_span`]
    /// when `ignore_gaps` is set.
    pub fn width(&self, ignore_gaps: bool) -> T::Distance {
        if ignore_gaps {
            return self.to_span().map_or_else(T::zero_distance, |s| s.width());
        }
        self.spans
            .iter()
            .fold(T::zero_distance(), |acc, s| acc + s.width())
    }

    /// Index of the first span that does not end before `value`.
    #[inline]
    fn first_not_left_of_value(&self, value: T) -> usize {
        lower_bound_by(&self.spans, |s| s.is_left_value(value))
    }

    pub fn contains_value(&self, value: T) -> bool {
        let i = self.first_not_left_of_value(value);
        self.spans.get(i).is_some_and(|s| s.contains_value(value))
    }

    pub fn contains_span(&self, span: &Span<T>) -> bool {
        let i = lower_bound_by(&self.spans, |s| s.is_left(span));
        self.spans.get(i).is_some_and(|s| s.contains_span(span))
    }

    /// Returns `true` if every span of `other` is contained in `self`.
    pub fn contains_spanset(&self, other: &SpanSet<T>) -> bool {
        !other.is_empty() && other.spans.iter().all(|s| self.contains_span(s))
    }

    #[inline]
    pub fn is_contained_in(&self, other: &SpanSet<T>) -> bool {
        other.contains_spanset(self)
    }

    pub fn overlaps_span(&self, span: &Span<T>) -> bool {
        let i = lower_bound_by(&self.spans, |s| s.is_left(span));
        self.spans.get(i).is_some_and(|s| s.overlaps(span))
    }

    /// Returns `true` if some span of `self` overlaps some span of `other`.
    pub fn overlaps(&self, other: &SpanSet<T>) -> bool {
        let (a, b) = (&self.spans, &other.spans);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            if a[i].overlaps(&b[j]) {
                return true;
            }
            if a[i].cmp_upper_with(&b[j]) == Ordering::Less {
                i += 1;
            } else {
                j += 1;
            }
        }
        false
    }

    /// Returns `true` if the operands do not overlap and some pair of their
    /// spans is adjacent.
    pub fn is_adjacent(&self, other: &SpanSet<T>) -> bool {
        let (a, b) = (&self.spans, &other.spans);
        let (mut i, mut j) = (0, 0);
        let mut adjacent = false;
        while i < a.len() && j < b.len() {
            if a[i].overlaps(&b[j]) {
                return false;
            }
            adjacent |= a[i].is_adjacent(&b[j]);
            if a[i].cmp_upper_with(&b[j]) == Ordering::Less {
                i += 1;
            } else {
                j += 1;
            }
        }
        adjacent
    }

    pub fn is_adjacent_span(&self, span: &Span<T>) -> bool {
        !self.overlaps_span(span) && self.spans.iter().any(|s| s.is_adjacent(span))
    }

    pub fn is_left<E: Extent<T> + ?Sized>(&self, other: &E) -> bool {
        self.to_span().is_some_and(|s| s.is_left(other))
    }

    pub fn is_over_or_left<E: Extent<T> + ?Sized>(&self, other: &E) -> bool {
        self.to_span().is_some_and(|s| s.is_over_or_left(other))
    }

    pub fn is_right<E: Extent<T> + ?Sized>(&self, other: &E) -> bool {
        self.to_span().is_some_and(|s| s.is_right(other))
    }

    pub fn is_over_or_right<E: Extent<T> + ?Sized>(&self, other: &E) -> bool {
        self.to_span().is_some_and(|s| s.is_over_or_right(other))
    }

    /// Calculates the intersection by merge-scan; `None` when empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::spanset::SpanSet;
    /// let a: SpanSet<i32> = "{[1, 5), [8, 12)}".parse().unwrap();
    /// let b: SpanSet<i32> = "{[3, 9)}".parse().unwrap();
    /// assert_eq!(a.intersection(&b).unwrap().to_string(), "{[3, 5), [8, 9)}");
    /// ```
    pub fn intersection(&self, other: &SpanSet<T>) -> Option<SpanSet<T>> {
        let (a, b) = (&self.spans, &other.spans);
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            if let Some(s) = a[i].overlap(&b[j]) {
                push_coalesce(&mut out, s);
            }
            if a[i].cmp_upper_with(&b[j]) == Ordering::Less {
                i += 1;
            } else {
                j += 1;
            }
        }
        tracing::trace!(left = a.len(), right = b.len(), result = out.len(), "span set intersection");
        (!out.is_empty()).then(|| Self::from_normalized(out))
    }

    #[inline]
    pub fn intersection_span(&self, span: &Span<T>) -> Option<SpanSet<T>> {
        self.intersection(&span.to_spanset())
    }

    /// Calculates the union by merging both sorted span lists.
    pub fn union(&self, other: &SpanSet<T>) -> SpanSet<T> {
        let (a, b) = (&self.spans, &other.spans);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() || j < b.len() {
            let take_left = j >= b.len() || (i < a.len() && a[i].compare(&b[j]) != Ordering::Greater);
            if take_left {
                push_coalesce(&mut out, a[i]);
                i += 1;
            } else {
                push_coalesce(&mut out, b[j]);
                j += 1;
            }
        }
        tracing::trace!(left = a.len(), right = b.len(), result = out.len(), "span set union");
        Self::from_normalized(out)
    }

    #[inline]
    pub fn union_span(&self, span: &Span<T>) -> SpanSet<T> {
        self.union(&span.to_spanset())
    }

    /// Calculates `self - other` by merge-scan; `None` when empty.
    pub fn minus(&self, other: &SpanSet<T>) -> Option<SpanSet<T>> {
        let b = &other.spans;
        let mut out = Vec::with_capacity(self.spans.len());
        let mut j = 0;
        for span in &self.spans {
            while j < b.len() && b[j].is_left(span) {
                j += 1;
            }
            let mut current = Some(*span);
            let mut k = j;
            while let Some(c) = current {
                if k >= b.len() || span.is_left(&b[k]) {
                    break;
                }
                let parts = c.difference(&b[k]);
                current = match parts.as_slice() {
                    [] => None,
                    [left, right] => {
                        out.push(*left);
                        Some(*right)
                    }
                    [only] if only.is_left(&b[k]) => {
                        out.push(*only);
                        None
                    }
                    [only] => Some(*only),
                    _ => unreachable!("a span difference has at most two parts"),
                };
                k += 1;
            }
            if let Some(c) = current {
                out.push(c);
            }
        }
        tracing::trace!(left = self.spans.len(), right = b.len(), result = out.len(), "span set minus");
        (!out.is_empty()).then(|| Self::from_normalized(out))
    }

    #[inline]
    pub fn minus_span(&self, span: &Span<T>) -> Option<SpanSet<T>> {
        self.minus(&span.to_spanset())
    }

    /// Smallest distance between the operands; zero when they overlap.
    pub fn distance(&self, other: &SpanSet<T>) -> f64 {
        let (a, b) = (&self.spans, &other.spans);
        let mut best = f64::INFINITY;
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            best = best.min(a[i].distance(&b[j]));
            if best == 0.0 {
                break;
            }
            if a[i].cmp_upper_with(&b[j]) == Ordering::Less {
                i += 1;
            } else {
                j += 1;
            }
        }
        best
    }

    #[inline]
    pub fn distance_span(&self, span: &Span<T>) -> f64 {
        self.distance(&span.to_spanset())
    }

    pub fn distance_value(&self, value: T) -> f64 {
        let i = self.first_not_left_of_value(value);
        let after = self.spans.get(i).map(|s| s.distance_value(value));
        let before = i.checked_sub(1).and_then(|p| self.spans.get(p)).map(|s| s.distance_value(value));
        match (before, after) {
            (Some(x), Some(y)) => x.min(y),
            (Some(x), None) | (None, Some(x)) => x,
            (None, None) => f64::INFINITY,
        }
    }

    #[inline]
    pub fn shift(&self, delta: T::Distance) -> Result<Self> {
        self.shift_scale(Some(delta), None)
    }

    #[inline]
    pub fn scale(&self, width: T::Distance) -> Result<Self> {
        self.shift_scale(None, Some(width))
    }

    /// Shifts and/or rescales the encompassing span, mapping every component
    /// span affinely.
    pub fn shift_scale(&self, delta: Option<T::Distance>, width: Option<T::Distance>) -> Result<Self> {
        check_shift_scale::<T>(delta, width)?;
        let Some(extent) = self.to_span() else {
            return Ok(self.clone());
        };
        let target = extent.shift_scale(delta, width)?;
        let map = AffineMap::new(&extent, &target);
        let spans = self
            .spans
            .iter()
            .map(|s| {
                let lower = map.apply(s.lower())?;
                let last = map.apply(s.last_value())?;
                Span::new(lower, last, s.lower_inc(), T::DISCRETE || s.upper_inc())
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(spans)
    }

    /// Parses a span set literal, normalizing it.
    pub fn parse_with(literal: &str, ctx: &Context) -> Result<Self> {
        let mut lx = Lexer::new(literal, T::SPANSET_TYPE.name());
        lx.expect('{')?;
        let mut spans = Vec::new();
        loop {
            spans.push(Span::parse_from(&mut lx, ctx)?);
            if lx.expect_one_of(&[',', '}'])? == '}' {
                break;
            }
        }
        lx.expect_end()?;
        Self::new(spans)
    }

    pub fn as_wkb(&self, order: WkbByteOrder) -> Vec<u8> {
        let mut w = WkbWriter::new(order, T::SPANSET_TYPE);
        w.write_len(self.spans.len());
        for span in &self.spans {
            span.write_wkb_body(&mut w);
        }
        w.finish()
    }

    pub fn from_wkb(bytes: &[u8]) -> Result<Self> {
        let mut r = WkbReader::new(bytes, T::SPANSET_TYPE)?;
        let count = r.read_len()?;
        let spans = (0..count)
            .map(|_| Span::read_wkb_body(&mut r))
            .collect::<Result<Vec<_>>>()?;
        r.finish()?;
        Self::new(spans)
    }

    #[inline]
    pub fn as_hexwkb(&self, order: WkbByteOrder) -> String {
        encode_hex(&self.as_wkb(order))
    }

    pub fn from_hexwkb(hexwkb: &str) -> Result<Self> {
        Self::from_wkb(&decode_hex(hexwkb, T::SPANSET_TYPE.name())?)
    }
}

/// Maps values of one span onto another, linearly on the value axis.
pub(crate) struct AffineMap {
    from_lower: f64,
    to_lower: f64,
    ratio: f64,
}

impl AffineMap {
    pub(crate) fn new<T: SpanValue>(from: &Span<T>, to: &Span<T>) -> Self {
        let from_lower = from.lower().to_axis();
        let from_width = from.last_value().to_axis() - from_lower;
        let to_lower = to.lower().to_axis();
        let to_width = to.last_value().to_axis() - to_lower;
        let ratio = if from_width == 0.0 { 0.0 } else { to_width / from_width };
        Self {
            from_lower,
            to_lower,
            ratio,
        }
    }

    #[inline]
    pub(crate) fn apply<T: SpanValue>(&self, value: T) -> Result<T> {
        T::from_axis(self.to_lower + (value.to_axis() - self.from_lower) * self.ratio)
    }
}

impl<T> Extent<T> for SpanSet<T>
where
    T: SpanValue,
{
    #[inline]
    fn extent(&self) -> Option<Span<T>> {
        self.to_span()
    }
}

impl<T> From<Span<T>> for SpanSet<T>
where
    T: SpanValue,
{
    #[inline]
    fn from(span: Span<T>) -> Self {
        Self::from_span(span)
    }
}

impl<T> fmt::Display for SpanSet<T>
where
    T: SpanValue,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            span.write_literal(f)?;
        }
        f.write_str("}")
    }
}

impl<T> FromStr for SpanSet<T>
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

    fn ints(s: &str) -> SpanSet<i32> {
        s.parse().unwrap()
    }

    fn floats(s: &str) -> SpanSet<f64> {
        s.parse().unwrap()
    }

    fn fspan(s: &str) -> Span<f64> {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_normalizes() {
        let ss = SpanSet::new([
            Span::closed(5, 6).unwrap(),
            Span::closed_open(1, 3).unwrap(),
            Span::closed(3, 4).unwrap(),
        ])
        .unwrap();
        assert_eq!(ss.to_string(), "{[1, 7)}");
        assert_eq!(floats("{[3, 4], [1, 2), [2, 3)}").to_string(), "{[1, 4]}");
        assert_eq!(floats("{[1, 2), (2, 3]}").num_spans(), 2);
        assert_eq!(SpanSet::from_span(fspan("[1, 2)")), floats("{[1, 2)}"));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(SpanSet::<i32>::new(Vec::new()), Err(Error::InvalidArgument(_))));
        assert!("{}".parse::<SpanSet<i32>>().is_err());
    }

    #[test]
    fn test_new_unnormalized_validates() {
        let ok = SpanSet::new_unnormalized(vec![fspan("[1, 2)"), fspan("(2, 3]")]);
        assert!(ok.is_ok());
        let touching = SpanSet::new_unnormalized(vec![fspan("[1, 2)"), fspan("[2, 3]")]);
        assert!(matches!(touching, Err(Error::InvalidBounds(_))));
        let unsorted = SpanSet::new_unnormalized(vec![fspan("[4, 5]"), fspan("[1, 2]")]);
        assert!(matches!(unsorted, Err(Error::InvalidBounds(_))));
    }

    #[test]
    fn test_accessors() {
        let ss = floats("{[1, 2], [4, 5), (7, 9]}");
        assert_eq!(ss.num_spans(), 3);
        assert_eq!(ss.span_n(1).unwrap(), fspan("[4, 5)"));
        assert!(matches!(ss.span_n(3), Err(Error::IndexOutOfRange(_))));
        assert_eq!(ss.start_span(), Some(fspan("[1, 2]")));
        assert_eq!(ss.end_span(), Some(fspan("(7, 9]")));
        assert_eq!(ss.lower(), Some(1.0));
        assert_eq!(ss.upper(), Some(9.0));
        assert_eq!(ss.to_span(), Some(fspan("[1, 9]")));
        assert_eq!(ss.width(false), 4.0);
        assert_eq!(ss.width(true), 8.0);
    }

    #[test]
    fn test_contains() {
        let ss = floats("{[1, 2], [4, 5), (7, 9]}");
        assert!(ss.contains_value(4.5));
        assert!(!ss.contains_value(3.0));
        assert!(!ss.contains_value(7.0));
        assert!(ss.contains_span(&fspan("[4, 4.5]")));
        assert!(!ss.contains_span(&fspan("[2, 4]")));
        assert!(ss.contains_spanset(&floats("{[1, 1.5], [8, 9]}")));
        assert!(!ss.contains_spanset(&floats("{[1, 1.5], [6, 9]}")));
    }

    #[test]
    fn test_overlaps_and_adjacent() {
        let a = floats("{[1, 2], [4, 5)}");
        assert!(a.overlaps(&floats("{[0, 0.5], [4.5, 6]}")));
        assert!(!a.overlaps(&floats("{[2.5, 3], [5, 6]}")));
        assert!(a.is_adjacent(&floats("{[5, 6]}")));
        assert!(!a.is_adjacent(&floats("{[5, 6], [1.5, 1.7]}")));
        assert!(a.overlaps_span(&fspan("[2, 3]")));
        assert!(a.is_adjacent_span(&fspan("(2, 3]")));
    }

    #[test]
    fn test_adjacent_interleaved() {
        let a = floats("{[1, 2), [4, 5), [8, 9)}");
        assert!(a.is_adjacent(&floats("{(0, 0.5], [2, 3], (5.5, 6)}")));
        assert!(a.is_adjacent(&floats("{[9, 10]}")));
        assert!(floats("{[9, 10]}").is_adjacent(&a));
        assert!(a.is_adjacent(&floats("{(0, 1)}")));
        assert!(!a.is_adjacent(&floats("{[2, 3], [8.5, 10]}")));
        assert!(!a.is_adjacent(&floats("{(2, 3], (5, 6)}")));
        assert!(ints("{[1, 3), [7, 9)}").is_adjacent(&ints("{[3, 4), [5, 7)}")));
    }

    #[test]
    fn test_intersection() {
        let a = ints("{[1, 5), [8, 12)}");
        let b = ints("{[3, 9)}");
        assert_eq!(a.intersection(&b).unwrap().to_string(), "{[3, 5), [8, 9)}");
        assert!(a.intersection(&ints("{[5, 8)}")).is_none());
        assert_eq!(
            a.intersection_span(&Span::closed(0, 100).unwrap()).unwrap(),
            a
        );
    }

    #[test]
    fn test_union() {
        let a = ints("{[1, 3), [8, 10)}");
        let b = ints("{[3, 5), [12, 14)}");
        assert_eq!(a.union(&b).to_string(), "{[1, 5), [8, 10), [12, 14)}");
        assert_eq!(a.union_span(&Span::closed_open(2, 9).unwrap()).to_string(), "{[1, 10)}");
    }

    #[test]
    fn test_minus() {
        let a = floats("{[1, 5), [8, 12]}");
        let b = floats("{[2, 3), [4, 9]}");
        assert_eq!(a.minus(&b).unwrap().to_string(), "{[1, 2), [3, 4), (9, 12]}");
        assert!(a.minus(&floats("{[0, 20]}")).is_none());
        assert_eq!(a.minus(&floats("{[20, 30]}")).unwrap(), a);
        assert_eq!(
            floats("{[0, 10]}").minus(&floats("{[1, 2], [3, 4], [5, 6]}")).unwrap().to_string(),
            "{[0, 1), (2, 3), (4, 5), (6, 10]}"
        );
    }

    #[test]
    fn test_distance() {
        let a = floats("{[0, 1], [10, 11]}");
        assert_eq!(a.distance(&floats("{[5, 6]}")), 4.0);
        assert_eq!(a.distance(&floats("{[0.5, 0.7]}")), 0.0);
        assert_eq!(a.distance_value(8.0), 2.0);
        assert_eq!(a.distance_value(4.0), 3.0);
        assert_eq!(a.distance_span(&fspan("[12, 13]")), 1.0);
    }

    #[test]
    fn test_shift_scale() {
        let a = floats("{[0, 1], [3, 4]}");
        assert_eq!(a.shift(10.0).unwrap().to_string(), "{[10, 11], [13, 14]}");
        assert_eq!(a.scale(8.0).unwrap().to_string(), "{[0, 2], [6, 8]}");
        assert!(a.shift_scale(None, None).is_err());
        assert_eq!(ints("{[1, 3), [5, 7)}").shift(2).unwrap().to_string(), "{[3, 5), [7, 9)}");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let ss = floats("{[1, 2), [2, 3], [5, 6]}");
        assert_eq!(ss.normalize(), ss);
        assert_eq!(ss.normalize().normalize(), ss.normalize());
    }

    #[test]
    fn test_position_predicates() {
        let a = floats("{[1, 2], [3, 4)}");
        let b = floats("{[4, 5]}");
        assert!(a.is_left(&b));
        assert!(b.is_right(&a));
        assert!(a.is_over_or_left(&fspan("[0, 4]")));
        assert!(b.is_over_or_right(&a));
    }

    #[test]
    fn test_wkb_round_trip() {
        let ss = ints("{[1, 3), [5, 9)}");
        let bytes = ss.as_wkb(WkbByteOrder::Ndr);
        assert_eq!(&bytes[..7], &[1, 20, 0, 2, 0, 0, 0]);
        assert_eq!(SpanSet::<i32>::from_wkb(&bytes).unwrap(), ss);
        let hex = ss.as_hexwkb(WkbByteOrder::Xdr);
        assert_eq!(SpanSet::<i32>::from_hexwkb(&hex).unwrap(), ss);
    }
}
