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

//! Ordered sets of distinct values.

use crate::span::{Extent, Span, check_shift_scale};
use crate::spanset::{AffineMap, SpanSet};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tidal_core::algorithm::find_by;
use tidal_core::base::{BaseValue, SetValue, SpanValue};
use tidal_core::context::Context;
use tidal_core::err::{Error, IndexOutOfRangeError, InvalidArgumentError, Result};
use tidal_core::io::wkb::{decode_hex, encode_hex};
use tidal_core::io::{Lexer, WkbByteOrder, WkbReader, WkbWriter};

/// A non-empty set of distinct values, stored sorted.
///
/// # Invariants
/// Values are strictly increasing under [`BaseValue::compare`].
#[derive(Clone, Debug, PartialEq)]
pub struct Set<T>
where
    T: SetValue,
{
    values: Vec<T>,
}

/// Walks two sorted slices in lockstep, feeding each step to `emit`:
/// `(Some(a), None)` for a value only in the left slice, `(None, Some(b))`
/// for one only in the right slice, and `(Some(a), Some(b))` for a shared one.
fn merge_scan<'a, T, F>(a: &'a [T], b: &'a [T], mut emit: F)
where
    T: BaseValue,
    F: FnMut(Option<&'a T>, Option<&'a T>),
{
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        let order = match (a.get(i), b.get(j)) {
            (Some(x), Some(y)) => x.compare(y),
            (Some(_), None) => Ordering::Less,
            _ => Ordering::Greater,
        };
        match order {
            Ordering::Less => {
                emit(Some(&a[i]), None);
                i += 1;
            }
            Ordering::Greater => {
                emit(None, Some(&b[j]));
                j += 1;
            }
            Ordering::Equal => {
                emit(Some(&a[i]), Some(&b[j]));
                i += 1;
                j += 1;
            }
        }
    }
}

impl<T> Set<T>
where
    T: SetValue,
{
    /// Creates a set, sorting and de-duplicating `values`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::set::Set;
    /// let s = Set::new([3, 1, 2, 3]).unwrap();
    /// assert_eq!(s.to_string(), "{1, 2, 3}");
    /// ```
    pub fn new<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_values(values)
            .ok_or_else(|| InvalidArgumentError::new("values", "a set needs at least one element").into())
    }

    /// Like [`Set::new`], returning `None` when there are no values.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut values: Vec<T> = values.into_iter().collect();
        values.sort_by(|a, b| a.compare(b));
        values.dedup_by(|a, b| a.same(b));
        Self::from_sorted(values)
    }

    #[inline]
    fn from_sorted(values: Vec<T>) -> Option<Self> {
        (!values.is_empty()).then_some(Self { values })
    }

    /// Re-applies normalization; sets are normalized on construction.
    pub fn normalize(&self) -> Self {
        let mut values = self.values.clone();
        values.dedup_by(|a, b| a.same(b));
        Self { values }
    }

    #[inline]
    pub fn num_elements(&self) -> usize {
        self.values.len()
    }

    /// The `index`-th element (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfRangeError`] if `index >= num_elements()`.
    pub fn element_n(&self, index: usize) -> Result<T> {
        self.values
            .get(index)
            .cloned()
            .ok_or_else(|| IndexOutOfRangeError::new("element", index, self.values.len()).into())
    }

    #[inline]
    pub fn elements(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn start_element(&self) -> &T {
        &self.values[0]
    }

    #[inline]
    pub fn end_element(&self) -> &T {
        &self.values[self.values.len() - 1]
    }

    #[inline]
    pub fn contains_value(&self, value: &T) -> bool {
        find_by(&self.values, value, |a, b| a.compare(b)).is_some()
    }

    /// Returns `true` if every element of `other` is in `self`.
    pub fn contains_set(&self, other: &Set<T>) -> bool {
        let mut contained = true;
        merge_scan(&self.values, &other.values, |a, b| {
            if a.is_none() && b.is_some() {
                contained = false;
            }
        });
        contained
    }

    #[inline]
    pub fn is_contained_in(&self, other: &Set<T>) -> bool {
        other.contains_set(self)
    }

    /// Returns `true` if the sets share an element.
    pub fn overlaps(&self, other: &Set<T>) -> bool {
        let (a, b) = (&self.values, &other.values);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].compare(&b[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => return true,
            }
        }
        false
    }

    #[inline]
    pub fn is_left(&self, other: &Set<T>) -> bool {
        self.end_element().is_less(other.start_element())
    }

    #[inline]
    pub fn is_over_or_left(&self, other: &Set<T>) -> bool {
        !other.end_element().is_less(self.end_element())
    }

    #[inline]
    pub fn is_right(&self, other: &Set<T>) -> bool {
        other.is_left(self)
    }

    #[inline]
    pub fn is_over_or_right(&self, other: &Set<T>) -> bool {
        !self.start_element().is_less(other.start_element())
    }

    #[inline]
    pub fn is_left_value(&self, value: &T) -> bool {
        self.end_element().is_less(value)
    }

    #[inline]
    pub fn is_over_or_left_value(&self, value: &T) -> bool {
        !value.is_less(self.end_element())
    }

    #[inline]
    pub fn is_right_value(&self, value: &T) -> bool {
        value.is_less(self.start_element())
    }

    #[inline]
    pub fn is_over_or_right_value(&self, value: &T) -> bool {
        !self.start_element().is_less(value)
    }

    /// Elements in both sets; `None` when there are none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_collections::set::Set;
    /// let a: Set<i32> = "{1, 2, 3}".parse().unwrap();
    /// let b: Set<i32> = "{2, 3, 4}".parse().unwrap();
    /// assert_eq!(a.intersection(&b).unwrap().to_string(), "{2, 3}");
    /// ```
    pub fn intersection(&self, other: &Set<T>) -> Option<Set<T>> {
        let mut out = Vec::new();
        merge_scan(&self.values, &other.values, |a, b| {
            if let (Some(v), Some(_)) = (a, b) {
                out.push(v.clone());
            }
        });
        Self::from_sorted(out)
    }

    #[inline]
    pub fn intersection_value(&self, value: &T) -> Option<T> {
        self.contains_value(value).then(|| value.clone())
    }

    pub fn union(&self, other: &Set<T>) -> Set<T> {
        let mut out = Vec::with_capacity(self.values.len() + other.values.len());
        merge_scan(&self.values, &other.values, |a, b| {
            if let Some(v) = a.or(b) {
                out.push(v.clone());
            }
        });
        Self { values: out }
    }

    pub fn union_value(&self, value: T) -> Set<T> {
        self.union(&Set { values: vec![value] })
    }

    /// Elements of `self` not in `other`; `None` when there are none.
    pub fn minus(&self, other: &Set<T>) -> Option<Set<T>> {
        let mut out = Vec::with_capacity(self.values.len());
        merge_scan(&self.values, &other.values, |a, b| {
            if let (Some(v), None) = (a, b) {
                out.push(v.clone());
            }
        });
        Self::from_sorted(out)
    }

    pub fn minus_value(&self, value: &T) -> Option<Set<T>> {
        Self::from_sorted(self.values.iter().filter(|v| !v.same(value)).cloned().collect())
    }

    /// Parses a set literal such as `{1, 2, 3}`.
    pub fn parse_with(literal: &str, ctx: &Context) -> Result<Self> {
        let mut lx = Lexer::new(literal, T::SET_TYPE.name());
        lx.expect('{')?;
        let mut values = Vec::new();
        loop {
            values.push(lx.parse_value::<T>(&[',', '}'], ctx)?);
            if lx.expect_one_of(&[',', '}'])? == '}' {
                break;
            }
        }
        lx.expect_end()?;
        Self::new(values)
    }

    pub fn as_wkb(&self, order: WkbByteOrder) -> Vec<u8> {
        let mut w = WkbWriter::new(order, T::SET_TYPE);
        w.write_len(self.values.len());
        for v in &self.values {
            v.write_wkb(&mut w);
        }
        w.finish()
    }

    pub fn from_wkb(bytes: &[u8]) -> Result<Self> {
        let mut r = WkbReader::new(bytes, T::SET_TYPE)?;
        let count = r.read_len()?;
        let values = (0..count)
            .map(|_| T::read_wkb(&mut r))
            .collect::<Result<Vec<_>>>()?;
        r.finish()?;
        Self::new(values)
    }

    #[inline]
    pub fn as_hexwkb(&self, order: WkbByteOrder) -> String {
        encode_hex(&self.as_wkb(order))
    }

    pub fn from_hexwkb(hexwkb: &str) -> Result<Self> {
        Self::from_wkb(&decode_hex(hexwkb, T::SET_TYPE.name())?)
    }
}

impl<T> Set<T>
where
    T: SpanValue,
{
    /// The span from the first to the last element, both included.
    pub fn to_span(&self) -> Result<Span<T>> {
        Span::closed(*self.start_element(), *self.end_element())
    }

    /// One point span per element, normalized; consecutive discrete values
    /// merge into one span.
    pub fn to_spanset(&self) -> Result<SpanSet<T>> {
        let spans = self
            .values
            .iter()
            .map(|v| Span::point(*v))
            .collect::<Result<Vec<_>>>()?;
        SpanSet::new(spans)
    }

    /// Zero when the sets share an element, otherwise the smallest gap
    /// between elements of the two sets.
    pub fn distance(&self, other: &Set<T>) -> f64 {
        let mut best = f64::INFINITY;
        let mut prev: Option<(bool, T)> = None;
        merge_scan(&self.values, &other.values, |a, b| {
            let (from_left, v) = match (a, b) {
                (Some(_), Some(_)) => {
                    best = 0.0;
                    return;
                }
                (Some(v), None) => (true, *v),
                (None, Some(v)) => (false, *v),
                (None, None) => return,
            };
            if let Some((side, p)) = prev {
                if side != from_left {
                    best = best.min(T::distance_as_f64(p.distance_to(v)));
                }
            }
            prev = Some((from_left, v));
        });
        best
    }

    pub fn distance_value(&self, value: T) -> f64 {
        self.values
            .iter()
            .map(|v| T::distance_as_f64(v.distance_to(value)).abs())
            .fold(f64::INFINITY, f64::min)
    }

    #[inline]
    pub fn shift(&self, delta: T::Distance) -> Result<Self> {
        self.shift_scale(Some(delta), None)
    }

    #[inline]
    pub fn scale(&self, width: T::Distance) -> Result<Self> {
        self.shift_scale(None, Some(width))
    }

    /// Shifts and/or rescales the set so that its extent starts at
    /// `start + delta` and spans `width`.
    pub fn shift_scale(&self, delta: Option<T::Distance>, width: Option<T::Distance>) -> Result<Self> {
        check_shift_scale::<T>(delta, width)?;
        let first = *self.start_element();
        let last = *self.end_element();
        let new_first = match delta {
            Some(d) => first.shift(d)?,
            None => first,
        };
        let new_last = match width {
            Some(w) => new_first.shift(w)?,
            None => last.shift(delta.unwrap_or_else(T::zero_distance))?,
        };
        let from = Span::closed(first, last)?;
        let to = Span::closed(new_first, new_last)?;
        let map = AffineMap::new(&from, &to);
        let values = self
            .values
            .iter()
            .map(|v| map.apply(*v))
            .collect::<Result<Vec<_>>>()?;
        Self::new(values)
    }
}

impl<T> Extent<T> for Set<T>
where
    T: SpanValue,
{
    #[inline]
    fn extent(&self) -> Option<Span<T>> {
        self.to_span().ok()
    }
}

impl<T> fmt::Display for Set<T>
where
    T: SetValue,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            v.write_literal(f)?;
        }
        f.write_str("}")
    }
}

impl<T> FromStr for Set<T>
where
    T: SetValue,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with(s, &Context::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidal_core::base::{GeomPoint, Timestamp};

    fn ints(s: &str) -> Set<i32> {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_sorts_and_dedups() {
        let s = Set::new([5, 1, 3, 1, 5]).unwrap();
        assert_eq!(s.elements(), &[1, 3, 5]);
        assert!(matches!(Set::<i32>::new([]), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_element_n_is_zero_based() {
        let s = ints("{10, 20, 30}");
        assert_eq!(s.num_elements(), 3);
        assert_eq!(s.element_n(0).unwrap(), 10);
        assert_eq!(s.element_n(2).unwrap(), 30);
        assert!(matches!(s.element_n(3), Err(Error::IndexOutOfRange(_))));
        assert_eq!(*s.start_element(), 10);
        assert_eq!(*s.end_element(), 30);
    }

    #[test]
    fn test_algebra() {
        let a = ints("{1, 2, 3}");
        let b = ints("{2, 3, 4}");
        assert_eq!(a.intersection(&b).unwrap(), ints("{2, 3}"));
        assert_eq!(a.union(&b), ints("{1, 2, 3, 4}"));
        assert_eq!(a.minus(&b).unwrap(), ints("{1}"));
        assert!(a.minus(&a).is_none());
        assert!(a.intersection(&ints("{7}")).is_none());
        assert_eq!(a.intersection_value(&2), Some(2));
        assert_eq!(a.union_value(0), ints("{0, 1, 2, 3}"));
        assert_eq!(a.minus_value(&2).unwrap(), ints("{1, 3}"));
        assert!(ints("{1}").minus_value(&1).is_none());
    }

    #[test]
    fn test_predicates() {
        let a = ints("{1, 2, 3}");
        assert!(a.contains_value(&2));
        assert!(!a.contains_value(&4));
        assert!(a.contains_set(&ints("{1, 3}")));
        assert!(!a.contains_set(&ints("{1, 4}")));
        assert!(ints("{1, 3}").is_contained_in(&a));
        assert!(a.overlaps(&ints("{3, 9}")));
        assert!(!a.overlaps(&ints("{4, 9}")));
        assert!(a.is_left(&ints("{4, 9}")));
        assert!(ints("{4, 9}").is_right(&a));
        assert!(a.is_over_or_left(&ints("{3, 4}")));
        assert!(a.is_over_or_right(&ints("{0, 9}")));
        assert!(a.is_left_value(&4));
        assert!(a.is_over_or_left_value(&3));
        assert!(a.is_right_value(&0));
        assert!(a.is_over_or_right_value(&1));
    }

    #[test]
    fn test_distance() {
        assert_eq!(ints("{1, 2, 10}").distance(&ints("{5, 20}")), 3.0);
        assert_eq!(ints("{1, 5}").distance(&ints("{5}")), 0.0);
        assert_eq!(ints("{1, 10}").distance_value(7), 3.0);
    }

    #[test]
    fn test_spans() {
        assert_eq!(ints("{1, 2, 3, 7}").to_spanset().unwrap().to_string(), "{[1, 4), [7, 8)}");
        assert_eq!(ints("{1, 7}").to_span().unwrap().to_string(), "[1, 8)");
    }

    #[test]
    fn test_shift_scale() {
        assert_eq!(ints("{1, 2, 5}").shift(10).unwrap(), ints("{11, 12, 15}"));
        let floats: Set<f64> = "{0, 1, 4}".parse().unwrap();
        assert_eq!(floats.scale(8.0).unwrap().to_string(), "{0, 2, 8}");
        assert!(floats.shift_scale(None, None).is_err());
    }

    #[test]
    fn test_text_and_point_sets() {
        let s: Set<String> = r#"{"b", a, "c d"}"#.parse().unwrap();
        assert_eq!(s.to_string(), r#"{"a", "b", "c d"}"#);
        let p: Set<GeomPoint> = "{POINT(2 0), POINT(1 5)}".parse().unwrap();
        assert_eq!(p.to_string(), "{POINT(1 5), POINT(2 0)}");
    }

    #[test]
    fn test_timestamp_set_literal() {
        let s: Set<Timestamp> = "{2019-09-02, 2019-09-01 00:00:00+00}".parse().unwrap();
        assert_eq!(s.to_string(), "{2019-09-01 00:00:00+00, 2019-09-02 00:00:00+00}");
    }

    #[test]
    fn test_wkb_round_trip() {
        let s = ints("{1, 5, 9}");
        let bytes = s.as_wkb(WkbByteOrder::Ndr);
        assert_eq!(&bytes[..7], &[1, 18, 0, 3, 0, 0, 0]);
        assert_eq!(Set::<i32>::from_wkb(&bytes).unwrap(), s);
        let t: Set<String> = "{a, b}".parse().unwrap();
        assert_eq!(Set::<String>::from_hexwkb(&t.as_hexwkb(WkbByteOrder::Xdr)).unwrap(), t);
    }
}
