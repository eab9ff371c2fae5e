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

//! Restriction of temporal values to times and values.
//!
//! `at` keeps the part of a temporal value selected by a restrictor; `minus`
//! keeps the rest. `minus` is always derived from `at`: the operand is
//! re-sliced against its own time minus the time covered by `at`, so merging
//! the two results reconstructs the operand.

use crate::sequenceset::TSequenceSet;
use crate::temporal::Temporal;
use crate::{Period, PeriodSet, TimestampSet};
use smallvec::{SmallVec, smallvec};
use tidal_collections::set::Set;
use tidal_collections::span::Span;
use tidal_collections::spanset::SpanSet;
use tidal_core::base::{NumericValue, SetValue, TemporalValue, Timestamp};
use tidal_core::num::float_eq;

/// A time filter.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeRestrictor {
    Timestamp(Timestamp),
    TimestampSet(TimestampSet),
    Period(Period),
    PeriodSet(PeriodSet),
}

impl TimeRestrictor {
    /// The restrictor as a period set.
    pub fn to_periodset(&self) -> PeriodSet {
        match self {
            TimeRestrictor::Timestamp(t) => SpanSet::from(Span::new_unchecked(*t, *t, true, true)),
            TimeRestrictor::TimestampSet(ts) => {
                let points = ts
                    .elements()
                    .iter()
                    .map(|t| Span::new_unchecked(*t, *t, true, true));
                let first = *ts.start_element();
                SpanSet::from_spans(points)
                    .unwrap_or_else(|| SpanSet::from(Span::new_unchecked(first, first, true, true)))
            }
            TimeRestrictor::Period(p) => SpanSet::from(*p),
            TimeRestrictor::PeriodSet(ps) => ps.clone(),
        }
    }
}

impl From<Timestamp> for TimeRestrictor {
    #[inline]
    fn from(t: Timestamp) -> Self {
        TimeRestrictor::Timestamp(t)
    }
}

impl From<TimestampSet> for TimeRestrictor {
    #[inline]
    fn from(ts: TimestampSet) -> Self {
        TimeRestrictor::TimestampSet(ts)
    }
}

impl From<&TimestampSet> for TimeRestrictor {
    #[inline]
    fn from(ts: &TimestampSet) -> Self {
        TimeRestrictor::TimestampSet(ts.clone())
    }
}

impl From<Period> for TimeRestrictor {
    #[inline]
    fn from(p: Period) -> Self {
        TimeRestrictor::Period(p)
    }
}

impl From<&Period> for TimeRestrictor {
    #[inline]
    fn from(p: &Period) -> Self {
        TimeRestrictor::Period(*p)
    }
}

impl From<PeriodSet> for TimeRestrictor {
    #[inline]
    fn from(ps: PeriodSet) -> Self {
        TimeRestrictor::PeriodSet(ps)
    }
}

impl From<&PeriodSet> for TimeRestrictor {
    #[inline]
    fn from(ps: &PeriodSet) -> Self {
        TimeRestrictor::PeriodSet(ps.clone())
    }
}

/// A sub-range `from..=to` of the ratio interval `[0, 1]` of a linear
/// segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioRange {
    pub from: f64,
    pub to: f64,
}

impl RatioRange {
    /// The whole segment `[0, 1]`.
    pub const WHOLE: RatioRange = RatioRange { from: 0.0, to: 1.0 };

    /// The single ratio `r`.
    #[inline]
    pub const fn point(r: f64) -> Self {
        Self { from: r, to: r }
    }
}

/// A value filter.
///
/// Implemented for single values (through [`Temporal::at_value`]), for
/// [`Set`], and for numeric [`Span`] and [`SpanSet`].
pub trait ValueRestrictor<T>
where
    T: TemporalValue,
{
    /// Whether `value` passes the filter.
    fn contains(&self, value: &T) -> bool;

    /// The parts of the linear segment `start → end` whose values pass the
    /// filter, in increasing ratio order. Bounds are closed; the caller
    /// decides inclusivity from the values at the cuts.
    fn linear_preimage(&self, start: &T, end: &T) -> SmallVec<[RatioRange; 2]>;
}

/// Sorts ratio ranges and drops repeated points.
fn sort_ranges(mut ranges: SmallVec<[RatioRange; 2]>) -> SmallVec<[RatioRange; 2]> {
    ranges.sort_by(|a, b| a.from.total_cmp(&b.from));
    ranges.dedup_by(|b, a| a.from == a.to && b.from == b.to && a.from == b.from);
    ranges
}

/// A single value as a restrictor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Single<'a, T>(pub(crate) &'a T);

impl<T> ValueRestrictor<T> for Single<'_, T>
where
    T: TemporalValue,
{
    #[inline]
    fn contains(&self, value: &T) -> bool {
        value.approx_eq(self.0)
    }

    fn linear_preimage(&self, start: &T, end: &T) -> SmallVec<[RatioRange; 2]> {
        if start.approx_eq(end) {
            return if start.approx_eq(self.0) {
                smallvec![RatioRange::WHOLE]
            } else {
                SmallVec::new()
            };
        }
        match T::locate(start, end, self.0) {
            Some(r) => smallvec![RatioRange::point(r)],
            None => SmallVec::new(),
        }
    }
}

impl<T> ValueRestrictor<T> for Set<T>
where
    T: TemporalValue + SetValue,
{
    #[inline]
    fn contains(&self, value: &T) -> bool {
        self.contains_value(value)
    }

    fn linear_preimage(&self, start: &T, end: &T) -> SmallVec<[RatioRange; 2]> {
        if start.approx_eq(end) {
            return if self.contains(start) {
                smallvec![RatioRange::WHOLE]
            } else {
                SmallVec::new()
            };
        }
        let ranges = self
            .elements()
            .iter()
            .filter_map(|v| T::locate(start, end, v).map(RatioRange::point))
            .collect();
        sort_ranges(ranges)
    }
}

impl<T> ValueRestrictor<T> for Span<T>
where
    T: NumericValue,
{
    #[inline]
    fn contains(&self, value: &T) -> bool {
        self.contains_value(*value)
    }

    fn linear_preimage(&self, start: &T, end: &T) -> SmallVec<[RatioRange; 2]> {
        let (a, b) = (start.to_f64(), end.to_f64());
        if float_eq(a, b) {
            return if self.contains(start) {
                smallvec![RatioRange::WHOLE]
            } else {
                SmallVec::new()
            };
        }
        let ratio = |v: T| (v.to_f64() - a) / (b - a);
        let lower = (ratio(self.lower()), self.lower_inc());
        let upper = (ratio(self.upper()), self.upper_inc());
        // A decreasing segment meets the upper bound first.
        let (from, to) = if a < b { (lower, upper) } else { (upper, lower) };
        if from.0 > 1.0 || to.0 < 0.0 {
            return SmallVec::new();
        }
        let (from, to) = ((from.0.max(0.0), from.1 || from.0 < 0.0), (to.0.min(1.0), to.1 || to.0 > 1.0));
        if from.0 > to.0 || (from.0 == to.0 && !(from.1 && to.1)) {
            return SmallVec::new();
        }
        smallvec![RatioRange { from: from.0, to: to.0 }]
    }
}

impl<T> ValueRestrictor<T> for SpanSet<T>
where
    T: NumericValue,
{
    #[inline]
    fn contains(&self, value: &T) -> bool {
        self.contains_value(*value)
    }

    fn linear_preimage(&self, start: &T, end: &T) -> SmallVec<[RatioRange; 2]> {
        let ranges = self
            .spans()
            .iter()
            .flat_map(|s| s.linear_preimage(start, end))
            .collect();
        sort_ranges(ranges)
    }
}

impl<T> Temporal<T>
where
    T: TemporalValue,
{
    /// The part of `self` within the time of `restrictor`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_temporal::temporal::Temporal;
    /// # use tidal_core::base::Timestamp;
    /// let seq: Temporal<i32> = "{1@2019-09-01, 2@2019-09-02}".parse().unwrap();
    /// let at = seq.at_time(Timestamp::from_ymd(2019, 9, 1).unwrap()).unwrap();
    /// assert_eq!(at.to_string(), "{1@2019-09-01 00:00:00+00}");
    /// ```
    pub fn at_time(&self, restrictor: impl Into<TimeRestrictor>) -> Option<Temporal<T>> {
        self.restrict_time(&restrictor.into().to_periodset())
    }

    /// The part of `self` outside the time of `restrictor`.
    pub fn minus_time(&self, restrictor: impl Into<TimeRestrictor>) -> Option<Temporal<T>> {
        match self.at_time(restrictor) {
            Some(at) => self.minus_covered(&at.time()),
            None => self.restrict_time(&self.time()),
        }
    }

    /// The part of `self` where it equals `value`.
    pub fn at_value(&self, value: &T) -> Option<Temporal<T>> {
        self.at_values(&Single(value))
    }

    pub fn minus_value(&self, value: &T) -> Option<Temporal<T>> {
        self.minus_values(&Single(value))
    }

    /// The part of `self` whose values pass `restrictor`.
    pub fn at_values<R>(&self, restrictor: &R) -> Option<Temporal<T>>
    where
        R: ValueRestrictor<T> + ?Sized,
    {
        tracing::trace!(ty = T::TEMPORAL_TYPE.name(), variant = self.variant_name(), "restricting to values");
        match self {
            Temporal::Instant(inst) => restrictor.contains(inst.value()).then(|| self.clone()),
            Temporal::DiscreteSeq(seq) => seq
                .filter_instants(|i| restrictor.contains(i.value()))
                .map(Temporal::DiscreteSeq),
            Temporal::ContinuousSeq(seq) => {
                TSequenceSet::from_restricted(seq.at_values(restrictor)).map(Temporal::SeqSet)
            }
            Temporal::SeqSet(ss) => {
                let pieces = ss.sequences().iter().flat_map(|s| s.at_values(restrictor));
                TSequenceSet::from_restricted(pieces).map(Temporal::SeqSet)
            }
        }
    }

    /// The part of `self` whose values do not pass `restrictor`.
    pub fn minus_values<R>(&self, restrictor: &R) -> Option<Temporal<T>>
    where
        R: ValueRestrictor<T> + ?Sized,
    {
        match self.at_values(restrictor) {
            Some(at) => self.minus_covered(&at.time()),
            None => self.restrict_time(&self.time()),
        }
    }

    /// The part of `self` where it takes its minimum value.
    pub fn at_min(&self) -> Option<Temporal<T>> {
        self.at_value(&self.min_value())
    }

    pub fn at_max(&self) -> Option<Temporal<T>> {
        self.at_value(&self.max_value())
    }

    pub fn minus_min(&self) -> Option<Temporal<T>> {
        self.minus_value(&self.min_value())
    }

    pub fn minus_max(&self) -> Option<Temporal<T>> {
        self.minus_value(&self.max_value())
    }

    /// Re-slices `self` against its time minus `covered`.
    fn minus_covered(&self, covered: &PeriodSet) -> Option<Temporal<T>> {
        let rest = self.time().minus(covered)?;
        self.restrict_time(&rest)
    }

    pub(crate) fn restrict_time(&self, periods: &PeriodSet) -> Option<Temporal<T>> {
        tracing::trace!(ty = T::TEMPORAL_TYPE.name(), variant = self.variant_name(), "restricting to time");
        match self {
            Temporal::Instant(inst) => periods.contains_value(inst.timestamp()).then(|| self.clone()),
            Temporal::DiscreteSeq(seq) => seq
                .filter_instants(|i| periods.contains_value(i.timestamp()))
                .map(Temporal::DiscreteSeq),
            Temporal::ContinuousSeq(seq) => {
                TSequenceSet::from_restricted(seq.at_periodset(periods)).map(Temporal::SeqSet)
            }
            Temporal::SeqSet(ss) => {
                let pieces = ss.sequences().iter().flat_map(|s| s.at_periodset(periods));
                TSequenceSet::from_restricted(pieces).map(Temporal::SeqSet)
            }
        }
    }
}
