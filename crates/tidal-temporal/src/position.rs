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

//! Position predicates on the time dimension.

use crate::restrict::TimeRestrictor;
use crate::temporal::Temporal;
use crate::{Period, PeriodSet, TimestampSet};
use tidal_collections::span::Extent;
use tidal_core::base::{TemporalValue, Timestamp};

impl<T> Extent<Timestamp> for Temporal<T>
where
    T: TemporalValue,
{
    #[inline]
    fn extent(&self) -> Option<Period> {
        Some(self.timespan())
    }
}

/// Anything occupying time: timestamps, time collections and temporal
/// values.
pub trait TimeExtent {
    /// The exact time occupied, as a period set.
    fn time_extent(&self) -> PeriodSet;
}

impl<T> TimeExtent for Temporal<T>
where
    T: TemporalValue,
{
    #[inline]
    fn time_extent(&self) -> PeriodSet {
        self.time()
    }
}

macro_rules! impl_time_extent {
    ($($ty:ty),*) => {
        $(
            impl TimeExtent for $ty {
                #[inline]
                fn time_extent(&self) -> PeriodSet {
                    TimeRestrictor::from(self.clone()).to_periodset()
                }
            }
        )*
    };
}

impl_time_extent!(Timestamp, TimestampSet, Period, PeriodSet);

impl<T> Temporal<T>
where
    T: TemporalValue,
{
    /// `true` if `self` ends before `other` starts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_temporal::temporal::Temporal;
    /// # use tidal_temporal::Period;
    /// let x: Temporal<i32> = "[1@2019-09-01, 2@2019-09-02)".parse().unwrap();
    /// let p: Period = "[2019-09-02, 2019-09-03]".parse().unwrap();
    /// assert!(x.is_before(&p));
    /// ```
    #[inline]
    pub fn is_before<E: Extent<Timestamp> + ?Sized>(&self, other: &E) -> bool {
        self.timespan().is_left(other)
    }

    /// `true` if `self` does not extend after `other`.
    #[inline]
    pub fn is_over_or_before<E: Extent<Timestamp> + ?Sized>(&self, other: &E) -> bool {
        self.timespan().is_over_or_left(other)
    }

    /// `true` if `self` starts after `other` ends.
    #[inline]
    pub fn is_after<E: Extent<Timestamp> + ?Sized>(&self, other: &E) -> bool {
        self.timespan().is_right(other)
    }

    /// `true` if `self` does not extend before `other`.
    #[inline]
    pub fn is_over_or_after<E: Extent<Timestamp> + ?Sized>(&self, other: &E) -> bool {
        self.timespan().is_over_or_right(other)
    }

    /// `true` if the time of `self` and `other` share a timestamp.
    pub fn temporally_overlaps<E: TimeExtent + ?Sized>(&self, other: &E) -> bool {
        self.time().overlaps(&other.time_extent())
    }

    /// `true` if the time of `other` lies within the time of `self`.
    pub fn temporally_contains<E: TimeExtent + ?Sized>(&self, other: &E) -> bool {
        self.time().contains_spanset(&other.time_extent())
    }

    /// `true` if the times touch without sharing a timestamp.
    pub fn is_temporally_adjacent<E: TimeExtent + ?Sized>(&self, other: &E) -> bool {
        self.time().is_adjacent(&other.time_extent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ti(s: &str) -> Temporal<i32> {
        s.parse().unwrap()
    }

    fn period(s: &str) -> Period {
        s.parse().unwrap()
    }

    fn t(day: u32) -> Timestamp {
        Timestamp::from_ymd(2019, 9, day).unwrap()
    }

    #[test]
    fn test_before_and_after() {
        let x = ti("[1@2019-09-01, 2@2019-09-03]");
        let y = ti("{5@2019-09-04, 6@2019-09-05}");
        assert!(x.is_before(&y));
        assert!(y.is_after(&x));
        assert!(!x.is_after(&y));
        assert!(x.is_over_or_before(&period("[2019-09-02, 2019-09-03]")));
        assert!(!x.is_over_or_before(&period("[2019-09-02, 2019-09-03)")));
        assert!(y.is_over_or_after(&period("[2019-09-01, 2019-09-04]")));
    }

    #[test]
    fn test_overlap_and_containment() {
        let x = ti("{[1@2019-09-01, 2@2019-09-03], [3@2019-09-05, 3@2019-09-06]}");
        assert!(x.temporally_overlaps(&t(2)));
        assert!(!x.temporally_overlaps(&t(4)));
        assert!(x.temporally_contains(&period("[2019-09-01, 2019-09-02]")));
        assert!(!x.temporally_contains(&period("[2019-09-02, 2019-09-05]")));
        let y = ti("[7@2019-09-04, 8@2019-09-07]");
        assert!(x.temporally_overlaps(&y));
        assert!(!y.temporally_contains(&x));
    }

    #[test]
    fn test_adjacency() {
        let x = ti("[1@2019-09-01, 2@2019-09-03)");
        assert!(x.is_temporally_adjacent(&ti("[2@2019-09-03, 4@2019-09-04]")));
        assert!(!x.is_temporally_adjacent(&ti("[2@2019-09-02, 4@2019-09-04]")));
        assert!(x.is_temporally_adjacent(&period("[2019-09-03, 2019-09-04]")));
    }
}
