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

//! Ever and always comparisons of a temporal value with a base value.

use crate::instant::TInstant;
use crate::interpolation::Interpolation;
use crate::sequence::TSequence;
use crate::temporal::Temporal;
use std::cmp::Ordering;
use tidal_core::base::{BaseValue, OrderedValue, TemporalValue};

/// Which values satisfy an order comparison with the operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Below,
    AtOrBelow,
    AtOrAbove,
    Above,
}

impl Side {
    #[inline]
    fn admits(self, ord: Ordering) -> bool {
        match self {
            Side::Below => ord == Ordering::Less,
            Side::AtOrBelow => ord != Ordering::Greater,
            Side::AtOrAbove => ord != Ordering::Less,
            Side::Above => ord == Ordering::Greater,
        }
    }

    /// Whether a value strictly between `lo < hi` admits against `operand`.
    #[inline]
    fn admits_between<T: BaseValue>(self, lo: &T, hi: &T, operand: &T) -> bool {
        match self {
            Side::Below | Side::AtOrBelow => lo.is_less(operand),
            Side::AtOrAbove | Side::Above => operand.is_less(hi),
        }
    }
}

fn sequence_ever<T: OrderedValue>(seq: &TSequence<T>, operand: &T, side: Side) -> bool {
    let instants = seq.instants();
    let n = instants.len();
    let admits = |i: &TInstant<T>| side.admits(i.value().compare(operand));
    match seq.interpolation() {
        Interpolation::Linear if n > 1 => {
            let at_instant = instants.iter().enumerate().any(|(k, i)| {
                let excluded = (k == 0 && !seq.lower_inc()) || (k == n - 1 && !seq.upper_inc());
                !excluded && admits(i)
            });
            at_instant
                || instants.windows(2).any(|w| {
                    let (a, b) = (w[0].value(), w[1].value());
                    match a.compare(b) {
                        Ordering::Equal => admits(&w[0]),
                        Ordering::Less => side.admits_between(a, b, operand),
                        Ordering::Greater => side.admits_between(b, a, operand),
                    }
                })
        }
        // The excluded end of a step sequence repeats the previous value.
        Interpolation::Step if n > 1 && !seq.upper_inc() => instants[..n - 1].iter().any(admits),
        _ => instants.iter().any(admits),
    }
}

impl<T> Temporal<T>
where
    T: TemporalValue,
{
    /// Returns `true` if the value equals `value` at some time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_temporal::temporal::Temporal;
    /// let x: Temporal<f64> = "[0@2019-09-01, 10@2019-09-03]".parse().unwrap();
    /// assert!(x.ever_eq(&5.0));
    /// assert!(!x.always_eq(&5.0));
    /// ```
    #[inline]
    pub fn ever_eq(&self, value: &T) -> bool {
        self.at_value(value).is_some()
    }

    /// Returns `true` if the value equals `value` at every time.
    #[inline]
    pub fn always_eq(&self, value: &T) -> bool {
        self.minus_value(value).is_none()
    }

    #[inline]
    pub fn ever_ne(&self, value: &T) -> bool {
        !self.always_eq(value)
    }

    #[inline]
    pub fn always_ne(&self, value: &T) -> bool {
        !self.ever_eq(value)
    }
}

impl<T> Temporal<T>
where
    T: OrderedValue,
{
    /// Returns `true` if some value taken satisfies `side` against `operand`.
    /// Linear segments take every value strictly between their ends.
    fn ever(&self, operand: &T, side: Side) -> bool {
        match self {
            Temporal::Instant(i) => side.admits(i.value().compare(operand)),
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => sequence_ever(s, operand, side),
            Temporal::SeqSet(ss) => ss.sequences().iter().any(|s| sequence_ever(s, operand, side)),
        }
    }

    /// Returns `true` if the value is below `value` at some time.
    ///
    /// An excluded bound is never taken, but the values of a linear segment
    /// next to it are.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_temporal::temporal::Temporal;
    /// let x: Temporal<f64> = "(1@2019-09-01, 5@2019-09-03]".parse().unwrap();
    /// assert!(x.ever_lt(&1.5));
    /// assert!(!x.ever_le(&1.0));
    /// assert!(x.always_gt(&1.0));
    /// ```
    #[inline]
    pub fn ever_lt(&self, value: &T) -> bool {
        self.ever(value, Side::Below)
    }

    #[inline]
    pub fn ever_le(&self, value: &T) -> bool {
        self.ever(value, Side::AtOrBelow)
    }

    #[inline]
    pub fn ever_gt(&self, value: &T) -> bool {
        self.ever(value, Side::Above)
    }

    #[inline]
    pub fn ever_ge(&self, value: &T) -> bool {
        self.ever(value, Side::AtOrAbove)
    }

    #[inline]
    pub fn always_lt(&self, value: &T) -> bool {
        !self.ever_ge(value)
    }

    #[inline]
    pub fn always_le(&self, value: &T) -> bool {
        !self.ever_gt(value)
    }

    #[inline]
    pub fn always_gt(&self, value: &T) -> bool {
        !self.ever_le(value)
    }

    #[inline]
    pub fn always_ge(&self, value: &T) -> bool {
        !self.ever_lt(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tf(s: &str) -> Temporal<f64> {
        s.parse().unwrap()
    }

    fn ti(s: &str) -> Temporal<i32> {
        s.parse().unwrap()
    }

    #[test]
    fn test_ever_always_eq() {
        let x = tf("[0@2019-09-01, 10@2019-09-03]");
        assert!(x.ever_eq(&5.0));
        assert!(x.ever_eq(&10.0));
        assert!(!x.ever_eq(&11.0));
        assert!(x.ever_ne(&5.0));
        assert!(x.always_ne(&11.0));
        assert!(tf("[3@2019-09-01, 3@2019-09-03)").always_eq(&3.0));
        assert!(!tf("[0@2019-09-01, 10@2019-09-03)").ever_eq(&10.0));
        assert!(ti("{1@2019-09-01, 2@2019-09-02}").ever_eq(&2));
        let b: Temporal<bool> = "[t@2019-09-01, t@2019-09-02]".parse().unwrap();
        assert!(b.always_eq(&true));
        assert!(!b.ever_eq(&false));
    }

    #[test]
    fn test_linear_order_comparisons() {
        let x = tf("(1@2019-09-01, 5@2019-09-03]");
        assert!(x.ever_lt(&1.5));
        assert!(!x.ever_lt(&1.0));
        assert!(!x.ever_le(&1.0));
        assert!(x.always_gt(&1.0));
        assert!(x.ever_ge(&5.0));
        assert!(x.always_le(&5.0));
        assert!(!x.always_lt(&5.0));
        let peak = tf("[1@2019-09-01, 5@2019-09-02, 1@2019-09-03)");
        assert!(peak.ever_gt(&4.0));
        assert!(peak.always_ge(&1.0));
        assert!(peak.ever_le(&1.0));
    }

    #[test]
    fn test_step_order_comparisons() {
        let x = ti("[1@2019-09-01, 4@2019-09-02, 9@2019-09-03)");
        assert!(x.ever_ge(&4));
        assert!(!x.ever_ge(&5));
        assert!(x.always_lt(&5));
        assert!(x.ever_le(&1));
        let s = ti("{[2@2019-09-01, 2@2019-09-02], [7@2019-09-05]}");
        assert!(s.ever_gt(&6));
        assert!(s.always_ge(&2));
        assert!(!s.always_gt(&2));
    }

    #[test]
    fn test_text_order_comparisons() {
        let x: Temporal<String> = "[b@2019-09-01, d@2019-09-02]".parse().unwrap();
        assert!(x.ever_lt(&"c".to_string()));
        assert!(x.always_ge(&"b".to_string()));
        assert!(x.ever_eq(&"d".to_string()));
        assert!(!x.ever_eq(&"c".to_string()));
    }
}
