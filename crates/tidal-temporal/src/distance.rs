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

//! Distances between int and float temporal values.
//!
//! Both operands are first reduced to their signed difference over the
//! common time, a float temporal value; the distance is its absolute value
//! with the instants where a linear difference changes sign added.

use crate::instant::TInstant;
use crate::interpolation::Interpolation;
use crate::sequence::TSequence;
use crate::sequenceset::TSequenceSet;
use crate::temporal::{Temporal, step_to_linear};
use tidal_core::base::{NumericValue, Timestamp};

fn offset_sequence<T: NumericValue>(seq: &TSequence<T>, offset: f64) -> TSequence<f64> {
    let instants = seq
        .instants()
        .iter()
        .map(|i| TInstant::new(i.value().to_f64() - offset, i.timestamp()))
        .collect();
    TSequence::build(instants, seq.lower_inc(), seq.upper_inc(), seq.interpolation(), false)
}

/// `x - offset`, keeping the shape of `x`.
fn shifted<T: NumericValue>(x: &Temporal<T>, offset: f64) -> Temporal<f64> {
    match x {
        Temporal::Instant(i) => Temporal::Instant(TInstant::new(i.value().to_f64() - offset, i.timestamp())),
        Temporal::DiscreteSeq(s) => Temporal::DiscreteSeq(offset_sequence(s, offset)),
        Temporal::ContinuousSeq(s) => Temporal::ContinuousSeq(offset_sequence(s, offset)),
        Temporal::SeqSet(ss) => Temporal::SeqSet(TSequenceSet::from_sequences_unchecked(
            ss.sequences().iter().map(|s| offset_sequence(s, offset)).collect(),
        )),
    }
}

/// The continuous sequences of `x`, step ones split into constant linear
/// pieces when `linear` is set.
fn continuous_pieces<T: NumericValue>(x: &Temporal<T>, linear: bool) -> Vec<TSequence<T>> {
    let ss = x.to_sequence_set();
    ss.sequences()
        .iter()
        .flat_map(|s| {
            if linear && s.interpolation() == Interpolation::Step {
                step_to_linear(s)
            } else {
                vec![s.clone()]
            }
        })
        .collect()
}

/// `a - b` for two sequences over the same period and interpolation.
fn synchronized_difference<T: NumericValue>(a: &TSequence<T>, b: &TSequence<T>) -> TSequence<f64> {
    let mut timestamps: Vec<Timestamp> = a
        .instants()
        .iter()
        .chain(b.instants())
        .map(TInstant::timestamp)
        .collect();
    timestamps.sort_unstable();
    timestamps.dedup();
    let instants = timestamps
        .into_iter()
        .map(|t| TInstant::new(a.value_at_unchecked(t).to_f64() - b.value_at_unchecked(t).to_f64(), t))
        .collect();
    TSequence::build(instants, a.lower_inc(), a.upper_inc(), a.interpolation(), true)
}

/// `x - y` over the time both are defined; `None` if they never meet.
fn difference<T: NumericValue>(x: &Temporal<T>, y: &Temporal<T>) -> Option<Temporal<f64>> {
    if x.is_discrete() || y.is_discrete() {
        let (sampled, other, sign) = if x.is_discrete() { (x, y, 1.0) } else { (y, x, -1.0) };
        let mut instants: Vec<TInstant<f64>> = sampled
            .instants()
            .into_iter()
            .filter_map(|i| {
                let w = other.value_at_timestamp(i.timestamp()).ok()?;
                Some(TInstant::new(sign * (i.value().to_f64() - w.to_f64()), i.timestamp()))
            })
            .collect();
        return match instants.len() {
            0 => None,
            1 => Some(Temporal::Instant(instants.swap_remove(0))),
            _ => Some(Temporal::DiscreteSeq(TSequence::build(
                instants,
                true,
                true,
                Interpolation::Discrete,
                false,
            ))),
        };
    }

    let linear = x.interpolation() == Interpolation::Linear || y.interpolation() == Interpolation::Linear;
    let (xs, ys) = (continuous_pieces(x, linear), continuous_pieces(y, linear));
    let mut pieces = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < xs.len() && j < ys.len() {
        let (a, b) = (&xs[i], &ys[j]);
        if let Some(common) = a.period().intersection(&b.period()).collection() {
            if let (Some(a), Some(b)) = (a.at_period(&common), b.at_period(&common)) {
                pieces.push(synchronized_difference(&a, &b));
            }
        }
        if (a.end_timestamp(), a.upper_inc()) <= (b.end_timestamp(), b.upper_inc()) {
            i += 1;
        } else {
            j += 1;
        }
    }
    TSequenceSet::from_restricted(pieces).map(Temporal::SeqSet)
}

fn absolute_sequence(seq: &TSequence<f64>) -> TSequence<f64> {
    let src = seq.instants();
    let linear = seq.interpolation() == Interpolation::Linear;
    let mut instants = Vec::with_capacity(src.len() * 2);
    for (k, inst) in src.iter().enumerate() {
        if linear && k > 0 {
            let prev = &src[k - 1];
            let (a, b) = (*prev.value(), *inst.value());
            if a * b < 0.0 {
                let cut = Timestamp::lerp(prev.timestamp(), inst.timestamp(), a / (a - b));
                if cut > prev.timestamp() && cut < inst.timestamp() {
                    instants.push(TInstant::new(seq.value_at_unchecked(cut).abs(), cut));
                }
            }
        }
        instants.push(TInstant::new(inst.value().abs(), inst.timestamp()));
    }
    TSequence::build(
        instants,
        seq.lower_inc(),
        seq.upper_inc(),
        seq.interpolation(),
        seq.interpolation().is_continuous(),
    )
}

fn absolute(x: &Temporal<f64>) -> Temporal<f64> {
    match x {
        Temporal::Instant(i) => Temporal::Instant(TInstant::new(i.value().abs(), i.timestamp())),
        Temporal::DiscreteSeq(s) => Temporal::DiscreteSeq(absolute_sequence(s)),
        Temporal::ContinuousSeq(s) => Temporal::ContinuousSeq(absolute_sequence(s)),
        Temporal::SeqSet(ss) => Temporal::SeqSet(TSequenceSet::from_sequences_unchecked(
            ss.sequences().iter().map(absolute_sequence).collect(),
        )),
    }
}

/// The infimum of `|d|` over a sequence. Excluded bounds still count.
fn closest_to_zero(seq: &TSequence<f64>) -> f64 {
    let instants = seq.instants();
    if seq.interpolation() == Interpolation::Linear
        && instants.windows(2).any(|w| w[0].value() * w[1].value() <= 0.0)
    {
        return 0.0;
    }
    instants.iter().map(|i| i.value().abs()).fold(f64::INFINITY, f64::min)
}

fn closest_to_zero_overall(d: &Temporal<f64>) -> f64 {
    match d {
        Temporal::Instant(i) => i.value().abs(),
        Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => closest_to_zero(s),
        Temporal::SeqSet(ss) => ss.sequences().iter().map(closest_to_zero).fold(f64::INFINITY, f64::min),
    }
}

impl<T> Temporal<T>
where
    T: NumericValue,
{
    /// The distance `|self - value|` as a float temporal value.
    ///
    /// Where a linear value passes through `value`, an instant is added at
    /// the crossing, rounded to the microsecond.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_temporal::temporal::Temporal;
    /// let x: Temporal<f64> = "[0@2019-09-01, 10@2019-09-03]".parse().unwrap();
    /// let d = x.distance(&5.0);
    /// assert_eq!(d.to_string(), "[5@2019-09-01 00:00:00+00, 0@2019-09-02 00:00:00+00, 5@2019-09-03 00:00:00+00]");
    /// ```
    pub fn distance(&self, value: &T) -> Temporal<f64> {
        absolute(&shifted(self, value.to_f64()))
    }

    /// The distance `|self - other|` over the time both are defined.
    ///
    /// A step operand meeting a linear one is split into constant pieces.
    /// `None` if the operands share no time.
    pub fn distance_temporal(&self, other: &Temporal<T>) -> Option<Temporal<f64>> {
        difference(self, other).map(|d| absolute(&d))
    }

    /// The smallest distance to `value` ever reached, as an infimum.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_temporal::temporal::Temporal;
    /// let x: Temporal<f64> = "[1@2019-09-01, 3@2019-09-03)".parse().unwrap();
    /// assert_eq!(x.nearest_approach_distance(&2.5), 0.0);
    /// assert_eq!(x.nearest_approach_distance(&5.0), 2.0);
    /// ```
    pub fn nearest_approach_distance(&self, value: &T) -> f64 {
        closest_to_zero_overall(&shifted(self, value.to_f64()))
    }

    /// The smallest distance to `other` over the time both are defined;
    /// `None` if the operands share no time.
    pub fn nearest_approach_distance_temporal(&self, other: &Temporal<T>) -> Option<f64> {
        difference(self, other).map(|d| closest_to_zero_overall(&d))
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
    fn test_distance_to_value() {
        let x = tf("[0@2019-09-01, 10@2019-09-03]");
        assert_eq!(x.distance(&5.0), tf("[5@2019-09-01, 0@2019-09-02, 5@2019-09-03]"));
        assert_eq!(x.distance(&-1.0), tf("[1@2019-09-01, 11@2019-09-03]"));
        let steps = ti("[1@2019-09-01, 4@2019-09-02, 4@2019-09-03]");
        assert_eq!(
            steps.distance(&2),
            tf("Interp=Step;[1@2019-09-01, 2@2019-09-02, 2@2019-09-03]")
        );
        assert_eq!(ti("{3@2019-09-01, 1@2019-09-02}").distance(&2), tf("{1@2019-09-01, 1@2019-09-02}"));
    }

    #[test]
    fn test_distance_between_temporals() {
        let x = tf("[0@2019-09-01, 10@2019-09-03]");
        let y = tf("[10@2019-09-02, 0@2019-09-04]");
        let d = x.distance_temporal(&y).unwrap();
        assert_eq!(d, tf("[5@2019-09-02, 0@2019-09-02 12:00:00, 5@2019-09-03]"));
        assert_eq!(x.nearest_approach_distance_temporal(&y), Some(0.0));
        let later = tf("[1@2019-09-05, 2@2019-09-06]");
        assert!(x.distance_temporal(&later).is_none());
        assert_eq!(x.nearest_approach_distance_temporal(&later), None);
    }

    #[test]
    fn test_distance_mixing_step_and_linear() {
        let x = tf("[0@2019-09-01, 4@2019-09-05]");
        let y = tf("Interp=Step;[1@2019-09-01, 3@2019-09-03, 3@2019-09-05]");
        let d = x.distance_temporal(&y).unwrap();
        let at = |day| d.value_at_timestamp(Timestamp::from_ymd(2019, 9, day).unwrap()).unwrap();
        assert_eq!(at(2), 0.0);
        assert_eq!(at(3), 1.0);
        assert_eq!(at(4), 0.0);
        assert_eq!(at(5), 1.0);
        assert_eq!(d.timespan(), x.timespan());
        assert_eq!(x.nearest_approach_distance_temporal(&y), Some(0.0));
    }

    #[test]
    fn test_distance_with_discrete() {
        let x = tf("[0@2019-09-01, 10@2019-09-03]");
        let samples = tf("{1@2019-09-01, 7@2019-09-02, 9@2019-09-05}");
        assert_eq!(samples.distance_temporal(&x), Some(tf("{1@2019-09-01, 2@2019-09-02}")));
        assert_eq!(x.distance_temporal(&samples), Some(tf("{1@2019-09-01, 2@2019-09-02}")));
        assert_eq!(x.nearest_approach_distance_temporal(&samples), Some(1.0));
        assert_eq!(tf("3@2019-09-02").distance_temporal(&x), Some(tf("2@2019-09-02")));
    }

    #[test]
    fn test_nearest_approach_distance() {
        let x = tf("(1@2019-09-01, 3@2019-09-03)");
        assert_eq!(x.nearest_approach_distance(&1.0), 0.0);
        assert_eq!(x.nearest_approach_distance(&0.0), 1.0);
        assert_eq!(x.nearest_approach_distance(&5.0), 2.0);
        let steps = ti("{[1@2019-09-01, 1@2019-09-02], [6@2019-09-04]}");
        assert_eq!(steps.nearest_approach_distance(&4), 2.0);
        assert_eq!(steps.nearest_approach_distance(&1), 0.0);
    }
}
