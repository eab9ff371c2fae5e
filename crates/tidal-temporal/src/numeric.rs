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

//! Aggregates of int and float temporal values.

use crate::interpolation::Interpolation;
use crate::sequence::TSequence;
use crate::temporal::Temporal;
use tidal_collections::span::Span;
use tidal_core::base::NumericValue;
use tidal_core::err::Result;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

fn sequence_integral<T: NumericValue>(seq: &TSequence<T>) -> f64 {
    seq.instants()
        .windows(2)
        .map(|w| {
            let seconds = (w[1].timestamp().micros() - w[0].timestamp().micros()) as f64 / MICROS_PER_SECOND;
            let (a, b) = (w[0].value().to_f64(), w[1].value().to_f64());
            match seq.interpolation() {
                Interpolation::Linear => (a + b) / 2.0 * seconds,
                _ => a * seconds,
            }
        })
        .sum()
}

impl<T> Temporal<T>
where
    T: NumericValue,
{
    /// The smallest span holding every value.
    pub fn value_span(&self) -> Result<Span<T>> {
        Span::new(self.min_value(), self.max_value(), true, true)
    }

    /// The area under the value, with time in seconds. Discrete values
    /// have no area.
    pub fn integral(&self) -> f64 {
        match self {
            Temporal::Instant(_) | Temporal::DiscreteSeq(_) => 0.0,
            Temporal::ContinuousSeq(s) => sequence_integral(s),
            Temporal::SeqSet(ss) => ss.sequences().iter().map(sequence_integral).sum(),
        }
    }

    /// The time-weighted average of the value.
    ///
    /// Discrete and instantaneous values weigh every instant equally.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_temporal::temporal::Temporal;
    /// let x: Temporal<f64> = "[0@2019-09-01, 10@2019-09-02]".parse().unwrap();
    /// assert_eq!(x.time_weighted_average(), 5.0);
    /// ```
    pub fn time_weighted_average(&self) -> f64 {
        let seconds = self.duration(false).num_microseconds().unwrap_or(i64::MAX) as f64 / MICROS_PER_SECOND;
        if self.is_discrete() || seconds == 0.0 {
            let instants = self.instants();
            let total: f64 = instants.iter().map(|i| i.value().to_f64()).sum();
            return total / instants.len() as f64;
        }
        self.integral() / seconds
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
    fn test_value_span() {
        assert_eq!(
            tf("[3@2019-09-01, 1@2019-09-02, 2@2019-09-03]").value_span().unwrap().to_string(),
            "[1, 3]"
        );
        assert_eq!(ti("{3@2019-09-01, 1@2019-09-02}").value_span().unwrap().to_string(), "[1, 4)");
    }

    #[test]
    fn test_integral() {
        assert_eq!(ti("{3@2019-09-01, 1@2019-09-02}").integral(), 0.0);
        assert_eq!(ti("[2@2019-09-01 00:00:00, 4@2019-09-01 00:00:10]").integral(), 20.0);
        assert_eq!(tf("[2@2019-09-01 00:00:00, 4@2019-09-01 00:00:10]").integral(), 30.0);
        let set = tf("{[1@2019-09-01 00:00:00, 1@2019-09-01 00:00:10], [3@2019-09-02 00:00:00, 3@2019-09-02 00:00:10]}");
        assert_eq!(set.integral(), 40.0);
    }

    #[test]
    fn test_time_weighted_average() {
        assert_eq!(ti("{2@2019-09-01, 4@2019-09-02}").time_weighted_average(), 3.0);
        assert_eq!(ti("[2@2019-09-01, 4@2019-09-02, 4@2019-09-04]").time_weighted_average(), 10.0 / 3.0);
        let set = tf("{[1@2019-09-01 00:00:00, 1@2019-09-01 00:00:10], [3@2019-09-02 00:00:00, 3@2019-09-02 00:00:30]}");
        assert_eq!(set.time_weighted_average(), 100.0 / 40.0);
        assert_eq!(tf("{[1@2019-09-01], [3@2019-09-02]}").time_weighted_average(), 2.0);
    }
}
