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

//! Merging temporal values with disjoint or agreeing time.

use crate::instant::TInstant;
use crate::interpolation::Interpolation;
use crate::sequence::TSequence;
use crate::sequenceset::{TSequenceSet, common_interpolation, unify};
use crate::temporal::Temporal;
use tidal_core::base::TemporalValue;
use tidal_core::err::{InvalidArgumentError, Result, TemporalMergeConflictError};

impl<T> Temporal<T>
where
    T: TemporalValue,
{
    /// Merges two temporal values into one defined over the union of their
    /// time. See [`Temporal::merge_all`].
    #[inline]
    pub fn merge(&self, other: &Temporal<T>) -> Result<Temporal<T>> {
        Self::merge_all([self, other])
    }

    /// Merges temporal values into one defined over the union of their time.
    ///
    /// Discrete inputs merge into an instant or a discrete sequence; as soon
    /// as one input is continuous the result is a sequence set, with
    /// sequences that meet at a shared timestamp joined.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgumentError`] if `items` is empty.
    /// - [`TemporalMergeConflictError`] if two inputs overlap in time and
    ///   disagree, or overlap on more than a single shared instant.
    /// - [`UnsupportedOperationError`](tidal_core::err::UnsupportedOperationError)
    ///   when mixing step and linear interpolation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_temporal::temporal::Temporal;
    /// let a: Temporal<i32> = "[1@2019-09-01, 2@2019-09-02]".parse().unwrap();
    /// let b: Temporal<i32> = "[2@2019-09-02, 5@2019-09-03]".parse().unwrap();
    /// let merged = a.merge(&b).unwrap();
    /// assert_eq!(merged, "[1@2019-09-01, 2@2019-09-02, 5@2019-09-03]".parse().unwrap());
    /// ```
    pub fn merge_all<'a, I>(items: I) -> Result<Temporal<T>>
    where
        I: IntoIterator<Item = &'a Temporal<T>>,
    {
        let items: Vec<&Temporal<T>> = items.into_iter().collect();
        if items.is_empty() {
            return Err(InvalidArgumentError::new("items", "nothing to merge").into());
        }
        tracing::trace!(count = items.len(), ty = T::TEMPORAL_TYPE.name(), "merging temporal values");
        if items.iter().all(|t| t.is_discrete()) {
            merge_discrete(&items)
        } else {
            merge_continuous(&items)
        }
    }

    /// Appends `instant` at or after the end of `self`, extending the last
    /// sequence of a continuous value.
    ///
    /// # Errors
    ///
    /// [`InvalidArgumentError`] if `instant` lies before the end of `self`;
    /// the merge errors when it lies at the end with another value.
    pub fn append_instant(&self, instant: TInstant<T>) -> Result<Temporal<T>> {
        let end = self.end_timestamp();
        if instant.timestamp() < end {
            return Err(InvalidArgumentError::new("instant", "the appended instant precedes the end of the value").into());
        }
        if instant.timestamp() == end {
            return self.merge(&Temporal::Instant(instant));
        }
        Ok(match self {
            Temporal::Instant(_) | Temporal::DiscreteSeq(_) => {
                let mut instants: Vec<TInstant<T>> = self.instants().into_iter().cloned().collect();
                instants.push(instant);
                Temporal::DiscreteSeq(TSequence::build(instants, true, true, Interpolation::Discrete, false))
            }
            Temporal::ContinuousSeq(s) => Temporal::ContinuousSeq(extend(s, instant)),
            Temporal::SeqSet(ss) => {
                let mut sequences = ss.sequences().to_vec();
                if let Some(last) = sequences.pop() {
                    sequences.push(extend(&last, instant));
                }
                Temporal::SeqSet(TSequenceSet::from_sequences_unchecked(sequences))
            }
        })
    }

    /// Appends a sequence starting at or after the end of `self`.
    ///
    /// # Errors
    ///
    /// [`InvalidArgumentError`] if `sequence` starts before the end of
    /// `self`, otherwise as [`Temporal::merge`].
    pub fn append_sequence(&self, sequence: TSequence<T>) -> Result<Temporal<T>> {
        if sequence.start_timestamp() < self.end_timestamp() {
            return Err(
                InvalidArgumentError::new("sequence", "the appended sequence starts before the end of the value").into(),
            );
        }
        self.merge(&Temporal::from(sequence))
    }
}

fn extend<T: TemporalValue>(seq: &TSequence<T>, instant: TInstant<T>) -> TSequence<T> {
    let mut instants = seq.instants().to_vec();
    instants.push(instant);
    TSequence::build(instants, seq.lower_inc(), true, seq.interpolation(), true)
}

fn merge_discrete<T: TemporalValue>(items: &[&Temporal<T>]) -> Result<Temporal<T>> {
    let mut instants: Vec<TInstant<T>> = items.iter().flat_map(|t| t.instants()).cloned().collect();
    instants.sort_by_key(TInstant::timestamp);
    let mut merged: Vec<TInstant<T>> = Vec::with_capacity(instants.len());
    for inst in instants {
        match merged.last() {
            Some(last) if last.timestamp() == inst.timestamp() => {
                if !last.value().approx_eq(inst.value()) {
                    tracing::debug!(timestamp = %inst.timestamp(), "conflicting instants in merge");
                    return Err(TemporalMergeConflictError {
                        timestamp: inst.timestamp(),
                    }
                    .into());
                }
            }
            _ => merged.push(inst),
        }
    }
    if merged.len() == 1 {
        return Ok(Temporal::Instant(merged.swap_remove(0)));
    }
    Ok(Temporal::DiscreteSeq(TSequence::build(
        merged,
        true,
        true,
        Interpolation::Discrete,
        false,
    )))
}

fn merge_continuous<T: TemporalValue>(items: &[&Temporal<T>]) -> Result<Temporal<T>> {
    let default = Interpolation::default_for::<T>();
    let mut sequences: Vec<TSequence<T>> = Vec::new();
    for item in items {
        match item {
            Temporal::ContinuousSeq(s) => sequences.push(s.clone()),
            Temporal::SeqSet(ss) => sequences.extend_from_slice(ss.sequences()),
            _ => sequences.extend(
                item.instants()
                    .into_iter()
                    .map(|i| TSequence::from_instant(i.clone(), default)),
            ),
        }
    }
    let interpolation = common_interpolation(&sequences)?;
    let mut sequences = unify(sequences, interpolation);
    sequences.sort_by_key(TSequence::period);

    let mut merged: Vec<TSequence<T>> = Vec::with_capacity(sequences.len());
    for seq in sequences {
        let Some(last) = merged.last_mut() else {
            merged.push(seq);
            continue;
        };
        if let Some(joined) = last.try_join(&seq) {
            *last = joined;
            continue;
        }
        if last.period().overlaps(&seq.period()) {
            let timestamp = seq.start_timestamp();
            tracing::debug!(%timestamp, "overlapping sequences in merge");
            return Err(TemporalMergeConflictError { timestamp }.into());
        }
        merged.push(seq);
    }
    Ok(Temporal::SeqSet(TSequenceSet::from_sequences_unchecked(merged)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidal_core::base::Timestamp;
    use tidal_core::err::Error;

    fn ti(s: &str) -> Temporal<i32> {
        s.parse().unwrap()
    }

    fn tf(s: &str) -> Temporal<f64> {
        s.parse().unwrap()
    }

    fn t(day: u32) -> Timestamp {
        Timestamp::from_ymd(2019, 9, day).unwrap()
    }

    #[test]
    fn test_merge_instants() {
        let merged = ti("1@2019-09-01").merge(&ti("2@2019-09-02")).unwrap();
        assert!(matches!(merged, Temporal::DiscreteSeq(_)));
        assert_eq!(merged, ti("{1@2019-09-01, 2@2019-09-02}"));
        let same = ti("1@2019-09-01").merge(&ti("1@2019-09-01")).unwrap();
        assert!(matches!(same, Temporal::Instant(_)));
    }

    #[test]
    fn test_merge_conflicting_instants() {
        let err = ti("{1@2019-09-01, 2@2019-09-02}").merge(&ti("3@2019-09-02")).unwrap_err();
        assert_eq!(err, Error::TemporalMergeConflict(TemporalMergeConflictError { timestamp: t(2) }));
    }

    #[test]
    fn test_merge_sequences_with_gap() {
        let merged = tf("[1@2019-09-01, 2@2019-09-02]")
            .merge(&tf("[3@2019-09-04, 4@2019-09-05]"))
            .unwrap();
        assert!(matches!(merged, Temporal::SeqSet(_)));
        assert_eq!(merged.num_sequences().unwrap(), 2);
    }

    #[test]
    fn test_merge_overlapping_sequences_conflict() {
        let err = tf("[1@2019-09-01, 2@2019-09-03]")
            .merge(&tf("[3@2019-09-02, 4@2019-09-05]"))
            .unwrap_err();
        assert!(matches!(err, Error::TemporalMergeConflict(_)));
    }

    #[test]
    fn test_merge_mixed_interpolations() {
        let step = tf("Interp=Step;[1@2019-09-01, 2@2019-09-02]");
        let linear = tf("[3@2019-09-04, 4@2019-09-05]");
        assert!(matches!(step.merge(&linear), Err(Error::UnsupportedOperation(_))));
    }

    #[test]
    fn test_merge_discrete_with_continuous() {
        let merged = ti("{1@2019-09-05}").merge(&ti("[1@2019-09-01, 2@2019-09-02)")).unwrap();
        assert_eq!(merged.num_sequences().unwrap(), 2);
        assert_eq!(merged.value_at_timestamp(t(5)).unwrap(), 1);
    }

    #[test]
    fn test_merge_all_is_order_independent() {
        let a = ti("[1@2019-09-01, 2@2019-09-02)");
        let b = ti("[2@2019-09-02, 3@2019-09-03)");
        let c = ti("[3@2019-09-03, 3@2019-09-04]");
        let forward = Temporal::merge_all([&a, &b, &c]).unwrap();
        let backward = Temporal::merge_all([&c, &a, &b]).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.num_sequences().unwrap(), 1);
        assert!(matches!(
            Temporal::<i32>::merge_all(std::iter::empty::<&Temporal<i32>>()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_append_instant() {
        let x = tf("[1@2019-09-01, 2@2019-09-02]");
        let appended = x.append_instant(TInstant::new(4.0, t(4))).unwrap();
        assert_eq!(appended, tf("[1@2019-09-01, 2@2019-09-02, 4@2019-09-04]"));
        assert!(x.append_instant(TInstant::new(4.0, t(1))).is_err());
        let same = x.append_instant(TInstant::new(2.0, t(2))).unwrap();
        assert_eq!(same, x);

        let disc = ti("{1@2019-09-01}").append_instant(TInstant::new(2, t(3))).unwrap();
        assert_eq!(disc, ti("{1@2019-09-01, 2@2019-09-03}"));
    }

    #[test]
    fn test_append_sequence() {
        let x = ti("[1@2019-09-01, 2@2019-09-02]");
        let seq = TSequence::continuous(vec![TInstant::new(5, t(4)), TInstant::new(6, t(5))], true, true).unwrap();
        let appended = x.append_sequence(seq).unwrap();
        assert_eq!(appended.num_sequences().unwrap(), 2);
        let early = TSequence::continuous(vec![TInstant::new(5, t(1))], true, true).unwrap();
        assert!(matches!(x.append_sequence(early), Err(Error::InvalidArgument(_))));
    }
}
