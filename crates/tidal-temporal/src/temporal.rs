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

//! The temporal sum type and its accessors and transformations.

use crate::instant::TInstant;
use crate::interpolation::Interpolation;
use crate::sequence::TSequence;
use crate::sequenceset::TSequenceSet;
use crate::{Period, PeriodSet};
use chrono::TimeDelta;
use tidal_collections::set::Set;
use tidal_collections::span::Span;
use tidal_collections::spanset::SpanSet;
use tidal_core::base::{SetValue, TemporalValue, Timestamp};
use tidal_core::err::{IndexOutOfRangeError, Result, UnsupportedOperationError};

/// A value that varies over time.
///
/// | Variant | Defined at |
/// |---|---|
/// | `Instant` | one timestamp |
/// | `DiscreteSeq` | its instants only |
/// | `ContinuousSeq` | one period, step or linear |
/// | `SeqSet` | several periods with gaps |
///
/// Equality is semantic: two temporal values are equal when their simplest
/// representations agree, so a sequence set holding one sequence equals
/// that sequence.
#[derive(Debug, Clone)]
pub enum Temporal<T>
where
    T: TemporalValue,
{
    Instant(TInstant<T>),
    DiscreteSeq(TSequence<T>),
    ContinuousSeq(TSequence<T>),
    SeqSet(TSequenceSet<T>),
}

impl<T> From<TInstant<T>> for Temporal<T>
where
    T: TemporalValue,
{
    #[inline]
    fn from(inst: TInstant<T>) -> Self {
        Temporal::Instant(inst)
    }
}

impl<T> From<TSequence<T>> for Temporal<T>
where
    T: TemporalValue,
{
    #[inline]
    fn from(seq: TSequence<T>) -> Self {
        if seq.is_discrete() {
            Temporal::DiscreteSeq(seq)
        } else {
            Temporal::ContinuousSeq(seq)
        }
    }
}

impl<T> From<TSequenceSet<T>> for Temporal<T>
where
    T: TemporalValue,
{
    #[inline]
    fn from(ss: TSequenceSet<T>) -> Self {
        Temporal::SeqSet(ss)
    }
}

fn unsupported(operation: &'static str, reason: impl Into<String>) -> tidal_core::err::Error {
    UnsupportedOperationError::new(operation, reason).into()
}

impl<T> Temporal<T>
where
    T: TemporalValue,
{
    #[inline]
    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Temporal::Instant(_) => "Instant",
            Temporal::DiscreteSeq(_) => "DiscreteSequence",
            Temporal::ContinuousSeq(_) => "ContinuousSequence",
            Temporal::SeqSet(_) => "SequenceSet",
        }
    }

    /// `true` for instants and discrete sequences.
    #[inline]
    pub fn is_discrete(&self) -> bool {
        matches!(self, Temporal::Instant(_) | Temporal::DiscreteSeq(_))
    }

    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        match self {
            Temporal::Instant(_) => Interpolation::None,
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.interpolation(),
            Temporal::SeqSet(ss) => ss.interpolation(),
        }
    }

    /// Every instant, in time order.
    pub fn instants(&self) -> Vec<&TInstant<T>> {
        match self {
            Temporal::Instant(i) => vec![i],
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.instants().iter().collect(),
            Temporal::SeqSet(ss) => ss.instants().collect(),
        }
    }

    pub fn num_instants(&self) -> usize {
        match self {
            Temporal::Instant(_) => 1,
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.num_instants(),
            Temporal::SeqSet(ss) => ss.num_instants(),
        }
    }

    pub fn instant_n(&self, index: usize) -> Result<&TInstant<T>> {
        match self {
            Temporal::Instant(i) if index == 0 => Ok(i),
            Temporal::Instant(_) => Err(IndexOutOfRangeError::new("instant", index, 1).into()),
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.instant_n(index),
            Temporal::SeqSet(ss) => ss
                .instants()
                .nth(index)
                .ok_or_else(|| IndexOutOfRangeError::new("instant", index, ss.num_instants()).into()),
        }
    }

    pub fn start_instant(&self) -> &TInstant<T> {
        match self {
            Temporal::Instant(i) => i,
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.start_instant(),
            Temporal::SeqSet(ss) => ss.start_sequence().start_instant(),
        }
    }

    pub fn end_instant(&self) -> &TInstant<T> {
        match self {
            Temporal::Instant(i) => i,
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.end_instant(),
            Temporal::SeqSet(ss) => ss.end_sequence().end_instant(),
        }
    }

    /// The distinct timestamps of the instants, in order.
    pub fn timestamps(&self) -> Vec<Timestamp> {
        let mut out: Vec<Timestamp> = self.instants().iter().map(|i| i.timestamp()).collect();
        out.dedup();
        out
    }

    #[inline]
    pub fn num_timestamps(&self) -> usize {
        self.timestamps().len()
    }

    pub fn timestamp_n(&self, index: usize) -> Result<Timestamp> {
        let timestamps = self.timestamps();
        timestamps
            .get(index)
            .copied()
            .ok_or_else(|| IndexOutOfRangeError::new("timestamp", index, timestamps.len()).into())
    }

    #[inline]
    pub fn start_timestamp(&self) -> Timestamp {
        self.start_instant().timestamp()
    }

    #[inline]
    pub fn end_timestamp(&self) -> Timestamp {
        self.end_instant().timestamp()
    }

    /// The distinct values of the instants, in base-value order.
    pub fn values(&self) -> Vec<T> {
        let mut values: Vec<T> = self.instants().iter().map(|i| i.value().clone()).collect();
        values.sort_by(|a, b| a.compare(b));
        values.dedup_by(|a, b| a.same(b));
        values
    }

    /// The distinct values as a set.
    pub fn value_set(&self) -> Result<Set<T>>
    where
        T: SetValue,
    {
        Set::new(self.values())
    }

    #[inline]
    pub fn start_value(&self) -> T {
        self.start_instant().value().clone()
    }

    #[inline]
    pub fn end_value(&self) -> T {
        self.end_instant().value().clone()
    }

    /// The smallest value taken. Step and linear extremes lie on instants.
    pub fn min_value(&self) -> T {
        self.instants()
            .into_iter()
            .map(TInstant::value)
            .min_by(|a, b| a.compare(b))
            .unwrap_or_else(|| self.start_instant().value())
            .clone()
    }

    pub fn max_value(&self) -> T {
        self.instants()
            .into_iter()
            .map(TInstant::value)
            .max_by(|a, b| a.compare(b))
            .unwrap_or_else(|| self.start_instant().value())
            .clone()
    }

    /// The value at `timestamp`.
    ///
    /// # Errors
    ///
    /// - [`NoValueAtTimestampError`](tidal_core::err::NoValueAtTimestampError)
    ///   for discrete values without an instant at `timestamp`.
    /// - [`OutOfTemporalDomainError`](tidal_core::err::OutOfTemporalDomainError)
    ///   outside the time of a continuous value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_temporal::temporal::Temporal;
    /// # use tidal_core::base::Timestamp;
    /// let x: Temporal<f64> = "[10@2019-09-08, 20@2019-09-10]".parse().unwrap();
    /// let t = Timestamp::from_ymd(2019, 9, 9).unwrap();
    /// assert_eq!(x.value_at_timestamp(t).unwrap(), 15.0);
    /// ```
    pub fn value_at_timestamp(&self, timestamp: Timestamp) -> Result<T> {
        match self {
            Temporal::Instant(i) if i.timestamp() == timestamp => Ok(i.value().clone()),
            Temporal::Instant(_) => Err(tidal_core::err::NoValueAtTimestampError { timestamp }.into()),
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.value_at(timestamp),
            Temporal::SeqSet(ss) => ss.value_at(timestamp),
        }
    }

    /// The time over which the value is defined.
    pub fn time(&self) -> PeriodSet {
        match self {
            Temporal::Instant(i) => {
                SpanSet::from(Span::new_unchecked(i.timestamp(), i.timestamp(), true, true))
            }
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.time(),
            Temporal::SeqSet(ss) => ss.time(),
        }
    }

    /// The period from the first to the last timestamp.
    pub fn timespan(&self) -> Period {
        match self {
            Temporal::Instant(i) => Span::new_unchecked(i.timestamp(), i.timestamp(), true, true),
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.period(),
            Temporal::SeqSet(ss) => ss.period(),
        }
    }

    /// Length of the defined time; with `ignore_gaps`, the length of
    /// [`Temporal::timespan`].
    pub fn duration(&self, ignore_gaps: bool) -> TimeDelta {
        match self {
            Temporal::Instant(_) => TimeDelta::zero(),
            Temporal::DiscreteSeq(s) if ignore_gaps => s.start_timestamp().until(s.end_timestamp()),
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.duration(),
            Temporal::SeqSet(ss) => ss.duration(ignore_gaps),
        }
    }

    /// The continuous sequences making up the value.
    ///
    /// # Errors
    ///
    /// [`UnsupportedOperationError`] for instants and discrete sequences.
    pub fn sequences(&self) -> Result<Vec<&TSequence<T>>> {
        match self {
            Temporal::ContinuousSeq(s) => Ok(vec![s]),
            Temporal::SeqSet(ss) => Ok(ss.sequences().iter().collect()),
            _ => Err(unsupported(
                "sequences",
                format!("a {} has no continuous sequences", self.variant_name()),
            )),
        }
    }

    pub fn num_sequences(&self) -> Result<usize> {
        self.sequences().map(|s| s.len())
    }

    pub fn sequence_n(&self, index: usize) -> Result<&TSequence<T>> {
        let sequences = self.sequences()?;
        sequences
            .get(index)
            .copied()
            .ok_or_else(|| IndexOutOfRangeError::new("sequence", index, sequences.len()).into())
    }

    /// Consecutive instant pairs as two-instant sequences.
    pub fn segments(&self) -> Vec<TSequence<T>> {
        match self {
            Temporal::Instant(i) => vec![TSequence::from_instant(i.clone(), Interpolation::Discrete)],
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.segments(),
            Temporal::SeqSet(ss) => ss.sequences().iter().flat_map(TSequence::segments).collect(),
        }
    }

    /// Shifts every timestamp by `delta`.
    #[inline]
    pub fn shift_time(&self, delta: TimeDelta) -> Result<Self> {
        self.shift_scale_time(Some(delta), None)
    }

    /// Rescales the timespan to `width`, keeping the start.
    #[inline]
    pub fn scale_time(&self, width: TimeDelta) -> Result<Self> {
        self.shift_scale_time(None, Some(width))
    }

    /// Shifts and/or rescales the timespan, mapping every timestamp
    /// affinely.
    ///
    /// # Errors
    ///
    /// [`InvalidArgumentError`](tidal_core::err::InvalidArgumentError) if
    /// both arguments are `None` or `width` is not positive.
    pub fn shift_scale_time(&self, delta: Option<TimeDelta>, width: Option<TimeDelta>) -> Result<Self> {
        let from = self.timespan();
        let to = from.shift_scale(delta, width)?;
        let from_lower = from.lower().micros();
        let to_lower = to.lower().micros();
        let from_width = from.upper().micros() - from_lower;
        let ratio = if from_width == 0 {
            1.0
        } else {
            (to.upper().micros() - to_lower) as f64 / from_width as f64
        };
        self.map_timestamps(|t| {
            let offset = ((t.micros() - from_lower) as f64 * ratio).round() as i64;
            Ok(Timestamp::from_micros(to_lower + offset))
        })
    }

    fn map_timestamps<F>(&self, mut map: F) -> Result<Self>
    where
        F: FnMut(Timestamp) -> Result<Timestamp>,
    {
        Ok(match self {
            Temporal::Instant(i) => Temporal::Instant(TInstant::new(i.value().clone(), map(i.timestamp())?)),
            Temporal::DiscreteSeq(s) => Temporal::DiscreteSeq(s.map_timestamps(&mut map)?),
            Temporal::ContinuousSeq(s) => Temporal::ContinuousSeq(s.map_timestamps(&mut map)?),
            Temporal::SeqSet(ss) => {
                let sequences = ss
                    .sequences()
                    .iter()
                    .map(|s| s.map_timestamps(&mut map))
                    .collect::<Result<Vec<_>>>()?;
                Temporal::SeqSet(TSequenceSet::new(sequences, false)?)
            }
        })
    }

    /// Converts to another interpolation.
    ///
    /// Discrete values become sequences of isolated instants; step
    /// sequences become linear ones made of constant pieces. Linear
    /// sequences become step ones only if they are piecewise constant, and
    /// continuous values become discrete only if they are instantaneous.
    ///
    /// # Errors
    ///
    /// [`UnsupportedOperationError`] when the conversion would change the
    /// value, or for linear interpolation of a non-continuous base type.
    pub fn set_interpolation(&self, interpolation: Interpolation) -> Result<Self> {
        interpolation.check_for::<T>()?;
        if interpolation == self.interpolation() {
            return Ok(self.clone());
        }
        match (self, interpolation) {
            (_, Interpolation::None) => self.to_instant().map(Temporal::Instant),
            (Temporal::Instant(i), _) => Ok(TSequence::from_instant(i.clone(), interpolation).into()),
            (Temporal::DiscreteSeq(s), _) => {
                let pieces: Vec<TSequence<T>> = s
                    .instants()
                    .iter()
                    .map(|i| TSequence::from_instant(i.clone(), interpolation))
                    .collect();
                Ok(from_pieces(pieces))
            }
            (_, Interpolation::Discrete) => {
                if self.instants().len() != self.num_timestamps() || self.duration(false) != TimeDelta::zero() {
                    return Err(unsupported(
                        "set_interpolation",
                        "only instantaneous sequences can become discrete",
                    ));
                }
                let instants = self.instants().into_iter().cloned().collect();
                Ok(Temporal::DiscreteSeq(TSequence::build(
                    instants,
                    true,
                    true,
                    Interpolation::Discrete,
                    false,
                )))
            }
            (Temporal::ContinuousSeq(s), _) => Ok(from_pieces(convert_continuous(s, interpolation)?)),
            (Temporal::SeqSet(ss), _) => {
                let mut pieces = Vec::new();
                for s in ss.sequences() {
                    pieces.extend(convert_continuous(s, interpolation)?);
                }
                Ok(from_pieces(pieces))
            }
        }
    }

    /// The single instant of an instantaneous value.
    pub fn to_instant(&self) -> Result<TInstant<T>> {
        match self.num_timestamps() {
            1 => Ok(self.start_instant().clone()),
            n => Err(unsupported(
                "to_instant",
                format!("a value with {n} timestamps is not an instant"),
            )),
        }
    }

    /// The value as a single sequence; instants become continuous
    /// single-instant sequences.
    pub fn to_sequence(&self) -> Result<TSequence<T>> {
        match self {
            Temporal::Instant(i) => Ok(TSequence::from_instant(i.clone(), Interpolation::default_for::<T>())),
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => Ok(s.clone()),
            Temporal::SeqSet(ss) if ss.num_sequences() == 1 => Ok(ss.start_sequence().clone()),
            Temporal::SeqSet(ss) => Err(unsupported(
                "to_sequence",
                format!("a sequence set of {} sequences has gaps", ss.num_sequences()),
            )),
        }
    }

    /// The value as a sequence set; discrete instants become isolated
    /// single-instant sequences.
    pub fn to_sequence_set(&self) -> TSequenceSet<T> {
        match self {
            Temporal::SeqSet(ss) => ss.clone(),
            Temporal::ContinuousSeq(s) => TSequenceSet::from_sequences_unchecked(vec![s.clone()]),
            _ => {
                let interpolation = Interpolation::default_for::<T>();
                let sequences = self
                    .instants()
                    .into_iter()
                    .map(|i| TSequence::from_instant(i.clone(), interpolation))
                    .collect();
                TSequenceSet::from_sequences_unchecked(sequences)
            }
        }
    }

    /// Normalizes the components, keeping the variant.
    pub fn normalize(&self) -> Self {
        match self {
            Temporal::ContinuousSeq(s) => Temporal::ContinuousSeq(s.normalize()),
            Temporal::SeqSet(ss) => Temporal::SeqSet(ss.normalize()),
            _ => self.clone(),
        }
    }

    /// The simplest equal representation: single-sequence sets become
    /// sequences and single-instant sequences become instants.
    pub(crate) fn canonical(&self) -> Self {
        match self {
            Temporal::SeqSet(ss) => {
                let ss = ss.normalize();
                if ss.num_sequences() == 1 {
                    Temporal::from(ss.start_sequence().clone()).canonical()
                } else {
                    Temporal::SeqSet(ss)
                }
            }
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) if s.num_instants() == 1 => {
                Temporal::Instant(s.start_instant().clone())
            }
            Temporal::ContinuousSeq(s) => Temporal::ContinuousSeq(s.normalize()),
            _ => self.clone(),
        }
    }
}

/// Wraps restriction or conversion pieces: one sequence stays a sequence.
fn from_pieces<T: TemporalValue>(pieces: Vec<TSequence<T>>) -> Temporal<T> {
    let mut sequences = crate::sequence::join_sequences(pieces);
    if sequences.len() == 1 {
        return Temporal::from(sequences.swap_remove(0));
    }
    Temporal::SeqSet(TSequenceSet::from_sequences_unchecked(sequences))
}

/// A step sequence as linear constant pieces, one per step.
pub(crate) fn step_to_linear<T: TemporalValue>(seq: &TSequence<T>) -> Vec<TSequence<T>> {
    let instants = seq.instants();
    if instants.len() == 1 {
        return vec![TSequence::from_instant(instants[0].clone(), Interpolation::Linear)];
    }
    let mut pieces: Vec<TSequence<T>> = instants
        .windows(2)
        .enumerate()
        .map(|(k, w)| {
            let lower_inc = k > 0 || seq.lower_inc();
            let constant = vec![w[0].clone(), w[0].at(w[1].timestamp())];
            TSequence::build(constant, lower_inc, false, Interpolation::Linear, false)
        })
        .collect();
    if seq.upper_inc() {
        pieces.push(TSequence::from_instant(seq.end_instant().clone(), Interpolation::Linear));
    }
    pieces
}

/// Converts a continuous sequence between step and linear interpolation.
fn convert_continuous<T: TemporalValue>(seq: &TSequence<T>, to: Interpolation) -> Result<Vec<TSequence<T>>> {
    let instants = seq.instants();
    if instants.len() == 1 {
        return Ok(vec![TSequence::from_instant(instants[0].clone(), to)]);
    }
    match to {
        Interpolation::Linear => Ok(step_to_linear(seq)),
        _ => {
            let constant = instants.windows(2).all(|w| w[0].value().approx_eq(w[1].value()));
            if !constant {
                return Err(unsupported(
                    "set_interpolation",
                    "a varying linear sequence cannot be made stepwise",
                ));
            }
            Ok(vec![TSequence::build(
                instants.to_vec(),
                seq.lower_inc(),
                seq.upper_inc(),
                to,
                true,
            )])
        }
    }
}

impl<T> PartialEq for Temporal<T>
where
    T: TemporalValue,
{
    fn eq(&self, other: &Self) -> bool {
        match (self.canonical(), other.canonical()) {
            (Temporal::Instant(a), Temporal::Instant(b)) => a == b,
            (Temporal::DiscreteSeq(a), Temporal::DiscreteSeq(b)) => a == b,
            (Temporal::ContinuousSeq(a), Temporal::ContinuousSeq(b)) => a == b,
            (Temporal::SeqSet(a), Temporal::SeqSet(b)) => a == b,
            _ => false,
        }
    }
}
