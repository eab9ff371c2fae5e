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

//! Sets of continuous sequences separated by time gaps.

use crate::instant::TInstant;
use crate::interpolation::Interpolation;
use crate::sequence::{TSequence, join_sequences};
use crate::{Period, PeriodSet};
use chrono::TimeDelta;
use std::fmt;
use tidal_collections::span::Span;
use tidal_collections::spanset::SpanSet;
use tidal_core::algorithm::lower_bound_by;
use tidal_core::base::{TemporalValue, Timestamp};
use tidal_core::context::Context;
use tidal_core::err::{
    IndexOutOfRangeError, InvalidArgumentError, InvalidBoundsError, OutOfTemporalDomainError, Result,
    UnsupportedOperationError,
};
use tidal_core::io::{Lexer, WkbReader, WkbWriter};

/// Continuous sequences sharing one interpolation, sorted and disjoint in
/// time.
///
/// # Invariants
///
/// - At least one sequence; no discrete sequences.
/// - Each sequence ends before the next one starts (they may share a
///   timestamp only if at most one of them includes it).
#[derive(Debug, Clone, PartialEq)]
pub struct TSequenceSet<T>
where
    T: TemporalValue,
{
    sequences: Vec<TSequence<T>>,
}

/// The interpolation shared by `sequences`; single-instant sequences adopt
/// the interpolation of the others.
pub(crate) fn common_interpolation<T: TemporalValue>(sequences: &[TSequence<T>]) -> Result<Interpolation> {
    let mut common: Option<Interpolation> = None;
    for seq in sequences.iter().filter(|s| s.num_instants() > 1) {
        match common {
            None => common = Some(seq.interpolation()),
            Some(i) if i != seq.interpolation() => {
                tracing::debug!(first = %i, second = %seq.interpolation(), "rejected mixed interpolations");
                return Err(UnsupportedOperationError::new(
                    "sequence set",
                    format!("cannot combine {i} and {} interpolation", seq.interpolation()),
                )
                .into());
            }
            Some(_) => {}
        }
    }
    Ok(common
        .or_else(|| sequences.first().map(|s| s.interpolation()))
        .unwrap_or_else(Interpolation::default_for::<T>))
}

/// Gives every single-instant sequence the interpolation `interpolation`.
pub(crate) fn unify<T: TemporalValue>(sequences: Vec<TSequence<T>>, interpolation: Interpolation) -> Vec<TSequence<T>> {
    sequences
        .into_iter()
        .map(|s| {
            if s.interpolation() == interpolation {
                s
            } else {
                let inst = s.into_instants().swap_remove(0);
                TSequence::from_instant(inst, interpolation)
            }
        })
        .collect()
}

impl<T> TSequenceSet<T>
where
    T: TemporalValue,
{
    /// Creates a sequence set, optionally joining sequences that touch and
    /// agree at a shared timestamp.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgumentError`] if `sequences` is empty or holds a discrete
    ///   sequence.
    /// - [`UnsupportedOperationError`] if the sequences mix step and linear
    ///   interpolation.
    /// - [`InvalidBoundsError`] if the sequences are unsorted or overlap.
    pub fn new(sequences: Vec<TSequence<T>>, normalize: bool) -> Result<Self> {
        if sequences.is_empty() {
            return Err(InvalidArgumentError::new("sequences", "a sequence set needs at least one sequence").into());
        }
        if sequences.iter().any(TSequence::is_discrete) {
            return Err(InvalidArgumentError::new(
                "sequences",
                "a sequence set holds continuous sequences only",
            )
            .into());
        }
        let interpolation = common_interpolation(&sequences)?;
        for w in sequences.windows(2) {
            if !w[0].period().is_left(&w[1].period()) {
                tracing::debug!(first = %w[0].period(), second = %w[1].period(), "rejected overlapping sequences");
                return Err(InvalidBoundsError::new(format!(
                    "the sequences over {} and {} are not sorted and disjoint",
                    w[0].period(),
                    w[1].period()
                ))
                .into());
            }
        }
        let sequences = unify(sequences, interpolation);
        let sequences = if normalize {
            join_sequences(sequences)
        } else {
            sequences
        };
        Ok(Self { sequences })
    }

    /// Collects restriction results, already sorted and disjoint, joining
    /// where contiguous. `None` if nothing remains.
    pub(crate) fn from_restricted<I>(pieces: I) -> Option<Self>
    where
        I: IntoIterator<Item = TSequence<T>>,
    {
        let sequences = join_sequences(pieces);
        (!sequences.is_empty()).then_some(Self { sequences })
    }

    /// Wraps sequences that already satisfy the invariants.
    #[inline]
    pub(crate) fn from_sequences_unchecked(sequences: Vec<TSequence<T>>) -> Self {
        debug_assert!(!sequences.is_empty(), "called `from_sequences_unchecked` without sequences");
        Self { sequences }
    }

    /// Returns an equal sequence set with every sequence normalized and
    /// contiguous sequences joined.
    pub fn normalize(&self) -> Self {
        let sequences = join_sequences(self.sequences.iter().map(TSequence::normalize));
        Self { sequences }
    }

    #[inline]
    pub fn sequences(&self) -> &[TSequence<T>] {
        &self.sequences
    }

    #[inline]
    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    pub fn sequence_n(&self, index: usize) -> Result<&TSequence<T>> {
        self.sequences
            .get(index)
            .ok_or_else(|| IndexOutOfRangeError::new("sequence", index, self.sequences.len()).into())
    }

    #[inline]
    pub fn start_sequence(&self) -> &TSequence<T> {
        &self.sequences[0]
    }

    #[inline]
    pub fn end_sequence(&self) -> &TSequence<T> {
        &self.sequences[self.sequences.len() - 1]
    }

    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.start_sequence().interpolation()
    }

    /// Every instant of every sequence, in time order.
    pub fn instants(&self) -> impl Iterator<Item = &TInstant<T>> + '_ {
        self.sequences.iter().flat_map(|s| s.instants().iter())
    }

    pub fn num_instants(&self) -> usize {
        self.sequences.iter().map(TSequence::num_instants).sum()
    }

    pub fn period(&self) -> Period {
        let (first, last) = (self.start_sequence(), self.end_sequence());
        Span::new_unchecked(
            first.start_timestamp(),
            last.end_timestamp(),
            first.lower_inc(),
            last.upper_inc(),
        )
    }

    pub fn time(&self) -> PeriodSet {
        SpanSet::from_spans(self.sequences.iter().map(TSequence::period))
            .unwrap_or_else(|| SpanSet::from(self.period()))
    }

    /// Total defined time, or the length of the encompassing period when
    /// `ignore_gaps` is set.
    pub fn duration(&self, ignore_gaps: bool) -> TimeDelta {
        if ignore_gaps {
            let p = self.period();
            return p.lower().until(p.upper());
        }
        self.sequences
            .iter()
            .fold(TimeDelta::zero(), |acc, s| acc + s.duration())
    }

    /// The value at `timestamp`.
    ///
    /// # Errors
    ///
    /// [`OutOfTemporalDomainError`] if `timestamp` falls outside every
    /// sequence, gaps included.
    pub fn value_at(&self, timestamp: Timestamp) -> Result<T> {
        let i = lower_bound_by(&self.sequences, |s| s.period().is_left_value(timestamp));
        match self.sequences.get(i) {
            Some(seq) if seq.period().contains_value(timestamp) => Ok(seq.value_at_unchecked(timestamp)),
            _ => Err(OutOfTemporalDomainError { timestamp }.into()),
        }
    }

    pub(crate) fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_char('{')?;
        for (i, seq) in self.sequences.iter().enumerate() {
            if i > 0 {
                w.write_str(", ")?;
            }
            seq.write_literal(w)?;
        }
        w.write_char('}')
    }

    /// Reads the sequences of a literal after its `{`.
    pub(crate) fn parse_body(lx: &mut Lexer<'_>, interpolation: Interpolation, ctx: &Context) -> Result<Self> {
        let mut sequences = vec![TSequence::parse_continuous(lx, interpolation, ctx)?];
        while lx.eat(',') {
            sequences.push(TSequence::parse_continuous(lx, interpolation, ctx)?);
        }
        lx.expect('}')?;
        Self::new(sequences, true)
    }

    pub(crate) fn write_wkb_body(&self, w: &mut WkbWriter) {
        w.write_len(self.sequences.len());
        for seq in &self.sequences {
            seq.write_wkb_body(w);
        }
    }

    pub(crate) fn read_wkb_body(r: &mut WkbReader<'_>, interpolation: Interpolation) -> Result<Self> {
        let count = r.read_len()?;
        let mut sequences = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            sequences.push(TSequence::read_wkb_body(r, interpolation)?);
        }
        Self::new(sequences, false)
    }
}

impl<T> fmt::Display for TSequenceSet<T>
where
    T: TemporalValue,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if T::CONTINUOUS && self.interpolation() == Interpolation::Step {
            f.write_str("Interp=Step;")?;
        }
        self.write_literal(f)
    }
}
