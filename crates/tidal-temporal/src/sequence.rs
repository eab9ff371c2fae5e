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

//! Sequences of instants sharing one interpolation.

use crate::instant::TInstant;
use crate::interpolation::Interpolation;
use crate::restrict::ValueRestrictor;
use crate::{Period, PeriodSet};
use chrono::TimeDelta;
use std::fmt;
use tidal_collections::span::Span;
use tidal_collections::spanset::SpanSet;
use tidal_core::algorithm::{find_by, is_strictly_sorted_by, lower_bound_by};
use tidal_core::base::{TemporalValue, Timestamp};
use tidal_core::context::Context;
use tidal_core::err::{
    IndexOutOfRangeError, InvalidArgumentError, InvalidBoundsError, NoValueAtTimestampError,
    OutOfTemporalDomainError, Result,
};
use tidal_core::io::{Lexer, WkbReader, WkbWriter};

const LOWER_INC: u8 = 0x01;
const UPPER_INC: u8 = 0x02;

/// Instants with strictly increasing timestamps and one interpolation.
///
/// A discrete sequence (`{1@t1, 2@t2}`) is defined only at its instants. A
/// continuous sequence (`[1@t1, 2@t2)`) is defined over the whole period from
/// its first to its last timestamp, deriving intermediate values by step or
/// linear interpolation.
///
/// # Invariants
///
/// - At least one instant, timestamps strictly increasing.
/// - Discrete and single-instant sequences include both bounds.
/// - A step sequence with an exclusive upper bound repeats the penultimate
///   value at its last instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TSequence<T>
where
    T: TemporalValue,
{
    instants: Vec<TInstant<T>>,
    lower_inc: bool,
    upper_inc: bool,
    interpolation: Interpolation,
}

/// `true` if `mid` adds nothing between `prev` and `next`.
fn is_redundant<T: TemporalValue>(
    prev: &TInstant<T>,
    mid: &TInstant<T>,
    next: &TInstant<T>,
    interpolation: Interpolation,
) -> bool {
    match interpolation {
        Interpolation::Step => mid.value() == prev.value(),
        Interpolation::Linear => {
            let ratio = mid.timestamp().ratio(prev.timestamp(), next.timestamp());
            T::interpolate(prev.value(), next.value(), ratio).approx_eq_along(mid.value(), prev.value(), next.value())
        }
        _ => false,
    }
}

fn normalize_instants<T: TemporalValue>(
    instants: Vec<TInstant<T>>,
    interpolation: Interpolation,
) -> Vec<TInstant<T>> {
    let mut out: Vec<TInstant<T>> = Vec::with_capacity(instants.len());
    for inst in instants {
        while out.len() >= 2 && is_redundant(&out[out.len() - 2], &out[out.len() - 1], &inst, interpolation) {
            out.pop();
        }
        out.push(inst);
    }
    out
}

impl<T> TSequence<T>
where
    T: TemporalValue,
{
    /// Creates a sequence, optionally dropping redundant instants.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgumentError`] if `instants` is empty or `interpolation`
    ///   is [`Interpolation::None`].
    /// - [`UnsupportedOperationError`](tidal_core::err::UnsupportedOperationError)
    ///   for linear interpolation of a non-continuous base type.
    /// - [`InvalidBoundsError`] if the timestamps are not strictly increasing,
    ///   or a discrete or single-instant sequence excludes a bound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidal_temporal::{instant::TInstant, interpolation::Interpolation, sequence::TSequence};
    /// # use tidal_core::base::Timestamp;
    /// let t = |d| Timestamp::from_ymd(2019, 9, d).unwrap();
    /// let seq = TSequence::new(
    ///     vec![TInstant::new(1.0, t(1)), TInstant::new(2.0, t(2)), TInstant::new(3.0, t(3))],
    ///     true,
    ///     true,
    ///     Interpolation::Linear,
    ///     true,
    /// )
    /// .unwrap();
    /// assert_eq!(seq.num_instants(), 2);
    /// ```
    pub fn new(
        instants: Vec<TInstant<T>>,
        lower_inc: bool,
        upper_inc: bool,
        interpolation: Interpolation,
        normalize: bool,
    ) -> Result<Self> {
        if instants.is_empty() {
            return Err(InvalidArgumentError::new("instants", "a sequence needs at least one instant").into());
        }
        if interpolation == Interpolation::None {
            return Err(InvalidArgumentError::new(
                "interpolation",
                "a sequence is interpolated as Discrete, Step or Linear",
            )
            .into());
        }
        interpolation.check_for::<T>()?;
        if !is_strictly_sorted_by(&instants, |a, b| a.timestamp().cmp(&b.timestamp())) {
            tracing::debug!(ty = T::TEMPORAL_TYPE.name(), "rejected sequence with unordered timestamps");
            return Err(InvalidBoundsError::new("the timestamps of a sequence must be strictly increasing").into());
        }
        if (interpolation == Interpolation::Discrete || instants.len() == 1) && !(lower_inc && upper_inc) {
            return Err(InvalidBoundsError::new(
                "discrete and single-instant sequences must include both bounds",
            )
            .into());
        }
        Ok(Self::build(instants, lower_inc, upper_inc, interpolation, normalize))
    }

    /// Creates a discrete sequence.
    #[inline]
    pub fn discrete(instants: Vec<TInstant<T>>) -> Result<Self> {
        Self::new(instants, true, true, Interpolation::Discrete, false)
    }

    /// Creates a continuous sequence with the default interpolation of `T`.
    #[inline]
    pub fn continuous(instants: Vec<TInstant<T>>, lower_inc: bool, upper_inc: bool) -> Result<Self> {
        Self::new(instants, lower_inc, upper_inc, Interpolation::default_for::<T>(), true)
    }

    /// Creates a sequence from `(value, timestamp)` pairs.
    pub fn from_pairs<I>(
        pairs: I,
        lower_inc: bool,
        upper_inc: bool,
        interpolation: Interpolation,
        normalize: bool,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (T, Timestamp)>,
    {
        let instants = pairs.into_iter().map(|(v, t)| TInstant::new(v, t)).collect();
        Self::new(instants, lower_inc, upper_inc, interpolation, normalize)
    }

    /// Assembles a sequence from parts already known to be valid.
    pub(crate) fn build(
        mut instants: Vec<TInstant<T>>,
        lower_inc: bool,
        upper_inc: bool,
        interpolation: Interpolation,
        normalize: bool,
    ) -> Self {
        debug_assert!(!instants.is_empty(), "called `build` without instants");
        let n = instants.len();
        if interpolation == Interpolation::Step && !upper_inc && n >= 2 {
            let penultimate = instants[n - 2].value().clone();
            let last = instants[n - 1].timestamp();
            instants[n - 1] = TInstant::new(penultimate, last);
        }
        if normalize && interpolation.is_continuous() && n > 2 {
            instants = normalize_instants(instants, interpolation);
        }
        Self {
            instants,
            lower_inc,
            upper_inc,
            interpolation,
        }
    }

    /// The single-instant sequence `[inst]`.
    #[inline]
    pub(crate) fn from_instant(inst: TInstant<T>, interpolation: Interpolation) -> Self {
        Self {
            instants: vec![inst],
            lower_inc: true,
            upper_inc: true,
            interpolation,
        }
    }

    /// Returns an equal sequence without redundant instants.
    pub fn normalize(&self) -> Self {
        Self::build(
            self.instants.clone(),
            self.lower_inc,
            self.upper_inc,
            self.interpolation,
            true,
        )
    }

    #[inline]
    pub fn instants(&self) -> &[TInstant<T>] {
        &self.instants
    }

    #[inline]
    pub(crate) fn into_instants(self) -> Vec<TInstant<T>> {
        self.instants
    }

    #[inline]
    pub fn num_instants(&self) -> usize {
        self.instants.len()
    }

    pub fn instant_n(&self, index: usize) -> Result<&TInstant<T>> {
        self.instants
            .get(index)
            .ok_or_else(|| IndexOutOfRangeError::new("instant", index, self.instants.len()).into())
    }

    #[inline]
    pub fn start_instant(&self) -> &TInstant<T> {
        &self.instants[0]
    }

    #[inline]
    pub fn end_instant(&self) -> &TInstant<T> {
        &self.instants[self.instants.len() - 1]
    }

    #[inline]
    pub fn start_timestamp(&self) -> Timestamp {
        self.start_instant().timestamp()
    }

    #[inline]
    pub fn end_timestamp(&self) -> Timestamp {
        self.end_instant().timestamp()
    }

    #[inline]
    pub const fn lower_inc(&self) -> bool {
        self.lower_inc
    }

    #[inline]
    pub const fn upper_inc(&self) -> bool {
        self.upper_inc
    }

    #[inline]
    pub const fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.interpolation == Interpolation::Discrete
    }

    /// The period from the first to the last timestamp.
    #[inline]
    pub fn period(&self) -> Period {
        Span::new_unchecked(
            self.start_timestamp(),
            self.end_timestamp(),
            self.lower_inc,
            self.upper_inc,
        )
    }

    /// The time over which the sequence is defined.
    pub fn time(&self) -> PeriodSet {
        if self.is_discrete() {
            let points = self
                .instants
                .iter()
                .map(|i| Span::new_unchecked(i.timestamp(), i.timestamp(), true, true));
            SpanSet::from_spans(points).unwrap_or_else(|| SpanSet::from(self.period()))
        } else {
            SpanSet::from(self.period())
        }
    }

    /// Length of the defined time; zero for discrete sequences.
    pub fn duration(&self) -> TimeDelta {
        if self.is_discrete() {
            TimeDelta::zero()
        } else {
            self.start_timestamp().until(self.end_timestamp())
        }
    }

    /// The value at `timestamp`.
    ///
    /// # Errors
    ///
    /// - [`NoValueAtTimestampError`] if the sequence is discrete and has no
    ///   instant at `timestamp`.
    /// - [`OutOfTemporalDomainError`] if `timestamp` lies outside the period
    ///   of a continuous sequence.
    pub fn value_at(&self, timestamp: Timestamp) -> Result<T> {
        if self.is_discrete() {
            return find_by(&self.instants, &timestamp, |i, t| i.timestamp().cmp(t))
                .map(|i| self.instants[i].value().clone())
                .ok_or_else(|| NoValueAtTimestampError { timestamp }.into());
        }
        if !self.period().contains_value(timestamp) {
            return Err(OutOfTemporalDomainError { timestamp }.into());
        }
        Ok(self.value_at_unchecked(timestamp))
    }

    /// The interpolated value at `timestamp`, ignoring bound inclusivity.
    ///
    /// `timestamp` must lie within `[start_timestamp, end_timestamp]`.
    pub(crate) fn value_at_unchecked(&self, timestamp: Timestamp) -> T {
        let i = lower_bound_by(&self.instants, |inst| inst.timestamp() < timestamp);
        let Some(inst) = self.instants.get(i) else {
            return self.end_instant().value().clone();
        };
        if i == 0 || inst.timestamp() == timestamp {
            return inst.value().clone();
        }
        let prev = &self.instants[i - 1];
        match self.interpolation {
            Interpolation::Linear => {
                let ratio = timestamp.ratio(prev.timestamp(), inst.timestamp());
                T::interpolate(prev.value(), inst.value(), ratio)
            }
            _ => prev.value().clone(),
        }
    }

    /// Keeps the instants satisfying `keep`; only meaningful for discrete
    /// sequences.
    pub(crate) fn filter_instants<F>(&self, mut keep: F) -> Option<Self>
    where
        F: FnMut(&TInstant<T>) -> bool,
    {
        let instants: Vec<TInstant<T>> = self.instants.iter().filter(|i| keep(i)).cloned().collect();
        (!instants.is_empty()).then(|| Self::build(instants, true, true, self.interpolation, false))
    }

    /// The part of a continuous sequence within `period`.
    pub(crate) fn at_period(&self, period: &Period) -> Option<Self> {
        if self.is_discrete() {
            return self.filter_instants(|i| period.contains_value(i.timestamp()));
        }
        let inter = self.period().intersection(period).collection()?;
        let (lo, hi) = (inter.lower(), inter.upper());
        if lo == hi {
            let inst = TInstant::new(self.value_at_unchecked(lo), lo);
            return Some(Self::from_instant(inst, self.interpolation));
        }
        let mut instants = Vec::with_capacity(self.instants.len() + 2);
        instants.push(TInstant::new(self.value_at_unchecked(lo), lo));
        let first_inner = lower_bound_by(&self.instants, |i| i.timestamp() <= lo);
        instants.extend(
            self.instants[first_inner..]
                .iter()
                .take_while(|i| i.timestamp() < hi)
                .cloned(),
        );
        instants.push(TInstant::new(self.value_at_unchecked(hi), hi));
        Some(Self::build(
            instants,
            inter.lower_inc(),
            inter.upper_inc(),
            self.interpolation,
            true,
        ))
    }

    /// The parts of a continuous sequence within `periods`, in time order.
    pub(crate) fn at_periodset(&self, periods: &PeriodSet) -> Vec<Self> {
        let own = self.period();
        let first = lower_bound_by(periods.spans(), |p| p.is_left(&own));
        periods.spans()[first..]
            .iter()
            .take_while(|p| !own.is_left(*p))
            .filter_map(|p| self.at_period(p))
            .collect()
    }

    /// The parts of a continuous sequence whose values satisfy `restrictor`,
    /// in time order and joined where contiguous.
    pub(crate) fn at_values<R>(&self, restrictor: &R) -> Vec<Self>
    where
        R: ValueRestrictor<T> + ?Sized,
    {
        let n = self.instants.len();
        if n == 1 {
            return if restrictor.contains(self.instants[0].value()) {
                vec![self.clone()]
            } else {
                Vec::new()
            };
        }

        let mut pieces = Vec::new();
        for (k, w) in self.instants.windows(2).enumerate() {
            let (a, b) = (&w[0], &w[1]);
            let (ta, tb) = (a.timestamp(), b.timestamp());
            let segment_lower_inc = k > 0 || self.lower_inc;
            let is_last = k == n - 2;
            match self.interpolation {
                Interpolation::Linear => {
                    for range in restrictor.linear_preimage(a.value(), b.value()) {
                        // Cuts snap to the microsecond and carry the value the
                        // operand has there; a cut value outside the filter
                        // leaves the bound open.
                        let from = Timestamp::lerp(ta, tb, range.from);
                        let to = Timestamp::lerp(ta, tb, range.to);
                        let from_value = self.value_at_unchecked(from);
                        let to_value = self.value_at_unchecked(to);
                        let lower_inc = (from > ta || segment_lower_inc) && restrictor.contains(&from_value);
                        let upper_inc = (to < tb || !is_last || self.upper_inc) && restrictor.contains(&to_value);
                        if from == to {
                            if lower_inc && upper_inc {
                                let inst = TInstant::new(from_value, from);
                                pieces.push(Self::from_instant(inst, self.interpolation));
                            }
                        } else {
                            let instants = vec![TInstant::new(from_value, from), TInstant::new(to_value, to)];
                            pieces.push(Self::build(instants, lower_inc, upper_inc, self.interpolation, false));
                        }
                    }
                }
                _ => {
                    if restrictor.contains(a.value()) {
                        let instants = vec![a.clone(), a.at(tb)];
                        pieces.push(Self::build(instants, segment_lower_inc, false, self.interpolation, false));
                    }
                }
            }
        }
        if self.interpolation == Interpolation::Step && self.upper_inc {
            let last = self.end_instant();
            if restrictor.contains(last.value()) {
                pieces.push(Self::from_instant(last.clone(), self.interpolation));
            }
        }
        join_sequences(pieces)
    }

    /// Joins `next` onto the end of `self` when both describe one
    /// contiguous function at their shared timestamp.
    pub(crate) fn try_join(&self, next: &Self) -> Option<Self> {
        let (end, start) = (self.end_instant(), next.start_instant());
        if end.timestamp() != start.timestamp() {
            return None;
        }
        let interpolation = if self.instants.len() == 1 {
            next.interpolation
        } else if next.instants.len() == 1 || self.interpolation == next.interpolation {
            self.interpolation
        } else {
            return None;
        };
        if !interpolation.is_continuous() {
            return None;
        }
        let joinable = match (self.upper_inc, next.lower_inc) {
            (false, false) => false,
            (false, true) if interpolation == Interpolation::Step => true,
            _ => end.value().approx_eq(start.value()),
        };
        if !joinable {
            return None;
        }
        let mut instants = Vec::with_capacity(self.instants.len() + next.instants.len() - 1);
        instants.extend_from_slice(&self.instants[..self.instants.len() - 1]);
        instants.extend_from_slice(&next.instants);
        Some(Self::build(
            instants,
            self.lower_inc,
            next.upper_inc,
            interpolation,
            true,
        ))
    }

    /// Moves every instant through `map`, keeping values and bounds.
    pub(crate) fn map_timestamps<F>(&self, mut map: F) -> Result<Self>
    where
        F: FnMut(Timestamp) -> Result<Timestamp>,
    {
        let instants = self
            .instants
            .iter()
            .map(|i| -> Result<TInstant<T>> { Ok(i.at(map(i.timestamp())?)) })
            .collect::<Result<Vec<_>>>()?;
        Self::new(instants, self.lower_inc, self.upper_inc, self.interpolation, false)
    }

    /// Consecutive instant pairs as two-instant sequences; a single instant
    /// yields itself.
    pub fn segments(&self) -> Vec<Self> {
        if self.instants.len() == 1 || self.is_discrete() {
            return self
                .instants
                .iter()
                .map(|i| Self::from_instant(i.clone(), self.interpolation))
                .collect();
        }
        let n = self.instants.len();
        self.instants
            .windows(2)
            .enumerate()
            .map(|(k, w)| {
                let lower_inc = k > 0 || self.lower_inc;
                let upper_inc = k == n - 2 && self.upper_inc;
                Self::build(w.to_vec(), lower_inc, upper_inc, self.interpolation, false)
            })
            .collect()
    }

    /// Writes `{...}` for discrete and `[...)` for continuous sequences,
    /// without any interpolation prefix.
    pub(crate) fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        let (open, close) = if self.is_discrete() {
            ('{', '}')
        } else {
            (
                if self.lower_inc { '[' } else { '(' },
                if self.upper_inc { ']' } else { ')' },
            )
        };
        w.write_char(open)?;
        for (i, inst) in self.instants.iter().enumerate() {
            if i > 0 {
                w.write_str(", ")?;
            }
            inst.write_literal(w)?;
        }
        w.write_char(close)
    }

    /// Reads the body of a continuous sequence literal, `[` or `(` first.
    pub(crate) fn parse_continuous(lx: &mut Lexer<'_>, interpolation: Interpolation, ctx: &Context) -> Result<Self> {
        let lower_inc = lx.expect_one_of(&['[', '('])? == '[';
        let mut instants = vec![TInstant::parse_from(lx, &[',', ']', ')'], ctx)?];
        while lx.eat(',') {
            instants.push(TInstant::parse_from(lx, &[',', ']', ')'], ctx)?);
        }
        let upper_inc = lx.expect_one_of(&[']', ')'])? == ']';
        Self::new(instants, lower_inc, upper_inc, interpolation, true)
    }

    /// Reads the instants of a discrete sequence literal after its `{`.
    pub(crate) fn parse_discrete_body(lx: &mut Lexer<'_>, ctx: &Context) -> Result<Self> {
        let mut instants = vec![TInstant::parse_from(lx, &[',', '}'], ctx)?];
        while lx.eat(',') {
            instants.push(TInstant::parse_from(lx, &[',', '}'], ctx)?);
        }
        lx.expect('}')?;
        Self::discrete(instants)
    }

    pub(crate) fn write_wkb_body(&self, w: &mut WkbWriter) {
        w.write_len(self.instants.len());
        let mut flags = 0;
        if self.lower_inc {
            flags |= LOWER_INC;
        }
        if self.upper_inc {
            flags |= UPPER_INC;
        }
        w.write_u8(flags);
        for inst in &self.instants {
            inst.write_wkb_body(w);
        }
    }

    pub(crate) fn read_wkb_body(r: &mut WkbReader<'_>, interpolation: Interpolation) -> Result<Self> {
        let count = r.read_len()?;
        let flags = r.read_u8()?;
        let mut instants = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            instants.push(TInstant::read_wkb_body(r)?);
        }
        Self::new(
            instants,
            flags & LOWER_INC != 0,
            flags & UPPER_INC != 0,
            interpolation,
            false,
        )
    }
}

/// Joins consecutive sequences (sorted by time) wherever
/// [`TSequence::try_join`] allows.
pub(crate) fn join_sequences<T, I>(sequences: I) -> Vec<TSequence<T>>
where
    T: TemporalValue,
    I: IntoIterator<Item = TSequence<T>>,
{
    let mut out: Vec<TSequence<T>> = Vec::new();
    for seq in sequences {
        if let Some(last) = out.last_mut() {
            if let Some(joined) = last.try_join(&seq) {
                *last = joined;
                continue;
            }
        }
        out.push(seq);
    }
    out
}

impl<T> fmt::Display for TSequence<T>
where
    T: TemporalValue,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if T::CONTINUOUS && self.interpolation == Interpolation::Step {
            f.write_str("Interp=Step;")?;
        }
        self.write_literal(f)
    }
}
