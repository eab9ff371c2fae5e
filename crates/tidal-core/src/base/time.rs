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

//! Timestamps and dates.
//!
//! [`Timestamp`] is a UTC instant with microsecond resolution (the resolution
//! of the MEOS `timestamptz`). Literals are always written in UTC
//! (`2019-09-01 00:00:00+00`); literals without an offset are read in the
//! timezone of the [`Context`].

use super::{BaseValue, SetValue, SpanValue};
use crate::context::{Context, parse_offset};
use crate::err::{InvalidArgumentError, ParseError, Result};
use crate::io::wkb::{MeosType, WkbReader, WkbWriter};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::fmt;

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Microseconds between the Unix epoch and 2000-01-01 00:00:00 UTC, the
/// epoch of the binary encoding.
const BINARY_EPOCH_OFFSET_MICROS: i64 = 946_684_800 * MICROS_PER_SECOND;

/// A UTC instant with microsecond resolution.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from microseconds since the Unix epoch.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Timestamp(micros)
    }

    /// Microseconds since the Unix epoch.
    #[inline]
    pub const fn micros(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_micros())
    }

    #[inline]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.0)
    }

    /// Midnight UTC of the given calendar day.
    ///
    /// ```rust
    /// # use tidal_core::base::Timestamp;
    /// let ts = Timestamp::from_ymd(2019, 9, 1).unwrap();
    /// assert_eq!(ts.to_string(), "2019-09-01 00:00:00+00");
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    pub fn from_ymd_hms(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> Result<Self> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .ok_or_else(|| {
                InvalidArgumentError::new(
                    "timestamp",
                    format!("{year:04}-{month:02}-{day:02} {h:02}:{m:02}:{s:02} is not a valid UTC time"),
                )
            })?;
        Ok(Timestamp(naive.and_utc().timestamp_micros()))
    }

    #[inline]
    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        delta
            .num_microseconds()
            .and_then(|us| self.0.checked_add(us))
            .map(Timestamp)
    }

    /// Fraction of `[start, end]` at which `self` lies.
    #[inline]
    pub fn ratio(self, start: Timestamp, end: Timestamp) -> f64 {
        if end.0 == start.0 {
            return 0.0;
        }
        (self.0 - start.0) as f64 / (end.0 - start.0) as f64
    }

    /// The timestamp at `ratio` along `[start, end]`, rounded to the microsecond.
    #[inline]
    pub fn lerp(start: Timestamp, end: Timestamp, ratio: f64) -> Timestamp {
        if ratio <= 0.0 {
            return start;
        }
        if ratio >= 1.0 {
            return end;
        }
        let offset = ((end.0 - start.0) as f64 * ratio).round() as i64;
        Timestamp(start.0 + offset)
    }

    /// Elapsed time from `self` to `other`.
    #[inline]
    pub fn until(self, other: Timestamp) -> TimeDelta {
        TimeDelta::microseconds(other.0.saturating_sub(self.0))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    #[inline]
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::from_datetime(&dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_literal(f)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({self})")
    }
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .ok()
}

/// Splits `2019-09-01 08:00:00+02` into the local part and its offset.
fn split_offset(s: &str) -> (&str, Option<FixedOffset>) {
    for suffix in ["UTC", "Z", "z"] {
        if let Some(base) = s.strip_suffix(suffix) {
            return (base.trim_end(), parse_offset(suffix));
        }
    }
    // The date part itself contains '-', so only look past it.
    if let Some(i) = s.rfind(['+', '-']).filter(|&i| i >= 10) {
        if let Some(offset) = parse_offset(&s[i..]) {
            return (s[..i].trim_end(), Some(offset));
        }
    }
    (s, None)
}

impl BaseValue for Timestamp {
    const TYPE_NAME: &'static str = "timestamptz";

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        let Some(dt) = self.to_datetime() else {
            return write!(w, "{}us", self.0);
        };
        write!(w, "{}", dt.format("%Y-%m-%d %H:%M:%S"))?;
        let frac = self.0.rem_euclid(MICROS_PER_SECOND);
        if frac != 0 {
            let digits = format!("{frac:06}");
            write!(w, ".{}", digits.trim_end_matches('0'))?;
        }
        w.write_str("+00")
    }

    fn parse_literal(literal: &str, ctx: &Context) -> Result<Self> {
        let err = |reason: &str| ParseError::new(literal, Self::TYPE_NAME, reason);
        let normalized = literal.trim().trim_matches('"').replacen('T', " ", 1);
        let (local, offset) = split_offset(&normalized);
        let naive = parse_naive(local).ok_or_else(|| err("expected YYYY-MM-DD[ HH:MM[:SS[.ffffff]]][offset]"))?;
        let tz = offset.unwrap_or_else(|| ctx.timezone());
        let dt = tz
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| err("ambiguous local time"))?;
        Ok(Timestamp::from_datetime(&dt))
    }

    #[inline]
    fn write_wkb(&self, w: &mut WkbWriter) {
        w.write_i64(self.0.saturating_sub(BINARY_EPOCH_OFFSET_MICROS));
    }

    fn read_wkb(r: &mut WkbReader<'_>) -> Result<Self> {
        let raw = r.read_i64()?;
        raw.checked_add(BINARY_EPOCH_OFFSET_MICROS)
            .map(Timestamp)
            .ok_or_else(|| r.error("timestamp out of range").into())
    }
}

impl SetValue for Timestamp {
    const SET_TYPE: MeosType = MeosType::TstzSet;
}

impl SpanValue for Timestamp {
    type Distance = TimeDelta;
    const DISCRETE: bool = false;
    const SPAN_TYPE: MeosType = MeosType::TstzSpan;
    const SPANSET_TYPE: MeosType = MeosType::TstzSpanSet;

    #[inline]
    fn successor(self) -> Result<Self> {
        Ok(self)
    }

    #[inline]
    fn predecessor(self) -> Result<Self> {
        Ok(self)
    }

    #[inline]
    fn distance_to(self, other: Self) -> Self::Distance {
        self.until(other)
    }

    fn shift(self, delta: Self::Distance) -> Result<Self> {
        self.checked_add(delta).ok_or_else(|| {
            InvalidArgumentError::new("delta", "the shifted timestamp is out of range").into()
        })
    }

    #[inline]
    fn zero_distance() -> Self::Distance {
        TimeDelta::zero()
    }

    fn distance_as_f64(d: Self::Distance) -> f64 {
        match d.num_microseconds() {
            Some(us) => us as f64 / MICROS_PER_SECOND as f64,
            None => d.num_milliseconds() as f64 / 1_000.0,
        }
    }

    #[inline]
    fn to_axis(self) -> f64 {
        self.0 as f64
    }

    fn from_axis(v: f64) -> Result<Self> {
        v.round().to_i64().map(Timestamp).ok_or_else(|| {
            InvalidArgumentError::new("width", "the scaled timestamp is out of range").into()
        })
    }

    fn distance_literal(d: Self::Distance) -> String {
        d.to_string()
    }
}

fn binary_epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).expect("2000-01-01 is a valid date")
}

impl BaseValue for NaiveDate {
    const TYPE_NAME: &'static str = "date";

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "{}", self.format("%Y-%m-%d"))
    }

    fn parse_literal(literal: &str, _ctx: &Context) -> Result<Self> {
        NaiveDate::parse_from_str(literal.trim_matches('"'), "%Y-%m-%d")
            .map_err(|e| ParseError::new(literal, Self::TYPE_NAME, e.to_string()).into())
    }

    fn write_wkb(&self, w: &mut WkbWriter) {
        let days = self.signed_duration_since(binary_epoch_date()).num_days();
        w.write_i32(days.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
    }

    fn read_wkb(r: &mut WkbReader<'_>) -> Result<Self> {
        let days = r.read_i32()?;
        binary_epoch_date()
            .checked_add_signed(TimeDelta::days(days as i64))
            .ok_or_else(|| r.error("date out of range").into())
    }
}

impl SetValue for NaiveDate {
    const SET_TYPE: MeosType = MeosType::DateSet;
}

impl SpanValue for NaiveDate {
    /// Days.
    type Distance = i32;
    const DISCRETE: bool = true;
    const SPAN_TYPE: MeosType = MeosType::DateSpan;
    const SPANSET_TYPE: MeosType = MeosType::DateSpanSet;

    fn successor(self) -> Result<Self> {
        self.succ_opt()
            .ok_or_else(|| InvalidArgumentError::new("upper", "date out of range").into())
    }

    fn predecessor(self) -> Result<Self> {
        self.pred_opt()
            .ok_or_else(|| InvalidArgumentError::new("lower", "date out of range").into())
    }

    #[inline]
    fn distance_to(self, other: Self) -> Self::Distance {
        other.signed_duration_since(self).num_days() as i32
    }

    fn shift(self, delta: Self::Distance) -> Result<Self> {
        self.checked_add_signed(TimeDelta::days(delta as i64))
            .ok_or_else(|| InvalidArgumentError::new("delta", "date out of range").into())
    }

    #[inline]
    fn zero_distance() -> Self::Distance {
        0
    }

    #[inline]
    fn distance_as_f64(d: Self::Distance) -> f64 {
        d as f64
    }

    #[inline]
    fn to_axis(self) -> f64 {
        self.num_days_from_ce() as f64
    }

    fn from_axis(v: f64) -> Result<Self> {
        v.round()
            .to_i32()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or_else(|| InvalidArgumentError::new("width", "date out of range").into())
    }

    fn distance_literal(d: Self::Distance) -> String {
        format!("{d} days")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_literal(s, &Context::default()).unwrap()
    }

    #[test]
    fn test_literal_forms() {
        let expected = Timestamp::from_ymd(2019, 9, 1).unwrap();
        assert_eq!(ts("2019-09-01"), expected);
        assert_eq!(ts("2019-09-01 00:00:00"), expected);
        assert_eq!(ts("2019-09-01T00:00:00Z"), expected);
        assert_eq!(ts("2019-09-01 00:00:00+00"), expected);
        assert_eq!(ts("2019-09-01 02:00:00+02"), expected);
        assert_eq!(ts("2019-08-31 22:00:00-02:00"), expected);
        assert_eq!(ts("2019-09-01 00:00"), expected);
    }

    #[test]
    fn test_bare_literal_uses_context_timezone() {
        let ctx = crate::context::ContextBuilder::new()
            .timezone_from_str("+02")
            .unwrap()
            .build();
        let parsed = Timestamp::parse_literal("2019-09-01 02:00:00", &ctx).unwrap();
        assert_eq!(parsed, Timestamp::from_ymd(2019, 9, 1).unwrap());
    }

    #[test]
    fn test_output_is_utc_with_trimmed_fraction() {
        assert_eq!(ts("2019-09-01").to_string(), "2019-09-01 00:00:00+00");
        assert_eq!(
            ts("2019-09-01 12:30:15.250").to_string(),
            "2019-09-01 12:30:15.25+00"
        );
    }

    #[test]
    fn test_invalid_literals() {
        let ctx = Context::default();
        assert!(Timestamp::parse_literal("2019-13-01", &ctx).is_err());
        assert!(Timestamp::parse_literal("yesterday", &ctx).is_err());
    }

    #[test]
    fn test_lerp_and_ratio() {
        let a = ts("2019-09-01");
        let b = ts("2019-09-03");
        let mid = Timestamp::lerp(a, b, 0.5);
        assert_eq!(mid, ts("2019-09-02"));
        assert_eq!(mid.ratio(a, b), 0.5);
        assert_eq!(Timestamp::lerp(a, b, 1.0), b);
    }

    #[test]
    fn test_span_arithmetic() {
        let a = ts("2019-09-01");
        let day = TimeDelta::days(1);
        assert_eq!(a.shift(day).unwrap(), ts("2019-09-02"));
        assert_eq!(a.distance_to(ts("2019-09-02")), day);
        assert_eq!(Timestamp::distance_as_f64(day), 86_400.0);
    }

    #[test]
    fn test_binary_epoch() {
        let mut w = WkbWriter::new(crate::io::WkbByteOrder::Ndr, MeosType::TimestampTz);
        ts("2000-01-01").write_wkb(&mut w);
        let bytes = w.finish();
        assert_eq!(&bytes[3..], &[0u8; 8]);
    }

    #[test]
    fn test_date_value() {
        let ctx = Context::default();
        let d = NaiveDate::parse_literal("2019-09-01", &ctx).unwrap();
        assert_eq!(d.to_literal(), "2019-09-01");
        assert_eq!(d.successor().unwrap().day(), 2);
        assert_eq!(d.distance_to(d.shift(10).unwrap()), 10);
        assert_eq!(NaiveDate::from_axis(d.to_axis()).unwrap(), d);
    }
}
