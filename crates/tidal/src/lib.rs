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

//! # Tidal
//!
//! A temporal algebra: values over ordered domains (spans, span sets and
//! sets) and values that vary over time (temporal instants, sequences and
//! sequence sets), with restriction, merge and position predicates.
//!
//! This crate re-exports the workspace under one roof and names the
//! concrete types:
//!
//! | Alias | Type |
//! |---|---|
//! | [`IntSpan`], [`FloatSpan`], [`DateSpan`], [`Period`] | [`Span`] |
//! | [`IntSpanSet`], [`FloatSpanSet`], [`DateSpanSet`], [`PeriodSet`] | [`SpanSet`] |
//! | [`IntSet`], [`FloatSet`], [`TextSet`], [`DateSet`], [`TimestampSet`], [`GeomSet`] | [`Set`] |
//! | [`TInt`], [`TFloat`], [`TBool`], [`TText`], [`TGeomPoint`] | [`Temporal`] |
//!
//! ## Example
//!
//! ```rust
//! use tidal::{TFloat, Timestamp};
//!
//! let x: TFloat = "[0@2019-09-01, 10@2019-09-03]".parse().unwrap();
//! let at = x.at_value(&5.0).unwrap();
//! assert_eq!(at.start_timestamp(), Timestamp::from_ymd(2019, 9, 2).unwrap());
//! ```

pub use chrono::{FixedOffset, NaiveDate, TimeDelta};
pub use tidal_collections::{Extent, Intersection, Set, Span, SpanSet};
pub use tidal_core::io::WkbByteOrder;
pub use tidal_core::{
    BaseValue, Context, ContextBuilder, Error, GeomPoint, NumericValue, OrderedValue, Result, SetValue, SpanValue,
    TemporalValue, Timestamp,
};
pub use tidal_temporal::{
    Interpolation, Period, PeriodSet, TInstant, TSequence, TSequenceSet, Temporal, TimeExtent, TimeRestrictor,
    TimestampSet, ValueRestrictor,
};

pub mod err {
    pub use tidal_core::err::*;
}

pub type IntSpan = Span<i32>;
pub type FloatSpan = Span<f64>;
pub type DateSpan = Span<NaiveDate>;

pub type IntSpanSet = SpanSet<i32>;
pub type FloatSpanSet = SpanSet<f64>;
pub type DateSpanSet = SpanSet<NaiveDate>;

pub type IntSet = Set<i32>;
pub type FloatSet = Set<f64>;
pub type TextSet = Set<String>;
pub type DateSet = Set<NaiveDate>;
pub type GeomSet = Set<GeomPoint>;

pub type TInt = Temporal<i32>;
pub type TFloat = Temporal<f64>;
pub type TBool = Temporal<bool>;
pub type TText = Temporal<String>;
pub type TGeomPoint = Temporal<GeomPoint>;
