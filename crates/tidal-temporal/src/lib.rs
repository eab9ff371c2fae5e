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

//! # Tidal Temporal
//!
//! Values that vary over time: a base value recorded at timestamps and
//! interpolated in between.
//!
//! ## Modules
//!
//! - `interpolation`: [`interpolation::Interpolation`], how values are
//!   derived between instants.
//! - `instant`: [`instant::TInstant`], one value at one timestamp.
//! - `sequence`: [`sequence::TSequence`], ordered instants with bounds and an
//!   interpolation, with normalization, slicing and joining.
//! - `sequenceset`: [`sequenceset::TSequenceSet`], disjoint continuous
//!   sequences ordered by time.
//! - `temporal`: the sum type [`temporal::Temporal`] with accessors,
//!   time transformations and interpolation conversions.
//! - `restrict`: `at_*`/`minus_*` restriction to times and values.
//! - `merge`: merging and appending.
//! - `numeric`: value span, integral and time-weighted average of int and
//!   float temporals.
//! - `position`: position predicates on the time dimension.
//! - `ever`: ever/always comparisons with a base value.
//! - `distance`: temporal distance and nearest-approach distance of int
//!   and float temporals.
//!
//! Every temporal value renders to and parses from its text literal and its
//! binary encoding.

mod codec;
mod distance;
mod ever;
mod merge;
mod numeric;
pub mod instant;
pub mod interpolation;
pub mod position;
pub mod restrict;
pub mod sequence;
pub mod sequenceset;
pub mod temporal;

use tidal_collections::{Set, Span, SpanSet};
use tidal_core::base::Timestamp;

/// A span of time.
pub type Period = Span<Timestamp>;

/// Disjoint spans of time.
pub type PeriodSet = SpanSet<Timestamp>;

/// Distinct timestamps.
pub type TimestampSet = Set<Timestamp>;

pub use instant::TInstant;
pub use interpolation::Interpolation;
pub use position::TimeExtent;
pub use restrict::{RatioRange, TimeRestrictor, ValueRestrictor};
pub use sequence::TSequence;
pub use sequenceset::TSequenceSet;
pub use temporal::Temporal;
