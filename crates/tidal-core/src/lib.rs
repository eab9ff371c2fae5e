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

//! # Tidal Core
//!
//! Foundational pieces shared by the Tidal temporal algebra: the scalar base
//! values that collections and temporal values are built from, the error
//! taxonomy, the explicit session context, and the text/binary codec helpers.
//!
//! ## Modules
//!
//! - `base`: Base value traits (`BaseValue`, `SetValue`, `SpanValue`,
//!   `TemporalValue`, `OrderedValue`, `NumericValue`) and their implementations
//!   for `i32`, `f64`, `bool`, `String`, `chrono::NaiveDate`, [`base::Timestamp`] and
//!   [`base::GeomPoint`].
//! - `err`: One detail struct per failure kind and the umbrella [`err::Error`].
//! - `context`: [`context::Context`] holding the session timezone, with an
//!   initialize/finalize lifecycle and a builder.
//! - `io`: Literal lexer and the WKB writer/reader pair.
//! - `num`: Float tolerance and linear solving.
//! - `algorithm`: Binary searches over sorted slices.

pub mod algorithm;
pub mod base;
pub mod context;
pub mod err;
pub mod io;
pub mod num;

pub use base::{BaseValue, GeomPoint, NumericValue, OrderedValue, SetValue, SpanValue, TemporalValue, Timestamp};
pub use context::{Context, ContextBuilder};
pub use err::{Error, Result};
