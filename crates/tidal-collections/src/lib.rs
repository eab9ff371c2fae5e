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

//! # Tidal Collections
//!
//! Collections over ordered base values: contiguous spans, normalized span
//! sets with gaps, and discrete sets.
//!
//! ## Modules
//!
//! - `span`: [`span::Span`] with bound inclusivity, canonical discrete form,
//!   topological and position predicates, set operations and
//!   shift/scale transformations.
//! - `spanset`: [`spanset::SpanSet`], with `O(n + m)` merge-scan algebra.
//! - `set`: [`set::Set`], sorted distinct values with merge-scan algebra.
//! - `intersection`: [`intersection::Intersection`], the result of an
//!   intersection that may degenerate to a single value.
//!
//! Every collection renders to and parses from its text literal
//! (`[1, 5)`, `{[1, 2], [4, 5)}`, `{1, 2, 3}`) and its binary encoding.

pub mod intersection;
pub mod set;
pub mod span;
pub mod spanset;

pub use intersection::Intersection;
pub use set::Set;
pub use span::{Extent, Span};
pub use spanset::SpanSet;
