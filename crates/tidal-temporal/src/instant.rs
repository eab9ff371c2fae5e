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

//! A single value recorded at a single timestamp.

use std::fmt;
use tidal_core::base::{BaseValue, TemporalValue, Timestamp};
use tidal_core::context::Context;
use tidal_core::err::Result;
use tidal_core::io::{Lexer, WkbReader, WkbWriter};

/// A value `value` observed at `timestamp`, written `value@timestamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct TInstant<T>
where
    T: TemporalValue,
{
    value: T,
    timestamp: Timestamp,
}

impl<T> TInstant<T>
where
    T: TemporalValue,
{
    #[inline]
    pub fn new(value: T, timestamp: Timestamp) -> Self {
        Self { value, timestamp }
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    /// The same value moved to another timestamp.
    #[inline]
    pub(crate) fn at(&self, timestamp: Timestamp) -> Self {
        Self {
            value: self.value.clone(),
            timestamp,
        }
    }

    /// Reads `value@timestamp`, stopping at any of `stops`.
    pub(crate) fn parse_from(lx: &mut Lexer<'_>, stops: &[char], ctx: &Context) -> Result<Self> {
        let value = lx.parse_value::<T>(&['@'], ctx)?;
        lx.expect('@')?;
        let timestamp = lx.parse_value::<Timestamp>(stops, ctx)?;
        Ok(Self { value, timestamp })
    }

    pub(crate) fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        self.value.write_literal(w)?;
        w.write_char('@')?;
        self.timestamp.write_literal(w)
    }

    pub(crate) fn write_wkb_body(&self, w: &mut WkbWriter) {
        self.value.write_wkb(w);
        self.timestamp.write_wkb(w);
    }

    pub(crate) fn read_wkb_body(r: &mut WkbReader<'_>) -> Result<Self> {
        let value = T::read_wkb(r)?;
        let timestamp = Timestamp::read_wkb(r)?;
        Ok(Self { value, timestamp })
    }
}

impl<T> fmt::Display for TInstant<T>
where
    T: TemporalValue,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_literal(f)
    }
}
