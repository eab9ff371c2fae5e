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

//! Text and binary encodings of [`Temporal`] values.
//!
//! Text literals follow the MEOS forms:
//!
//! | Variant | Literal |
//! |---|---|
//! | instant | `1@2019-09-01` |
//! | discrete sequence | `{1@2019-09-01, 2@2019-09-02}` |
//! | continuous sequence | `[1@2019-09-01, 2@2019-09-02)` |
//! | sequence set | `{[1@2019-09-01, 2@2019-09-02), [3@2019-09-05]}` |
//!
//! Continuous literals of float and point values may start with
//! `Interp=Step;` to select step interpolation.

use crate::instant::TInstant;
use crate::interpolation::Interpolation;
use crate::sequence::TSequence;
use crate::sequenceset::TSequenceSet;
use crate::temporal::Temporal;
use std::fmt;
use std::str::FromStr;
use tidal_core::base::TemporalValue;
use tidal_core::context::Context;
use tidal_core::err::{Error, Result};
use tidal_core::io::wkb::{decode_hex, encode_hex};
use tidal_core::io::{Lexer, WkbByteOrder, WkbReader, WkbWriter};

const SUBTYPE_INSTANT: u8 = 1;
const SUBTYPE_SEQUENCE: u8 = 2;
const SUBTYPE_SEQUENCE_SET: u8 = 3;

impl<T> Temporal<T>
where
    T: TemporalValue,
{
    /// Parses a temporal literal, reading timestamps without offset in the
    /// timezone of `ctx`.
    pub fn parse_with(literal: &str, ctx: &Context) -> Result<Self> {
        let mut lx = Lexer::new(literal, T::TEMPORAL_TYPE.name());
        let interpolation = if lx.eat_keyword("Interp=Step;") {
            Interpolation::Step
        } else if lx.eat_keyword("Interp=Linear;") {
            Interpolation::Linear
        } else {
            Interpolation::default_for::<T>()
        };
        let parsed = match lx.peek() {
            Some('{') => {
                lx.expect('{')?;
                match lx.peek() {
                    Some('[' | '(') => Temporal::SeqSet(TSequenceSet::parse_body(&mut lx, interpolation, ctx)?),
                    _ => Temporal::DiscreteSeq(TSequence::parse_discrete_body(&mut lx, ctx)?),
                }
            }
            Some('[' | '(') => Temporal::ContinuousSeq(TSequence::parse_continuous(&mut lx, interpolation, ctx)?),
            Some(_) => Temporal::Instant(TInstant::parse_from(&mut lx, &[], ctx)?),
            None => return Err(lx.error("empty literal").into()),
        };
        lx.expect_end()?;
        Ok(parsed)
    }

    fn subtype(&self) -> u8 {
        match self {
            Temporal::Instant(_) => SUBTYPE_INSTANT,
            Temporal::DiscreteSeq(_) | Temporal::ContinuousSeq(_) => SUBTYPE_SEQUENCE,
            Temporal::SeqSet(_) => SUBTYPE_SEQUENCE_SET,
        }
    }

    /// Binary encoding in the given byte order.
    pub fn as_wkb(&self, order: WkbByteOrder) -> Vec<u8> {
        let mut w = WkbWriter::new(order, T::TEMPORAL_TYPE);
        w.write_u8(self.interpolation().code() | (self.subtype() << 2));
        match self {
            Temporal::Instant(i) => i.write_wkb_body(&mut w),
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.write_wkb_body(&mut w),
            Temporal::SeqSet(ss) => ss.write_wkb_body(&mut w),
        }
        w.finish()
    }

    pub fn from_wkb(bytes: &[u8]) -> Result<Self> {
        let mut r = WkbReader::new(bytes, T::TEMPORAL_TYPE)?;
        let flags = r.read_u8()?;
        let interpolation = Interpolation::from_code(flags);
        let decoded = match (flags >> 2) & 0x03 {
            SUBTYPE_INSTANT if interpolation == Interpolation::None => {
                Temporal::Instant(TInstant::read_wkb_body(&mut r)?)
            }
            SUBTYPE_SEQUENCE => Temporal::from(TSequence::read_wkb_body(&mut r, interpolation)?),
            SUBTYPE_SEQUENCE_SET => Temporal::SeqSet(TSequenceSet::read_wkb_body(&mut r, interpolation)?),
            _ => return Err(r.error(format!("invalid temporal flags {flags:#04x}")).into()),
        };
        r.finish()?;
        Ok(decoded)
    }

    #[inline]
    pub fn as_hexwkb(&self, order: WkbByteOrder) -> String {
        encode_hex(&self.as_wkb(order))
    }

    pub fn from_hexwkb(hexwkb: &str) -> Result<Self> {
        Self::from_wkb(&decode_hex(hexwkb, T::TEMPORAL_TYPE.name())?)
    }
}

impl<T> fmt::Display for Temporal<T>
where
    T: TemporalValue,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Instant(i) => i.fmt(f),
            Temporal::DiscreteSeq(s) | Temporal::ContinuousSeq(s) => s.fmt(f),
            Temporal::SeqSet(ss) => ss.fmt(f),
        }
    }
}

impl<T> FromStr for Temporal<T>
where
    T: TemporalValue,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with(s, &Context::default())
    }
}
