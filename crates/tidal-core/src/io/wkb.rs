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

//! Well-known-binary style encoding.
//!
//! Every encoded value starts with one byte of endianness (`1` little endian,
//! `0` big endian) followed by a `u16` type tag taken from [`MeosType`]. The
//! body layout is defined by the collection or temporal type; base values are
//! encoded through [`crate::base::BaseValue::write_wkb`].

use crate::err::{ParseError, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// The byte order of an encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WkbByteOrder {
    /// Big endian (XDR).
    Xdr,
    /// Little endian (NDR).
    #[default]
    Ndr,
}

impl WkbByteOrder {
    #[inline]
    pub const fn marker(self) -> u8 {
        match self {
            WkbByteOrder::Xdr => 0,
            WkbByteOrder::Ndr => 1,
        }
    }

    #[inline]
    pub fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            0 => Some(WkbByteOrder::Xdr),
            1 => Some(WkbByteOrder::Ndr),
            _ => None,
        }
    }
}

/// Type tags, numbered like the MEOS `meosType` enumeration.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeosType {
    Bool = 1,
    Date = 2,
    DateSet = 5,
    DateSpan = 6,
    DateSpanSet = 7,
    Float8 = 11,
    FloatSet = 12,
    FloatSpan = 13,
    FloatSpanSet = 14,
    Int4 = 15,
    IntSet = 18,
    IntSpan = 19,
    IntSpanSet = 20,
    TBool = 26,
    Text = 31,
    TextSet = 32,
    TFloat = 33,
    TimestampTz = 34,
    TInt = 35,
    TstzSet = 38,
    TstzSpan = 39,
    TstzSpanSet = 40,
    TText = 41,
    Geometry = 42,
    GeomSet = 43,
    TGeomPoint = 46,
}

impl MeosType {
    #[inline]
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// Human readable name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            MeosType::Bool => "bool",
            MeosType::Date => "date",
            MeosType::DateSet => "dateset",
            MeosType::DateSpan => "datespan",
            MeosType::DateSpanSet => "datespanset",
            MeosType::Float8 => "float",
            MeosType::FloatSet => "floatset",
            MeosType::FloatSpan => "floatspan",
            MeosType::FloatSpanSet => "floatspanset",
            MeosType::Int4 => "int",
            MeosType::IntSet => "intset",
            MeosType::IntSpan => "intspan",
            MeosType::IntSpanSet => "intspanset",
            MeosType::TBool => "tbool",
            MeosType::Text => "text",
            MeosType::TextSet => "textset",
            MeosType::TFloat => "tfloat",
            MeosType::TimestampTz => "timestamptz",
            MeosType::TInt => "tint",
            MeosType::TstzSet => "tstzset",
            MeosType::TstzSpan => "tstzspan",
            MeosType::TstzSpanSet => "tstzspanset",
            MeosType::TText => "ttext",
            MeosType::Geometry => "geometry",
            MeosType::GeomSet => "geomset",
            MeosType::TGeomPoint => "tgeompoint",
        }
    }
}

/// Accumulates an encoding in a fixed byte order.
#[derive(Debug, Clone)]
pub struct WkbWriter {
    buf: Vec<u8>,
    order: WkbByteOrder,
}

macro_rules! write_fixed {
    ($name:ident, $t:ty, $size:expr, $bo_fn:ident) => {
        #[inline]
        pub fn $name(&mut self, v: $t) {
            let mut bytes = [0u8; $size];
            match self.order {
                WkbByteOrder::Ndr => LittleEndian::$bo_fn(&mut bytes, v),
                WkbByteOrder::Xdr => BigEndian::$bo_fn(&mut bytes, v),
            }
            self.buf.extend_from_slice(&bytes);
        }
    };
}

impl WkbWriter {
    /// Starts an encoding with the byte-order marker and the type tag.
    pub fn new(order: WkbByteOrder, ty: MeosType) -> Self {
        let mut w = Self {
            buf: Vec::with_capacity(32),
            order,
        };
        w.write_u8(order.marker());
        w.write_u16(ty.tag());
        w
    }

    #[inline]
    pub fn order(&self) -> WkbByteOrder {
        self.order
    }

    #[inline]
    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    write_fixed!(write_u16, u16, 2, write_u16);
    write_fixed!(write_u32, u32, 4, write_u32);
    write_fixed!(write_i32, i32, 4, write_i32);
    write_fixed!(write_i64, i64, 8, write_i64);
    write_fixed!(write_f64, f64, 8, write_f64);

    /// Writes a collection length.
    ///
    /// # Panics
    ///
    /// Panics if `len` does not fit in a `u32`.
    #[inline]
    pub fn write_len(&mut self, len: usize) {
        let len = u32::try_from(len).expect("collection length exceeds u32::MAX");
        self.write_u32(len);
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    #[inline]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads an encoding produced by [`WkbWriter`] (in either byte order).
#[derive(Debug, Clone)]
pub struct WkbReader<'a> {
    input: &'a [u8],
    pos: usize,
    order: WkbByteOrder,
    expected: &'static str,
}

macro_rules! read_fixed {
    ($name:ident, $t:ty, $size:expr, $bo_fn:ident) => {
        #[inline]
        pub fn $name(&mut self) -> Result<$t> {
            let bytes = self.take($size)?;
            Ok(match self.order {
                WkbByteOrder::Ndr => LittleEndian::$bo_fn(bytes),
                WkbByteOrder::Xdr => BigEndian::$bo_fn(bytes),
            })
        }
    };
}

impl<'a> WkbReader<'a> {
    /// Reads the byte-order marker and checks the type tag against `ty`.
    pub fn new(input: &'a [u8], ty: MeosType) -> Result<Self> {
        let mut r = Self {
            input,
            pos: 0,
            order: WkbByteOrder::Ndr,
            expected: ty.name(),
        };
        let marker = r.read_u8()?;
        r.order = WkbByteOrder::from_marker(marker)
            .ok_or_else(|| r.error(format!("invalid byte order marker {marker}")))?;
        let tag = r.read_u16()?;
        if tag != ty.tag() {
            return Err(r
                .error(format!("type tag {tag} does not match {} ({})", ty.name(), ty.tag()))
                .into());
        }
        Ok(r)
    }

    /// Builds a parse error carrying the hex rendering of the input.
    pub fn error(&self, reason: impl Into<String>) -> ParseError {
        ParseError::new(hex::encode_upper(self.input), self.expected, reason)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.input.len());
        match end {
            Some(end) => {
                let bytes = &self.input[self.pos..end];
                self.pos = end;
                Ok(bytes)
            }
            None => Err(self.error("unexpected end of input").into()),
        }
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    read_fixed!(read_u16, u16, 2, read_u16);
    read_fixed!(read_u32, u32, 4, read_u32);
    read_fixed!(read_i32, i32, 4, read_i32);
    read_fixed!(read_i64, i64, 8, read_i64);
    read_fixed!(read_f64, f64, 8, read_f64);

    #[inline]
    pub fn read_len(&mut self) -> Result<usize> {
        Ok(self.read_u32()? as usize)
    }

    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Fails if bytes remain after the value.
    pub fn finish(self) -> Result<()> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(self
                .error(format!("{} trailing bytes", self.input.len() - self.pos))
                .into())
        }
    }
}

/// Decodes a hex string into bytes, as accepted by every `from_hexwkb`.
pub fn decode_hex(hexwkb: &str, expected: &'static str) -> Result<Vec<u8>> {
    hex::decode(hexwkb.trim()).map_err(|e| ParseError::new(hexwkb, expected, e.to_string()).into())
}

/// Upper-case hex rendering, as produced by every `as_hexwkb`.
#[inline]
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let w = WkbWriter::new(WkbByteOrder::Ndr, MeosType::IntSpan);
        assert_eq!(w.finish(), vec![1, 19, 0]);

        let w = WkbWriter::new(WkbByteOrder::Xdr, MeosType::IntSpan);
        assert_eq!(w.finish(), vec![0, 0, 19]);
    }

    #[test]
    fn test_both_byte_orders_read_back() {
        for order in [WkbByteOrder::Ndr, WkbByteOrder::Xdr] {
            let mut w = WkbWriter::new(order, MeosType::TFloat);
            w.write_i32(-7);
            w.write_i64(1 << 40);
            w.write_f64(2.5);
            w.write_len(3);
            let bytes = w.finish();

            let mut r = WkbReader::new(&bytes, MeosType::TFloat).unwrap();
            assert_eq!(r.read_i32().unwrap(), -7);
            assert_eq!(r.read_i64().unwrap(), 1 << 40);
            assert_eq!(r.read_f64().unwrap(), 2.5);
            assert_eq!(r.read_len().unwrap(), 3);
            r.finish().unwrap();
        }
    }

    #[test]
    fn test_wrong_tag_and_truncation() {
        let bytes = WkbWriter::new(WkbByteOrder::Ndr, MeosType::IntSet).finish();
        assert!(WkbReader::new(&bytes, MeosType::IntSpan).is_err());

        let mut r = WkbReader::new(&bytes, MeosType::IntSet).unwrap();
        assert!(r.read_u32().is_err());

        assert!(WkbReader::new(&[7, 18, 0], MeosType::IntSet).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut w = WkbWriter::new(WkbByteOrder::Ndr, MeosType::IntSet);
        w.write_u8(0);
        let bytes = w.finish();
        let r = WkbReader::new(&bytes, MeosType::IntSet).unwrap();
        assert!(r.finish().is_err());
    }

    #[test]
    fn test_hex_helpers() {
        assert_eq!(encode_hex(&[1, 19, 0]), "011300");
        assert_eq!(decode_hex("011300", "intspan").unwrap(), vec![1, 19, 0]);
        assert!(decode_hex("0G", "intspan").is_err());
    }
}
