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

//! Text base values.
//!
//! Text literals are written double-quoted with `"` and `\` escaped, so that
//! they survive inside collection literals. Bare words are accepted on input.

use super::{BaseValue, OrderedValue, SetValue, TemporalValue};
use crate::context::Context;
use crate::err::{ParseError, Result};
use crate::io::wkb::{MeosType, WkbReader, WkbWriter};
use std::cmp::Ordering;
use std::fmt;

fn unquote(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            // An unescaped quote in the middle ends the literal early.
            '"' => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

impl BaseValue for String {
    const TYPE_NAME: &'static str = "text";

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn write_literal<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_char('"')?;
        for c in self.chars() {
            if c == '"' || c == '\\' {
                w.write_char('\\')?;
            }
            w.write_char(c)?;
        }
        w.write_char('"')
    }

    fn parse_literal(literal: &str, _ctx: &Context) -> Result<Self> {
        if literal.starts_with('"') {
            return unquote(literal)
                .ok_or_else(|| ParseError::new(literal, Self::TYPE_NAME, "malformed quoted text").into());
        }
        Ok(literal.to_owned())
    }

    fn write_wkb(&self, w: &mut WkbWriter) {
        w.write_len(self.len());
        w.write_bytes(self.as_bytes());
    }

    fn read_wkb(r: &mut WkbReader<'_>) -> Result<Self> {
        let len = r.read_len()?;
        let bytes = r.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| r.error(format!("text is not valid UTF-8: {e}")).into())
    }
}

impl SetValue for String {
    const SET_TYPE: MeosType = MeosType::TextSet;
}

impl TemporalValue for String {
    const CONTINUOUS: bool = false;
    const TEMPORAL_TYPE: MeosType = MeosType::TText;

    #[inline]
    fn interpolate(start: &Self, _end: &Self, _ratio: f64) -> Self {
        start.clone()
    }

    #[inline]
    fn locate(start: &Self, _end: &Self, target: &Self) -> Option<f64> {
        (start == target).then_some(0.0)
    }
}

impl OrderedValue for String {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoting() {
        let s = String::from(r#"say "hi" \o/"#);
        let lit = s.to_literal();
        assert_eq!(lit, r#""say \"hi\" \\o/""#);
        assert_eq!(String::parse_literal(&lit, &Context::default()).unwrap(), s);
    }

    #[test]
    fn test_bare_words() {
        let ctx = Context::default();
        assert_eq!(String::parse_literal("AAA", &ctx).unwrap(), "AAA");
        assert_eq!(String::parse_literal("\"a, b\"", &ctx).unwrap(), "a, b");
        assert!(String::parse_literal("\"open", &ctx).is_err());
        assert!(String::parse_literal("\"a\"b\"", &ctx).is_err());
    }
}
