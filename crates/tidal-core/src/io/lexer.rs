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

//! A small cursor over text literals.
//!
//! Collection and temporal literals nest base-value literals that may
//! themselves contain separators (`"a, b"`, `POINT(1 2)`, `2019-09-01 00:00:00+00`).
//! The lexer therefore cuts literals at a stop character only when it is
//! outside of quotes and parentheses.

use crate::base::BaseValue;
use crate::context::Context;
use crate::err::{ParseError, Result};

/// A cursor over a literal, reporting failures against the full input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    expected: &'static str,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer for `input`; `expected` names the type being parsed
    /// and ends up in every [`ParseError`] raised by this lexer.
    #[inline]
    pub fn new(input: &'a str, expected: &'static str) -> Self {
        Self {
            input,
            pos: 0,
            expected,
        }
    }

    /// Builds a parse error for the full input.
    #[inline]
    pub fn error(&self, reason: impl Into<String>) -> ParseError {
        ParseError::new(self.input, self.expected, reason)
    }

    /// Returns the unconsumed remainder of the input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// Returns the next non-whitespace character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.rest().chars().next()
    }

    /// Consumes `c` if it is the next non-whitespace character.
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, c: char) -> Result<()> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{c}'")).into())
        }
    }

    /// Consumes and returns the next character if it is one of `options`.
    pub fn expect_one_of(&mut self, options: &[char]) -> Result<char> {
        match self.peek() {
            Some(c) if options.contains(&c) => {
                self.pos += c.len_utf8();
                Ok(c)
            }
            _ => {
                let wanted: Vec<String> = options.iter().map(|c| format!("'{c}'")).collect();
                Err(self.unexpected(&wanted.join(" or ")).into())
            }
        }
    }

    /// Consumes `keyword` (ASCII case-insensitive) if the input continues with it.
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let rest = self.rest();
        if rest.len() >= keyword.len()
            && rest.is_char_boundary(keyword.len())
            && rest[..keyword.len()].eq_ignore_ascii_case(keyword)
        {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    /// Takes the next literal, ending before the first of `stops` that is
    /// outside quotes and parentheses (or at the end of the input).
    ///
    /// The literal is returned trimmed; an empty literal is an error.
    pub fn take_literal(&mut self, stops: &[char]) -> Result<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        let mut depth = 0usize;
        let mut in_quotes = false;
        let mut escaped = false;
        let mut end = rest.len();

        for (i, c) in rest.char_indices() {
            if in_quotes {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_quotes = false;
                }
                continue;
            }
            match c {
                '"' => in_quotes = true,
                '(' => depth += 1,
                ')' if depth > 0 => depth -= 1,
                _ if depth == 0 && stops.contains(&c) => {
                    end = i;
                    break;
                }
                ')' => return Err(self.error("unbalanced parenthesis").into()),
                _ => {}
            }
        }

        if in_quotes {
            return Err(self.error("unterminated quoted value").into());
        }

        let literal = rest[..end].trim();
        if literal.is_empty() {
            return Err(self.unexpected("a value").into());
        }
        self.pos += end;
        Ok(literal)
    }

    /// Takes the next literal and parses it as a base value.
    pub fn parse_value<T>(&mut self, stops: &[char], ctx: &Context) -> Result<T>
    where
        T: BaseValue,
    {
        let literal = self.take_literal(stops)?;
        T::parse_literal(literal, ctx)
    }

    /// Fails unless only whitespace remains.
    pub fn expect_end(&mut self) -> Result<()> {
        if self.peek().is_none() {
            Ok(())
        } else {
            Err(self.error(format!("unexpected trailing input '{}'", self.rest())).into())
        }
    }

    fn unexpected(&self, wanted: &str) -> ParseError {
        match self.rest().chars().next() {
            Some(c) => self.error(format!("expected {wanted} at offset {}, found '{c}'", self.pos)),
            None => self.error(format!("expected {wanted}, found end of input")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_literal_stops_at_separator() {
        let mut lx = Lexer::new("1, 2}", "IntSet");
        assert_eq!(lx.take_literal(&[',', '}']).unwrap(), "1");
        lx.expect(',').unwrap();
        assert_eq!(lx.take_literal(&[',', '}']).unwrap(), "2");
        lx.expect('}').unwrap();
        lx.expect_end().unwrap();
    }

    #[test]
    fn test_take_literal_respects_parentheses_and_quotes() {
        let mut lx = Lexer::new("POINT(1 2)@2019-09-01, \"a, b\"}", "x");
        assert_eq!(lx.take_literal(&['@']).unwrap(), "POINT(1 2)");
        lx.expect('@').unwrap();
        assert_eq!(lx.take_literal(&[',']).unwrap(), "2019-09-01");
        lx.expect(',').unwrap();
        assert_eq!(lx.take_literal(&[',', '}']).unwrap(), "\"a, b\"");
    }

    #[test]
    fn test_closing_parenthesis_can_be_a_stop() {
        let mut lx = Lexer::new("7, 10)", "IntSpan");
        assert_eq!(lx.take_literal(&[',']).unwrap(), "7");
        lx.expect(',').unwrap();
        assert_eq!(lx.take_literal(&[']', ')']).unwrap(), "10");
        assert_eq!(lx.expect_one_of(&[']', ')']).unwrap(), ')');
    }

    #[test]
    fn test_errors() {
        let mut lx = Lexer::new("  , 3", "IntSet");
        assert!(lx.take_literal(&[',']).is_err());

        let mut lx = Lexer::new("\"open", "TextSet");
        assert!(lx.take_literal(&[',']).is_err());

        let mut lx = Lexer::new("{1} x", "IntSet");
        lx.expect('{').unwrap();
        lx.take_literal(&['}']).unwrap();
        lx.expect('}').unwrap();
        let err = lx.expect_end().unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }

    #[test]
    fn test_eat_keyword_is_case_insensitive() {
        let mut lx = Lexer::new("interp=step;[1@2019-09-01]", "TFloat");
        assert!(lx.eat_keyword("Interp=Step;"));
        assert_eq!(lx.peek(), Some('['));
        assert!(!lx.eat_keyword("SRID="));
    }
}
