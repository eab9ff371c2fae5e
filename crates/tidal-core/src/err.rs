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

//! Error taxonomy shared by every Tidal crate.
//!
//! Each failure kind carries a small detail struct that renders a readable
//! message on its own, and converts into the umbrella [`Error`] through
//! `From`, so fallible operations can propagate with `?` regardless of which
//! detail they raise.

use crate::base::time::Timestamp;
use std::fmt::Display;

/// A malformed span (`lower > upper`, empty after canonicalization) or a
/// malformed sequence (non-increasing timestamps, invalid bounds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidBoundsError {
    pub reason: String,
}

impl InvalidBoundsError {
    #[inline]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for InvalidBoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid bounds: {}", self.reason)
    }
}

impl std::error::Error for InvalidBoundsError {}

/// Conflicting or missing optional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgumentError {
    /// The name of the offending argument.
    pub argument: &'static str,
    pub reason: String,
}

impl InvalidArgumentError {
    #[inline]
    pub fn new(argument: &'static str, reason: impl Into<String>) -> Self {
        Self {
            argument,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid argument `{}`: {}", self.argument, self.reason)
    }
}

impl std::error::Error for InvalidArgumentError {}

/// A positional accessor (`element_n`, `span_n`, `instant_n`, ...) was called
/// with an index outside `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRangeError {
    /// The kind of component being indexed (e.g. "element", "instant").
    pub component: &'static str,
    pub index: usize,
    pub len: usize,
}

impl IndexOutOfRangeError {
    #[inline]
    pub const fn new(component: &'static str, index: usize, len: usize) -> Self {
        Self {
            component,
            index,
            len,
        }
    }
}

impl std::fmt::Display for IndexOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The {} index {} is out of range [0, {})",
            self.component, self.index, self.len
        )
    }
}

impl std::error::Error for IndexOutOfRangeError {}

/// Two temporal values disagree on a timestamp they both define.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalMergeConflictError {
    pub timestamp: Timestamp,
}

impl std::fmt::Display for TemporalMergeConflictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The temporal values cannot be merged: conflicting definitions at {}",
            self.timestamp
        )
    }
}

impl std::error::Error for TemporalMergeConflictError {}

/// A discrete temporal value has no instant at the requested timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoValueAtTimestampError {
    pub timestamp: Timestamp,
}

impl std::fmt::Display for NoValueAtTimestampError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No value defined at {}", self.timestamp)
    }
}

impl std::error::Error for NoValueAtTimestampError {}

/// The requested timestamp lies outside the time domain of a temporal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfTemporalDomainError {
    pub timestamp: Timestamp,
}

impl std::fmt::Display for OutOfTemporalDomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The timestamp {} is outside the temporal domain", self.timestamp)
    }
}

impl std::error::Error for OutOfTemporalDomainError {}

/// An operation was invoked on an incompatible combination of variants,
/// interpolations, or base types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedOperationError {
    pub operation: &'static str,
    pub reason: String,
}

impl UnsupportedOperationError {
    #[inline]
    pub fn new(operation: &'static str, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for UnsupportedOperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unsupported operation `{}`: {}", self.operation, self.reason)
    }
}

impl std::error::Error for UnsupportedOperationError {}

/// A text or binary literal could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The offending literal (or a hex rendering of binary input).
    pub literal: String,
    /// The name of the type we tried to parse into (e.g. "IntSpan").
    pub expected: &'static str,
    pub reason: String,
}

impl ParseError {
    #[inline]
    pub fn new(literal: impl Into<String>, expected: &'static str, reason: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            expected,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse '{}' as {}: {}",
            self.literal, self.expected, self.reason
        )
    }
}

impl std::error::Error for ParseError {}

/// The error type for every fallible operation of the algebra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidBounds(InvalidBoundsError),
    InvalidArgument(InvalidArgumentError),
    IndexOutOfRange(IndexOutOfRangeError),
    TemporalMergeConflict(TemporalMergeConflictError),
    NoValueAtTimestamp(NoValueAtTimestampError),
    OutOfTemporalDomain(OutOfTemporalDomainError),
    UnsupportedOperation(UnsupportedOperationError),
    Parse(ParseError),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBounds(e) => write!(f, "{e}"),
            Self::InvalidArgument(e) => write!(f, "{e}"),
            Self::IndexOutOfRange(e) => write!(f, "{e}"),
            Self::TemporalMergeConflict(e) => write!(f, "{e}"),
            Self::NoValueAtTimestamp(e) => write!(f, "{e}"),
            Self::OutOfTemporalDomain(e) => write!(f, "{e}"),
            Self::UnsupportedOperation(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBounds(e) => Some(e),
            Self::InvalidArgument(e) => Some(e),
            Self::IndexOutOfRange(e) => Some(e),
            Self::TemporalMergeConflict(e) => Some(e),
            Self::NoValueAtTimestamp(e) => Some(e),
            Self::OutOfTemporalDomain(e) => Some(e),
            Self::UnsupportedOperation(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

macro_rules! impl_from_detail {
    ($detail:ty, $variant:ident) => {
        impl From<$detail> for Error {
            #[inline]
            fn from(e: $detail) -> Self {
                Self::$variant(e)
            }
        }
    };
}

impl_from_detail!(InvalidBoundsError, InvalidBounds);
impl_from_detail!(InvalidArgumentError, InvalidArgument);
impl_from_detail!(IndexOutOfRangeError, IndexOutOfRange);
impl_from_detail!(TemporalMergeConflictError, TemporalMergeConflict);
impl_from_detail!(NoValueAtTimestampError, NoValueAtTimestamp);
impl_from_detail!(OutOfTemporalDomainError, OutOfTemporalDomain);
impl_from_detail!(UnsupportedOperationError, UnsupportedOperation);
impl_from_detail!(ParseError, Parse);

/// Shorthand used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_messages() {
        let e: Error = IndexOutOfRangeError::new("element", 3, 3).into();
        assert_eq!(e.to_string(), "The element index 3 is out of range [0, 3)");

        let e: Error = ParseError::new("[1,", "IntSpan", "unexpected end of input").into();
        assert_eq!(
            e.to_string(),
            "Could not parse '[1,' as IntSpan: unexpected end of input"
        );

        let e: Error = InvalidArgumentError::new("width", "must be positive").into();
        assert_eq!(e.to_string(), "Invalid argument `width`: must be positive");
    }

    #[test]
    fn test_source_is_detail() {
        let e: Error = InvalidBoundsError::new("lower > upper").into();
        let source = e.source().expect("detail should be exposed as source");
        assert_eq!(source.to_string(), "Invalid bounds: lower > upper");
    }

    #[test]
    fn test_from_conversions_pick_variant() {
        let ts = Timestamp::from_micros(0);
        assert!(matches!(
            Error::from(TemporalMergeConflictError { timestamp: ts }),
            Error::TemporalMergeConflict(_)
        ));
        assert!(matches!(
            Error::from(NoValueAtTimestampError { timestamp: ts }),
            Error::NoValueAtTimestamp(_)
        ));
        assert!(matches!(
            Error::from(OutOfTemporalDomainError { timestamp: ts }),
            Error::OutOfTemporalDomain(_)
        ));
        assert!(matches!(
            Error::from(UnsupportedOperationError::new("merge", "mixed interpolation")),
            Error::UnsupportedOperation(_)
        ));
    }
}
