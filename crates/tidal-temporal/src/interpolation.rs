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

//! How values are derived between recorded instants.

use std::fmt;
use std::str::FromStr;
use tidal_core::base::TemporalValue;
use tidal_core::err::{Error, ParseError, Result, UnsupportedOperationError};

/// Interpolation of a temporal value.
///
/// Instants carry [`Interpolation::None`]; sequences are [`Interpolation::Discrete`]
/// (isolated instants), [`Interpolation::Step`] (last value holds) or
/// [`Interpolation::Linear`] (values vary linearly between instants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpolation {
    None,
    Discrete,
    Step,
    Linear,
}

impl Interpolation {
    /// Interpolation of continuous sequences when none is requested: linear
    /// for float and point, step otherwise.
    #[inline]
    pub const fn default_for<T: TemporalValue>() -> Self {
        if T::CONTINUOUS {
            Interpolation::Linear
        } else {
            Interpolation::Step
        }
    }

    #[inline]
    pub const fn is_continuous(self) -> bool {
        matches!(self, Interpolation::Step | Interpolation::Linear)
    }

    /// Fails if `self` is linear and `T` cannot be interpolated linearly.
    pub fn check_for<T: TemporalValue>(self) -> Result<()> {
        if self == Interpolation::Linear && !T::CONTINUOUS {
            return Err(UnsupportedOperationError::new(
                "interpolation",
                format!("linear interpolation is not defined for {}", T::TYPE_NAME),
            )
            .into());
        }
        Ok(())
    }

    /// The two-bit code of the binary encoding.
    #[inline]
    pub(crate) const fn code(self) -> u8 {
        match self {
            Interpolation::None => 0,
            Interpolation::Discrete => 1,
            Interpolation::Step => 2,
            Interpolation::Linear => 3,
        }
    }

    #[inline]
    pub(crate) const fn from_code(code: u8) -> Self {
        match code & 0x03 {
            0 => Interpolation::None,
            1 => Interpolation::Discrete,
            2 => Interpolation::Step,
            _ => Interpolation::Linear,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Interpolation::None => "None",
            Interpolation::Discrete => "Discrete",
            Interpolation::Step => "Step",
            Interpolation::Linear => "Linear",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Interpolation::None),
            "discrete" => Ok(Interpolation::Discrete),
            "step" | "stepwise" => Ok(Interpolation::Step),
            "linear" => Ok(Interpolation::Linear),
            _ => Err(ParseError::new(s, "interpolation", "expected Discrete, Step or Linear").into()),
        }
    }
}
