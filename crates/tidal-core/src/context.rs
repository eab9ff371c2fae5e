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

//! Explicit session state.
//!
//! Timestamp literals without an offset (`2019-09-01`, `2019-09-01 08:00:00`)
//! need a timezone to become an instant. Instead of process-wide state, the
//! timezone lives in a [`Context`] that callers create with
//! [`Context::initialize`] (or a [`ContextBuilder`]), thread through the
//! parsing entry points, and close with [`Context::finalize`].
//!
//! ```rust
//! # use tidal_core::context::ContextBuilder;
//! let ctx = ContextBuilder::new().timezone_from_str("+02:00").unwrap().build();
//! assert_eq!(ctx.timezone().local_minus_utc(), 7200);
//! ctx.finalize();
//! ```

use crate::err::{InvalidArgumentError, Result};
use chrono::FixedOffset;

/// The environment variable read by [`ContextBuilder::from_env`].
pub const TIMEZONE_ENV_VAR: &str = "TIDAL_TIMEZONE";

/// Settings resolved by a [`ContextBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextConfig {
    pub timezone: FixedOffset,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            timezone: utc_offset(),
        }
    }
}

/// Session state consulted when interpreting literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    timezone: FixedOffset,
}

impl Context {
    /// Opens a context with the given settings.
    pub fn initialize(config: ContextConfig) -> Self {
        tracing::info!(timezone = %config.timezone, "tidal context initialized");
        Self {
            timezone: config.timezone,
        }
    }

    /// A UTC context, equivalent to `Context::default()`.
    #[inline]
    pub fn utc() -> Self {
        Self {
            timezone: utc_offset(),
        }
    }

    /// The timezone applied to timestamp literals without an explicit offset.
    #[inline]
    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    /// Closes the context. Values created under it remain valid.
    pub fn finalize(self) {
        tracing::info!(timezone = %self.timezone, "tidal context finalized");
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::utc()
    }
}

/// Builder for [`Context`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextBuilder {
    config: ContextConfig,
}

impl ContextBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn timezone(mut self, timezone: FixedOffset) -> Self {
        self.config.timezone = timezone;
        self
    }

    /// Sets the timezone from an offset literal such as `+02`, `-0530`,
    /// `+05:30`, `UTC` or `Z`.
    pub fn timezone_from_str(self, offset: &str) -> Result<Self> {
        let tz = parse_offset(offset).ok_or_else(|| {
            InvalidArgumentError::new("timezone", format!("'{offset}' is not a UTC offset"))
        })?;
        Ok(self.timezone(tz))
    }

    /// Reads the timezone from `TIDAL_TIMEZONE` when it is set.
    pub fn from_env(self) -> Result<Self> {
        match std::env::var(TIMEZONE_ENV_VAR) {
            Ok(value) => self.timezone_from_str(&value),
            Err(_) => Ok(self),
        }
    }

    #[inline]
    pub fn config(&self) -> ContextConfig {
        self.config
    }

    #[inline]
    pub fn build(self) -> Context {
        Context::initialize(self.config)
    }
}

#[inline]
fn utc_offset() -> FixedOffset {
    FixedOffset::east_opt(0).expect("zero offset is always valid")
}

/// Parses `Z`, `UTC`, `+HH`, `+HHMM` and `+HH:MM` (and their `-` forms).
pub fn parse_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Some(utc_offset());
    }
    let (sign, digits) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (
            digits[..2].parse::<i32>().ok()?,
            digits[2..].parse::<i32>().ok()?,
        ),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
