//! Time values with explicit units.
//!
//! Clock periods, uncertainties, and delay budgets are written as a number
//! with a unit suffix, e.g. `"2ns"` or `"0.1ns"`. Values are kept in their
//! original unit so that serializing a loaded configuration reproduces the
//! input text.

use std::fmt;

use serde::{Serialize, Serializer};

/// Supported time units, femtoseconds through seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Fs,
    Ps,
    Ns,
    Us,
    Ms,
    S,
}

impl TimeUnit {
    /// All unit suffixes, in ascending magnitude.
    pub const ALL: &'static [&'static str] = &["fs", "ps", "ns", "us", "ms", "s"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Fs => "fs",
            TimeUnit::Ps => "ps",
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "us",
            TimeUnit::Ms => "ms",
            TimeUnit::S => "s",
        }
    }

    /// Multiplier to femtoseconds.
    fn femtos(&self) -> f64 {
        match self {
            TimeUnit::Fs => 1.0,
            TimeUnit::Ps => 1e3,
            TimeUnit::Ns => 1e6,
            TimeUnit::Us => 1e9,
            TimeUnit::Ms => 1e12,
            TimeUnit::S => 1e15,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "fs" => Some(TimeUnit::Fs),
            "ps" => Some(TimeUnit::Ps),
            "ns" => Some(TimeUnit::Ns),
            "us" => Some(TimeUnit::Us),
            "ms" => Some(TimeUnit::Ms),
            "s" => Some(TimeUnit::S),
            _ => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-negative time quantity with a unit, e.g. `2ns`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeValue {
    value: f64,
    unit: TimeUnit,
}

impl TimeValue {
    /// Parse a string of the form `<number><unit>`, e.g. `"0.1ns"`.
    ///
    /// Negative quantities are rejected; the grammar only admits durations.
    /// On failure returns a human-readable reason; the caller attaches the
    /// key path.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| format!("'{}' has no time unit (expected one of: {})", s, TimeUnit::ALL.join(", ")))?;
        let (number, suffix) = s.split_at(split);
        let unit = TimeUnit::parse(suffix).ok_or_else(|| {
            format!(
                "unknown time unit '{}' (expected one of: {})",
                suffix,
                TimeUnit::ALL.join(", ")
            )
        })?;
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a valid number", number.trim()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(format!("time value '{}' must be finite and non-negative", s));
        }
        Ok(Self { value, unit })
    }

    /// Numeric part in the original unit.
    #[allow(dead_code)]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[allow(dead_code)]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Quantity in femtoseconds, for unit-independent comparison.
    pub fn femtoseconds(&self) -> f64 {
        self.value * self.unit.femtos()
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl Serialize for TimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
