//! Parsing of capacity arguments
//!
//! Capacities handed in from outside Rust (signed integers from bindings,
//! numbers from configuration text) are validated here before planning.

use core::fmt;
use core::str::FromStr;

use crate::BitMapError;

/// A validated, inclusive bit map capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Capacity(u64);

impl Capacity {
    /// Wrap an already non-negative capacity
    pub const fn new(max: u64) -> Self {
        Self(max)
    }

    /// Largest representable key
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Capacity {
    fn from(max: u64) -> Self {
        Self(max)
    }
}

impl From<u32> for Capacity {
    fn from(max: u32) -> Self {
        Self(u64::from(max))
    }
}

impl TryFrom<i64> for Capacity {
    type Error = BitMapError;

    fn try_from(max: i64) -> Result<Self, Self::Error> {
        u64::try_from(max)
            .map(Self)
            .map_err(|_| BitMapError::InvalidArgument)
    }
}

impl TryFrom<i128> for Capacity {
    type Error = BitMapError;

    fn try_from(max: i128) -> Result<Self, Self::Error> {
        u64::try_from(max)
            .map(Self)
            .map_err(|_| BitMapError::InvalidArgument)
    }
}

impl FromStr for Capacity {
    type Err = BitMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_capacity(s).map(Self)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a decimal capacity string
///
/// Surrounding whitespace is ignored. Signs, other characters, empty input
/// and values above `u64::MAX` are rejected with `InvalidArgument`.
pub fn parse_capacity(s: &str) -> Result<u64, BitMapError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(BitMapError::InvalidArgument);
    }

    let mut result: u64 = 0;

    for byte in s.bytes() {
        if !byte.is_ascii_digit() {
            return Err(BitMapError::InvalidArgument);
        }

        let digit = u64::from(byte - b'0');

        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(BitMapError::InvalidArgument)?;
    }

    Ok(result)
}
