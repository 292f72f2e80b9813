//! Fixed-point decimal used for intent weights and stake amounts.
//!
//! A `Dec` is stored as raw units (u128) scaled by 10^18, the same precision
//! cosmos chains use for their decimal type. Weights are never negative, so
//! the representation is unsigned.
//!
//! Rounding: every multiplication and division truncates toward zero. The
//! only rounding-to-nearest is [`Dec::round_int`], which is meant for display
//! and for comparing computed amounts against whole-token figures.

use crate::error::IntentError;
use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Number of fractional decimal digits.
pub const PRECISION: u32 = 18;

const SCALE: u128 = 1_000_000_000_000_000_000;

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(u128);

impl Dec {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(SCALE);

    /// Wrap raw units (value × 10^18).
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// A whole number. Every `u64` fits without overflow.
    pub fn from_int(n: u64) -> Self {
        Self(n as u128 * SCALE)
    }

    /// A whole number from a `u128`, `None` if it exceeds the representable range.
    pub fn checked_from_int(n: u128) -> Option<Self> {
        n.checked_mul(SCALE).map(Self)
    }

    /// `numerator / denominator`, truncated. `None` on a zero denominator or overflow.
    pub fn from_ratio(numerator: u128, denominator: u128) -> Option<Self> {
        mul_div(numerator, SCALE, denominator).map(Self)
    }

    /// `p / 100`.
    pub fn percent(p: u64) -> Self {
        Self(p as u128 * (SCALE / 100))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Truncating multiplication.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        mul_div(self.0, other.0, SCALE).map(Self)
    }

    /// Truncating division. `None` when `other` is zero or the quotient overflows.
    pub fn checked_div(self, other: Self) -> Option<Self> {
        mul_div(self.0, SCALE, other.0).map(Self)
    }

    /// Truncating division that names the failure.
    pub fn try_div(self, other: Self) -> Result<Self, IntentError> {
        if other.is_zero() {
            return Err(IntentError::DivisionByZero);
        }
        self.checked_div(other).ok_or(IntentError::Overflow)
    }

    pub fn abs_diff(self, other: Self) -> Self {
        Self(self.0.abs_diff(other.0))
    }

    /// Sum an iterator of decimals, `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Dec>>(iter: I) -> Option<Self> {
        iter.into_iter().try_fold(Self::ZERO, Self::checked_add)
    }

    /// Integer part, discarding the fraction.
    pub fn floor_int(&self) -> u128 {
        self.0 / SCALE
    }

    /// Nearest integer, halves rounded away from zero.
    pub fn round_int(&self) -> u128 {
        let whole = self.0 / SCALE;
        if self.0 % SCALE >= SCALE / 2 {
            whole + 1
        } else {
            whole
        }
    }
}

/// `a * b / d` with a 256-bit intermediate product, truncated.
///
/// Returns `None` if `d` is zero or the quotient does not fit in a u128.
fn mul_div(a: u128, b: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    let quotient = U256::from(a) * U256::from(b) / U256::from(d);
    if quotient > U256::from(u128::MAX) {
        return None;
    }
    Some(quotient.low_u128())
}

impl Add for Dec {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:018}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({self})")
    }
}

impl FromStr for Dec {
    type Err = IntentError;

    /// Parse a plain decimal string such as `"1000"` or `"0.25"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IntentError::InvalidDecimal(s.to_string());
        let (whole_part, frac_part) = match s.split_once('.') {
            Some((w, fr)) if !fr.is_empty() => (w, fr),
            Some(_) => return Err(invalid()),
            None => (s, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole_part.is_empty() || !all_digits(whole_part) || !all_digits(frac_part) {
            return Err(invalid());
        }
        if frac_part.len() > PRECISION as usize {
            return Err(invalid());
        }

        let whole: u128 = whole_part.parse().map_err(|_| invalid())?;
        let frac: u128 = if frac_part.is_empty() {
            0
        } else {
            let digits: u128 = frac_part.parse().map_err(|_| invalid())?;
            digits * 10u128.pow(PRECISION - frac_part.len() as u32)
        };
        whole
            .checked_mul(SCALE)
            .and_then(|w| w.checked_add(frac))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
