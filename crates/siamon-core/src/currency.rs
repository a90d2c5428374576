//! High-precision currency amounts.
//!
//! siad reports every amount in hastings, the smallest indivisible unit
//! (1 SC = 10^24 H), encoded in JSON as a decimal string. `Currency` keeps the
//! exact integer; conversion to `f64` happens only at export time.
//!
//! The full siacoin supply is below 10^35 H, so a `u128` (about 3.4 * 10^38)
//! holds any real amount exactly. Values that do not fit are rejected at
//! decode time instead of being truncated.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// Error type for currency parsing and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// The input is not a non-negative decimal integer.
    Parse(String),
    /// The result does not fit into 128 bits.
    Overflow,
    /// Subtraction would produce a negative amount.
    Underflow { lhs: Currency, rhs: Currency },
}

impl fmt::Display for CurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyError::Parse(input) => write!(f, "invalid currency amount '{}'", input),
            CurrencyError::Overflow => write!(f, "currency overflow"),
            CurrencyError::Underflow { lhs, rhs } => {
                write!(f, "negative currency: {} - {}", lhs, rhs)
            }
        }
    }
}

impl std::error::Error for CurrencyError {}

/// A non-negative amount of hastings.
///
/// Backed by `u128` rather than an unbounded integer. Amounts above
/// `u128::MAX` (about 3.4e14 SC, far beyond the coin supply) fail to decode
/// instead of being rounded, and so does a bare JSON number that is not a
/// 64-bit integer; siad encodes currency as decimal strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency(u128);

impl Currency {
    pub const ZERO: Currency = Currency(0);

    pub const fn new(hastings: u128) -> Self {
        Currency(hastings)
    }

    pub const fn hastings(self) -> u128 {
        self.0
    }

    pub fn checked_add(self, rhs: Currency) -> Result<Currency, CurrencyError> {
        self.0
            .checked_add(rhs.0)
            .map(Currency)
            .ok_or(CurrencyError::Overflow)
    }

    /// Subtracts `rhs`, failing instead of going negative.
    pub fn checked_sub(self, rhs: Currency) -> Result<Currency, CurrencyError> {
        self.0
            .checked_sub(rhs.0)
            .map(Currency)
            .ok_or(CurrencyError::Underflow { lhs: self, rhs })
    }

    pub fn checked_mul(self, factor: u128) -> Result<Currency, CurrencyError> {
        self.0
            .checked_mul(factor)
            .map(Currency)
            .ok_or(CurrencyError::Overflow)
    }

    /// Lossy conversion; rounds to the nearest representable `f64`.
    pub fn to_f64(self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CurrencyError::Parse(s.to_string()));
        }
        digits
            .parse::<u128>()
            .map(Currency)
            .map_err(|_| CurrencyError::Overflow)
    }
}

impl From<u64> for Currency {
    fn from(hastings: u64) -> Self {
        Currency(u128::from(hastings))
    }
}

struct CurrencyVisitor;

impl Visitor<'_> for CurrencyVisitor {
    type Value = Currency;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer amount as a decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Currency, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Currency, E> {
        Ok(Currency::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Currency, E> {
        u64::try_from(v)
            .map(Currency::from)
            .map_err(|_| E::custom(CurrencyError::Parse(v.to_string())))
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CurrencyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_string() {
        let c: Currency = "1000000000000000000000000".parse().unwrap();
        assert_eq!(c.hastings(), 1_000_000_000_000_000_000_000_000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!("".parse::<Currency>(), Err(CurrencyError::Parse(_))));
        assert!(matches!("-5".parse::<Currency>(), Err(CurrencyError::Parse(_))));
        assert!(matches!("1.5".parse::<Currency>(), Err(CurrencyError::Parse(_))));
        assert!(matches!("12abc".parse::<Currency>(), Err(CurrencyError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_values_beyond_128_bits() {
        // u128::MAX + 1
        let too_big = "340282366920938463463374607431768211456";
        assert_eq!(too_big.parse::<Currency>(), Err(CurrencyError::Overflow));
    }

    #[test]
    fn test_deserialize_string_and_number() {
        let from_str: Currency = serde_json::from_str("\"42\"").unwrap();
        let from_num: Currency = serde_json::from_str("42").unwrap();
        assert_eq!(from_str, Currency::new(42));
        assert_eq!(from_num, Currency::new(42));
        assert!(serde_json::from_str::<Currency>("-1").is_err());
        assert!(serde_json::from_str::<Currency>("\"x\"").is_err());
    }

    #[test]
    fn test_checked_sub_reports_underflow() {
        let err = Currency::new(3).checked_sub(Currency::new(5)).unwrap_err();
        assert_eq!(
            err,
            CurrencyError::Underflow {
                lhs: Currency::new(3),
                rhs: Currency::new(5)
            }
        );
        assert_eq!(err.to_string(), "negative currency: 3 - 5");
        assert_eq!(
            Currency::new(5).checked_sub(Currency::new(5)),
            Ok(Currency::ZERO)
        );
    }

    #[test]
    fn test_checked_add_and_mul_overflow() {
        let max = Currency::new(u128::MAX);
        assert_eq!(max.checked_add(Currency::new(1)), Err(CurrencyError::Overflow));
        assert_eq!(max.checked_mul(2), Err(CurrencyError::Overflow));
        assert_eq!(Currency::new(7).checked_mul(6), Ok(Currency::new(42)));
    }
}
