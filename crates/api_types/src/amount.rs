use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Non-negative money amount represented as **integer hundredths**.
///
/// The API exchanges amounts as decimal numbers (`350.5`) or, when the
/// backend reads them from a `DECIMAL` column, as decimal strings
/// (`"350.50"`). Both decode into the same value.
///
/// # Examples
///
/// ```rust
/// use api_types::Amount;
///
/// assert_eq!("10".parse::<Amount>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Amount>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Amount>().is_err());
/// assert!("-1".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(u64);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must not be negative")]
    Negative,
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("amount has more than 2 decimals")]
    TooManyDecimals,
    #[error("amount is too large")]
    Overflow,
}

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns the amount as a floating point number of major units.
    ///
    /// Only used on the wire and for ratios; never accumulate with it.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Ratio of `self` to `total` in `[0, 1]`, `0.0` when `total` is zero.
    #[must_use]
    pub fn share_of(self, total: Amount) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        (self.0 as f64 / total.0 as f64).clamp(0.0, 1.0)
    }

    /// Parses a decimal string, rounding half-up past the second decimal.
    ///
    /// Used for values coming from the server, where a `DECIMAL` column or a
    /// float may carry more precision than we display.
    pub fn parse_lenient(raw: &str) -> Result<Self, AmountError> {
        parse_decimal(raw, true)
    }

    fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::Invalid(value.to_string()));
        }
        if value < 0.0 {
            return Err(AmountError::Negative);
        }
        let cents = (value * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(AmountError::Overflow);
        }
        Ok(Self(cents as u64))
    }
}

fn parse_decimal(raw: &str, round: bool) -> Result<Amount, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative);
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let normalized = unsigned.replace(',', ".");

    let (whole, frac) = match normalized.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (normalized.as_str(), ""),
    };

    let invalid = || AmountError::Invalid(raw.trim().to_string());
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    if frac.len() > 2 && !round {
        return Err(AmountError::TooManyDecimals);
    }

    let whole_value: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };

    let digits = frac.as_bytes();
    let digit = |idx: usize| digits.get(idx).map_or(0, |d| u64::from(d - b'0'));
    let mut frac_value = digit(0) * 10 + digit(1);
    let round_up = digits.len() > 2 && digit(2) >= 5;
    if round_up {
        frac_value += 1;
    }

    whole_value
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(frac_value))
        .map(Amount)
        .ok_or(AmountError::Overflow)
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s, false)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Whole amounts go out as JSON integers and are exact over the full range.
/// Fractional amounts go out as floats, exact up to 2^53 cents.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_u64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

struct AmountVisitor;

impl de::Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative decimal number or decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        v.checked_mul(100)
            .map(Amount)
            .ok_or_else(|| E::custom(AmountError::Overflow))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        let v = u64::try_from(v).map_err(|_| E::custom(AmountError::Negative))?;
        self.visit_u64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Amount::from_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::parse_lenient(v).map_err(E::custom)
    }

    // A record without a recorded amount counts as zero.
    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_input() {
        assert_eq!("350.50".parse::<Amount>().unwrap().cents(), 35050);
        assert_eq!("350.5".parse::<Amount>().unwrap().cents(), 35050);
        assert_eq!(" 12 ".parse::<Amount>().unwrap().cents(), 1200);
        assert_eq!(".5".parse::<Amount>().unwrap().cents(), 50);
        assert_eq!("+3".parse::<Amount>().unwrap().cents(), 300);
    }

    #[test]
    fn rejects_bad_user_input() {
        assert_eq!("".parse::<Amount>(), Err(AmountError::Empty));
        assert_eq!("-1".parse::<Amount>(), Err(AmountError::Negative));
        assert_eq!("1.234".parse::<Amount>(), Err(AmountError::TooManyDecimals));
        assert!(matches!("abc".parse::<Amount>(), Err(AmountError::Invalid(_))));
        assert!(matches!("1.2.3".parse::<Amount>(), Err(AmountError::Invalid(_))));
        assert!(matches!(".".parse::<Amount>(), Err(AmountError::Invalid(_))));
    }

    #[test]
    fn lenient_parse_rounds_half_up() {
        assert_eq!(Amount::parse_lenient("1.005").unwrap().cents(), 101);
        assert_eq!(Amount::parse_lenient("1.004").unwrap().cents(), 100);
        assert_eq!(Amount::parse_lenient("0.999").unwrap().cents(), 100);
    }

    #[test]
    fn decodes_numbers_and_decimal_strings() {
        let from_int: Amount = serde_json::from_str("50").unwrap();
        let from_float: Amount = serde_json::from_str("50.0").unwrap();
        let from_str: Amount = serde_json::from_str("\"50.00\"").unwrap();
        assert_eq!(from_int.cents(), 5000);
        assert_eq!(from_float, from_int);
        assert_eq!(from_str, from_int);

        let fractional: Amount = serde_json::from_str("0.1").unwrap();
        assert_eq!(fractional.cents(), 10);
    }

    #[test]
    fn rejects_negative_wire_values() {
        assert!(serde_json::from_str::<Amount>("-5").is_err());
        assert!(serde_json::from_str::<Amount>("-5.5").is_err());
    }

    #[test]
    fn null_decodes_as_zero() {
        assert_eq!(serde_json::from_str::<Amount>("null").unwrap(), Amount::ZERO);
        assert_eq!(
            serde_json::from_str::<Option<Amount>>("null").unwrap(),
            None
        );
    }

    #[test]
    fn encodes_as_number() {
        let json = serde_json::to_string(&Amount::from_cents(35050)).unwrap();
        assert_eq!(json, "350.5");
        assert_eq!(serde_json::to_string(&Amount::from_cents(5000)).unwrap(), "50");
    }

    #[test]
    fn large_whole_amounts_encode_exactly() {
        let cents = (u64::MAX / 100) * 100;
        let json = serde_json::to_string(&Amount::from_cents(cents)).unwrap();
        assert_eq!(json, (u64::MAX / 100).to_string());
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cents(), cents);
    }

    #[test]
    fn display_has_two_decimals() {
        assert_eq!(Amount::from_cents(5000).to_string(), "50.00");
        assert_eq!(Amount::from_cents(7).to_string(), "0.07");
    }

    #[test]
    fn share_of_zero_total_is_zero() {
        assert_eq!(Amount::from_cents(0).share_of(Amount::ZERO), 0.0);
        assert_eq!(Amount::from_cents(50).share_of(Amount::from_cents(200)), 0.25);
    }

    #[test]
    fn sums() {
        let total: Amount = [Amount::from_cents(150), Amount::from_cents(250)]
            .iter()
            .sum();
        assert_eq!(total.cents(), 400);
    }
}
