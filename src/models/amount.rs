//! Amount text handling
//!
//! Two readings of user-typed amounts exist:
//!
//! - the input mask ([`CurrencyFormat::parse_amount_input`]) treats every
//!   typed digit as a minor unit, so typing `1`, `5`, `0`, `0`, `0`, `0`
//!   yields `1.500,00` as the user types;
//! - the form validation ([`CurrencyFormat::parse_amount`]) reads the text as
//!   a decimal number using the locale decimal separator, so `10` is ten
//!   units and `1.500,00` is fifteen hundred.

use super::money::{CurrencyFormat, Money};

/// Result of normalizing the amount input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountInput {
    /// No digit was left after stripping; the field is unset
    Empty,
    /// A normalized two-decimal value
    Value(Money),
}

impl AmountInput {
    pub fn value(&self) -> Option<Money> {
        match self {
            Self::Empty => None,
            Self::Value(amount) => Some(*amount),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

// i64::MAX has 19 digits; anything longer is over any sane cap anyway.
const MAX_MASK_DIGITS: usize = 18;

impl CurrencyFormat {
    /// Normalize raw amount-field text into cents
    ///
    /// Everything except digits is dropped and the remaining digits are read
    /// as cents. The value is capped at `max_input`.
    ///
    /// ```
    /// use expense_tracker::models::{AmountInput, CurrencyFormat, Money};
    /// let format = CurrencyFormat::default();
    /// assert_eq!(
    ///     format.parse_amount_input("R$ 1.500,00"),
    ///     AmountInput::Value(Money::from_cents(150_000))
    /// );
    /// assert_eq!(format.parse_amount_input("abc"), AmountInput::Empty);
    /// ```
    pub fn parse_amount_input(&self, raw: &str) -> AmountInput {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return AmountInput::Empty;
        }

        let significant = digits.trim_start_matches('0');
        if significant.len() > MAX_MASK_DIGITS {
            return AmountInput::Value(self.max_input);
        }

        let cents = if significant.is_empty() {
            0
        } else {
            match significant.parse::<i64>() {
                Ok(cents) => cents,
                Err(_) => return AmountInput::Value(self.max_input),
            }
        };

        AmountInput::Value(Money::from_cents(cents).min(self.max_input))
    }

    /// Read a decimal amount as typed into the expense form
    ///
    /// Grouping separators, currency symbols and signs are stripped; the
    /// first decimal separator splits units from cents and anything after a
    /// second separator is ignored. A third fractional digit rounds half-up.
    /// Returns `None` when no number can be read or it does not fit.
    pub fn parse_amount(&self, raw: &str) -> Option<Money> {
        let separator = self.decimal_separator;
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == separator)
            .collect();

        let (whole, fraction) = match cleaned.split_once(separator) {
            Some((whole, rest)) => (whole, rest.split(separator).next().unwrap_or("")),
            None => (cleaned.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().ok()?
        };

        let mut fraction_digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = fraction_digits.next().unwrap_or(0);
        let hundredths = fraction_digits.next().unwrap_or(0);
        let round_up = fraction_digits.next().is_some_and(|d| d >= 5);

        let cents = units
            .checked_mul(100)?
            .checked_add(tenths * 10 + hundredths)?
            .checked_add(i64::from(round_up))?;

        Some(Money::from_cents(cents))
    }
}

/// Render an amount in the default (pt-BR) currency format
pub fn format_currency(amount: Money) -> String {
    CurrencyFormat::default().format_currency(amount)
}

/// Normalize amount-field text using the default (pt-BR) format and cap
pub fn parse_amount_input(raw: &str) -> AmountInput {
    CurrencyFormat::default().parse_amount_input(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(value: i64) -> AmountInput {
        AmountInput::Value(Money::from_cents(value))
    }

    #[test]
    fn test_mask_reads_digits_as_cents() {
        assert_eq!(parse_amount_input("1"), cents(1));
        assert_eq!(parse_amount_input("15"), cents(15));
        assert_eq!(parse_amount_input("1500,00"), cents(150_000));
        assert_eq!(parse_amount_input("1.500,00"), cents(150_000));
        assert_eq!(parse_amount_input("R$ 12,34"), cents(1234));
    }

    #[test]
    fn test_mask_empty_input() {
        assert_eq!(parse_amount_input(""), AmountInput::Empty);
        assert_eq!(parse_amount_input("abc"), AmountInput::Empty);
        assert_eq!(parse_amount_input(",."), AmountInput::Empty);
        assert!(parse_amount_input("R$").value().is_none());
    }

    #[test]
    fn test_mask_leading_zeros() {
        assert_eq!(parse_amount_input("0,05"), cents(5));
        assert_eq!(parse_amount_input("000"), cents(0));
    }

    #[test]
    fn test_mask_caps_extreme_values() {
        assert_eq!(parse_amount_input("50000001"), cents(50_000_000));
        assert_eq!(parse_amount_input("500.000,00"), cents(50_000_000));
        assert_eq!(
            parse_amount_input("99999999999999999999999999"),
            cents(50_000_000)
        );
    }

    #[test]
    fn test_mask_round_trips_formatted_values() {
        for value in [0, 1, 99, 100, 1050, 150_000, 123_456, 49_999_999, 50_000_000] {
            let amount = Money::from_cents(value);
            assert_eq!(
                parse_amount_input(&format_currency(amount)),
                AmountInput::Value(amount),
                "round trip of {}",
                value
            );
        }
    }

    #[test]
    fn test_parse_amount_decimal() {
        let format = CurrencyFormat::default();
        assert_eq!(format.parse_amount("1500,00"), Some(Money::from_cents(150_000)));
        assert_eq!(format.parse_amount("10,00"), Some(Money::from_cents(1000)));
        assert_eq!(format.parse_amount("10"), Some(Money::from_cents(1000)));
        assert_eq!(format.parse_amount("10,5"), Some(Money::from_cents(1050)));
        assert_eq!(format.parse_amount(",50"), Some(Money::from_cents(50)));
        assert_eq!(format.parse_amount("R$ 1.500,00"), Some(Money::from_cents(150_000)));
    }

    #[test]
    fn test_parse_amount_rounds_third_digit() {
        let format = CurrencyFormat::default();
        assert_eq!(format.parse_amount("1,005"), Some(Money::from_cents(101)));
        assert_eq!(format.parse_amount("1,004"), Some(Money::from_cents(100)));
    }

    #[test]
    fn test_parse_amount_stops_at_second_separator() {
        let format = CurrencyFormat::default();
        assert_eq!(format.parse_amount("1,2,3"), Some(Money::from_cents(120)));
    }

    #[test]
    fn test_parse_amount_sign_is_stripped() {
        let format = CurrencyFormat::default();
        assert_eq!(format.parse_amount("-10,00"), Some(Money::from_cents(1000)));
    }

    #[test]
    fn test_parse_amount_rejects_non_numbers() {
        let format = CurrencyFormat::default();
        assert_eq!(format.parse_amount(""), None);
        assert_eq!(format.parse_amount("abc"), None);
        assert_eq!(format.parse_amount(","), None);
        assert_eq!(format.parse_amount("99999999999999999999"), None);
    }
}
