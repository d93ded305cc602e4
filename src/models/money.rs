//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Rendering follows a [`CurrencyFormat`], which defaults to the
//! Brazilian real (`R$ 1.500,00`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(150_000); // R$ 1.500,00
    /// assert_eq!(amount.units(), 1500);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", CurrencyFormat::default().format_currency(*self))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// How amounts are rendered and read back from text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Currency symbol placed before the amount
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Separator between whole units and cents
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    /// Separator between groups of three digits
    #[serde(default = "default_grouping_separator")]
    pub grouping_separator: char,

    /// Largest value the amount input mask will produce
    #[serde(default = "default_max_input")]
    pub max_input: Money,
}

fn default_symbol() -> String {
    "R$".to_string()
}

fn default_decimal_separator() -> char {
    ','
}

fn default_grouping_separator() -> char {
    '.'
}

fn default_max_input() -> Money {
    Money::from_units_cents(500_000, 0)
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_separator: default_decimal_separator(),
            grouping_separator: default_grouping_separator(),
            max_input: default_max_input(),
        }
    }
}

impl CurrencyFormat {
    /// Check that amounts rendered with this format read back unchanged
    ///
    /// The two separators must differ and neither may be a digit, the symbol
    /// may not contain digits, and the input cap may not be negative.
    pub fn check(&self) -> Result<(), String> {
        if self.decimal_separator == self.grouping_separator {
            return Err(format!(
                "decimal and grouping separators are both '{}'",
                self.decimal_separator
            ));
        }
        if let Some(sep) = [self.decimal_separator, self.grouping_separator]
            .into_iter()
            .find(char::is_ascii_digit)
        {
            return Err(format!("separator '{}' is a digit", sep));
        }
        if self.symbol.chars().any(|c| c.is_ascii_digit()) {
            return Err(format!("currency symbol '{}' contains a digit", self.symbol));
        }
        if self.max_input.is_negative() {
            return Err(format!("input cap {} is negative", self.max_input.cents()));
        }
        Ok(())
    }

    /// Render an amount with grouping, two decimals and the currency symbol
    ///
    /// ```
    /// use expense_tracker::models::{CurrencyFormat, Money};
    /// let format = CurrencyFormat::default();
    /// assert_eq!(format.format_currency(Money::from_cents(150_000)), "R$ 1.500,00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{}{} {}", sign, self.symbol, self.format_plain(amount))
    }

    /// Render an amount without symbol or sign, as shown in the edit form
    pub fn format_plain(&self, amount: Money) -> String {
        format!(
            "{}{}{:02}",
            group_digits(amount.units().unsigned_abs(), self.grouping_separator),
            self.decimal_separator,
            amount.cents_part()
        )
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
