//! Display-only currency formatting.
//!
//! Nothing here converts between currencies or feeds back into a
//! calculation: callers format a finished result with whichever currency
//! preference they hold.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinCalcError;
use crate::types::Money;

const LAKH: Decimal = dec!(100_000);
const CRORE: Decimal = dec!(10_000_000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    AED,
}

/// Static presentation data for a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyConfig {
    pub code: CurrencyCode,
    pub symbol: &'static str,
    pub name: &'static str,
    pub locale: &'static str,
    pub flag: &'static str,
}

/// How a locale groups integer digits.
#[derive(Debug, Clone, Copy)]
enum Grouping {
    /// 12,34,56,789
    Indian,
    /// 123,456,789 with the given separator
    Thousands(char),
}

impl Grouping {
    fn separator(self) -> char {
        match self {
            Grouping::Indian => ',',
            Grouping::Thousands(sep) => sep,
        }
    }

    /// Decimal mark of a locale that groups with this separator.
    fn decimal_mark(self) -> char {
        if self.separator() == '.' {
            ','
        } else {
            '.'
        }
    }
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 5] = [
        CurrencyCode::INR,
        CurrencyCode::USD,
        CurrencyCode::EUR,
        CurrencyCode::GBP,
        CurrencyCode::AED,
    ];

    pub fn config(self) -> CurrencyConfig {
        match self {
            CurrencyCode::INR => CurrencyConfig {
                code: self,
                symbol: "₹",
                name: "Indian Rupee",
                locale: "en-IN",
                flag: "IN",
            },
            CurrencyCode::USD => CurrencyConfig {
                code: self,
                symbol: "$",
                name: "US Dollar",
                locale: "en-US",
                flag: "US",
            },
            CurrencyCode::EUR => CurrencyConfig {
                code: self,
                symbol: "€",
                name: "Euro",
                locale: "de-DE",
                flag: "EU",
            },
            CurrencyCode::GBP => CurrencyConfig {
                code: self,
                symbol: "£",
                name: "British Pound",
                locale: "en-GB",
                flag: "UK",
            },
            CurrencyCode::AED => CurrencyConfig {
                code: self,
                symbol: "د.إ",
                name: "UAE Dirham",
                locale: "ar-AE",
                flag: "AE",
            },
        }
    }

    pub fn symbol(self) -> &'static str {
        self.config().symbol
    }

    /// "Indian Rupee (₹)"
    pub fn display_name(self) -> String {
        let config = self.config();
        format!("{} ({})", config.name, config.symbol)
    }

    /// The currency whose symbol appears in `text`, if any.
    pub fn detect(text: &str) -> Option<CurrencyCode> {
        CurrencyCode::ALL
            .into_iter()
            .find(|c| text.contains(c.symbol()))
    }

    fn grouping(self) -> Grouping {
        match self {
            CurrencyCode::INR => Grouping::Indian,
            CurrencyCode::EUR => Grouping::Thousands('.'),
            CurrencyCode::USD | CurrencyCode::GBP | CurrencyCode::AED => Grouping::Thousands(','),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CurrencyCode::INR => "INR",
            CurrencyCode::USD => "USD",
            CurrencyCode::EUR => "EUR",
            CurrencyCode::GBP => "GBP",
            CurrencyCode::AED => "AED",
        };
        f.write_str(code)
    }
}

impl FromStr for CurrencyCode {
    type Err = FinCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        CurrencyCode::ALL
            .into_iter()
            .find(|c| c.to_string() == wanted)
            .ok_or_else(|| FinCalcError::UnknownCurrency(s.to_string()))
    }
}

/// All supported currencies, in picker order.
pub fn currencies() -> Vec<CurrencyConfig> {
    CurrencyCode::ALL.iter().map(|c| c.config()).collect()
}

/// Whole-unit amount with locale grouping and the currency symbol,
/// e.g. `₹12,34,568`, `$1,234,568`, `1.234.568 €`.
pub fn format_currency(amount: Money, code: CurrencyCode) -> String {
    let digits = format_number(amount.abs(), code);
    let sign = if round_whole(amount) < Decimal::ZERO { "-" } else { "" };
    match code {
        CurrencyCode::EUR => format!("{sign}{digits} {}", code.symbol()),
        CurrencyCode::AED => format!("{sign}{} {digits}", code.symbol()),
        _ => format!("{sign}{}{digits}", code.symbol()),
    }
}

/// Whole-unit amount with locale grouping and no symbol.
pub fn format_number(value: Decimal, code: CurrencyCode) -> String {
    let rounded = round_whole(value);
    let digits = rounded.abs().trunc().to_string();
    let grouped = match code.grouping() {
        Grouping::Indian => group_indian(&digits),
        Grouping::Thousands(sep) => group_thousands(&digits, sep),
    };
    if rounded < Decimal::ZERO {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Rupee amount abbreviated to crores or lakhs: `₹ 1.50 Cr`, `₹ 2.50 L`,
/// otherwise the full `₹12,345` form.
pub fn format_compact_inr(amount: Money) -> String {
    if amount >= CRORE {
        format!("₹ {:.2} Cr", round_two(amount / CRORE))
    } else if amount >= LAKH {
        format!("₹ {:.2} L", round_two(amount / LAKH))
    } else {
        format_currency(amount, CurrencyCode::INR)
    }
}

/// Lenient parse of a formatted amount; anything unreadable is zero.
///
/// The currency is recognised from its symbol, so `1.234 €` reads as
/// 1234. Text without a known symbol is read with INR conventions.
pub fn parse_currency(text: &str) -> Money {
    parse_currency_in(text, CurrencyCode::detect(text).unwrap_or_default())
}

/// Lenient parse of an amount formatted in `code`: the symbol, grouping
/// separators and whitespace are dropped and the locale's decimal mark is
/// honoured.
pub fn parse_currency_in(text: &str, code: CurrencyCode) -> Money {
    let grouping = code.grouping();
    let cleaned: String = text
        .replace(code.symbol(), "")
        .chars()
        .filter(|c| *c != grouping.separator())
        .map(|c| if c == grouping.decimal_mark() { '.' } else { c })
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn round_two(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}
