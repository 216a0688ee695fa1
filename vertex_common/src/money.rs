use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

//--------------------------------------     Usdt       --------------------------------------------------------------
/// An amount of USDT. Order amounts carry at most 2 decimal places, which is
/// enforced at validation time, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Usdt(Decimal);

impl Usdt {
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Convert to roubles at the given USDT/RUB rate.
    pub fn convert(&self, rate: Decimal) -> Rub {
        Rub::from(self.0 * rate)
    }
}

impl From<Decimal> for Usdt {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Display for Usdt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} USDT", self.0.normalize())
    }
}

//--------------------------------------     Rub        --------------------------------------------------------------
/// An amount of roubles. Displays with two decimal places and space-grouped
/// thousands, e.g. `12 345.67 RUB`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rub(Decimal);

impl Rub {
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Rub {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Display for Rub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} RUB", group_thousands(&format!("{:.2}", self.0.round_dp(2))))
    }
}

/// Insert a space between every group of three integer digits.
fn group_thousands(s: &str) -> String {
    let (sign, rest) = s.strip_prefix('-').map_or(("", s), |r| ("-", r));
    let (int_part, frac_part) = rest.split_once('.').map_or((rest, ""), |(i, f)| (i, f));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    let offset = int_part.len() % 3;
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && i % 3 == offset % 3 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
