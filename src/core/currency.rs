use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies a service can be priced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Bangladeshi Taka
    BDT,
    /// US Dollar
    USD,
}

impl Default for Currency {
    fn default() -> Self {
        Currency::BDT
    }
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::BDT => "BDT",
            Currency::USD => "USD",
        }
    }

    /// Display symbol used in invoices
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BDT => "৳",
            Currency::USD => "$",
        }
    }

    /// Formats an amount for display: symbol, thousands separators, at most 2 decimals
    pub fn format_amount(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(2).normalize();
        let text = rounded.abs().to_string();
        let (whole, frac) = match text.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (text.as_str(), None),
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, ch) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        match frac {
            Some(f) => format!("{} {}{}.{}", self.symbol(), sign, grouped, f),
            None => format!("{} {}{}", self.symbol(), sign, grouped),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BDT" => Ok(Currency::BDT),
            "USD" => Ok(Currency::USD),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}
