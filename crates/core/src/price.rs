//! Price readings and USD display formatting.

use serde::{Deserialize, Serialize};

/// Quote currency requested from the price API.
pub const QUOTE_CURRENCY: &str = "usd";

/// A single poll result: spot price and 24h percent change, both in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceReading {
    /// Current price in USD
    pub price: f64,
    /// 24h change in percent (e.g. -12.5 means down 12.5%)
    pub change_24h: f64,
}

impl PriceReading {
    pub fn new(price: f64, change_24h: f64) -> Self {
        Self { price, change_24h }
    }
}

/// Format a USD amount with thousands separators and two decimals.
///
/// `50000.0` becomes `$50,000.00`, `-1234.5` becomes `-$1,234.50`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" would be misleading for tiny negative values
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

/// Format a percent change with an explicit sign, e.g. `+1.23%`.
pub fn format_change(change: f64) -> String {
    format!("{:+.2}%", change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_usd_grouping() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(50000.0), "$50,000.00");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(0.5), "$0.50");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(-1234.5), "-$1,234.50");
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn test_format_change_sign() {
        assert_eq!(format_change(1.234), "+1.23%");
        assert_eq!(format_change(-12.5), "-12.50%");
        assert_eq!(format_change(0.0), "+0.00%");
    }

    #[test]
    fn test_reading_serialization() {
        let reading = PriceReading::new(50000.0, -2.5);
        let json = serde_json::to_string(&reading).unwrap();
        let parsed: PriceReading = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reading);
    }
}
