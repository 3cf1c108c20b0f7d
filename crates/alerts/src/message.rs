//! Alert message formatting (Telegram HTML parse mode).

use chrono::{DateTime, Utc};
use pricealert_core::{format_change, format_usd, Condition, PriceReading};

/// Escape the three characters Telegram's HTML mode treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Format a triggered condition as an alert message.
pub fn format_alert_message(
    coin_id: &str,
    reading: &PriceReading,
    condition: &Condition,
    sent_at: DateTime<Utc>,
) -> String {
    format!(
        "🚨 <b>CRYPTO ALERT</b> 🚨\n\n\
         <b>Coin:</b> {}\n\
         <b>Current Price:</b> {}\n\
         <b>24h Change:</b> {}\n\n\
         ✅ {}\n\n\
         ⏰ {}",
        escape_html(&coin_id.to_uppercase()),
        format_usd(reading.price),
        format_change(reading.change_24h),
        escape_html(&condition.describe()),
        sent_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}
