//! Telegram alert delivery for price conditions.
//!
//! This crate provides:
//! - The [`Notifier`] trait the monitor loop sends through
//! - A Telegram Bot API implementation
//! - HTML alert message formatting

pub mod message;
pub mod notifier;
pub mod telegram;

pub use message::{escape_html, format_alert_message};
pub use notifier::{Notifier, NotifyError};
pub use telegram::{TelegramNotifier, TELEGRAM_API_URL};
