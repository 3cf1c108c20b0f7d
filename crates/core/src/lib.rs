//! Core data types for the price alert bot.

pub mod condition;
pub mod config;
pub mod price;
pub mod state;

pub use condition::*;
pub use config::*;
pub use price::*;
pub use state::*;
