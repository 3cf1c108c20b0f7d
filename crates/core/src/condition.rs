//! Alert conditions and the threshold evaluator.

use crate::{format_usd, AlertConfig, PriceReading};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which alert rule a condition belongs to. Each kind has its own sent flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    /// Price at or above the configured target
    TargetPrice,
    /// |24h change| at or above the configured threshold
    PercentageChange,
}

impl ConditionKind {
    pub const ALL: [ConditionKind; 2] = [ConditionKind::TargetPrice, ConditionKind::PercentageChange];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::TargetPrice => "target_price",
            ConditionKind::PercentageChange => "percentage_change",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a 24h move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Increased,
    Decreased,
}

impl Direction {
    /// Anything not strictly positive counts as a decrease.
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            Direction::Increased
        } else {
            Direction::Decreased
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Increased => "increased",
            Direction::Decreased => "decreased",
        }
    }
}

/// A triggered alert condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    TargetPrice {
        price: f64,
        target: f64,
    },
    PercentageChange {
        change: f64,
        threshold: f64,
        direction: Direction,
    },
}

impl Condition {
    pub fn kind(&self) -> ConditionKind {
        match self {
            Condition::TargetPrice { .. } => ConditionKind::TargetPrice,
            Condition::PercentageChange { .. } => ConditionKind::PercentageChange,
        }
    }

    /// Human-readable one-line summary used in logs and alert bodies.
    pub fn describe(&self) -> String {
        match self {
            Condition::TargetPrice { price, target } => format!(
                "Price reached target: {} (Target: {})",
                format_usd(*price),
                format_usd(*target)
            ),
            Condition::PercentageChange {
                change,
                threshold,
                direction,
            } => format!(
                "24h change alert: {} by {:.2}% (Threshold: ±{}%)",
                direction.as_str(),
                change.abs(),
                threshold
            ),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Evaluate both threshold rules against a reading.
///
/// A threshold of zero disables its rule. Triggered conditions are returned
/// target first, then percentage.
pub fn check_alert_conditions(
    price: f64,
    change_24h: f64,
    target_price: f64,
    percentage_change: f64,
) -> Vec<Condition> {
    let mut triggered = Vec::with_capacity(2);

    if target_price > 0.0 && price >= target_price {
        triggered.push(Condition::TargetPrice {
            price,
            target: target_price,
        });
    }

    if percentage_change > 0.0 && change_24h.abs() >= percentage_change {
        triggered.push(Condition::PercentageChange {
            change: change_24h,
            threshold: percentage_change,
            direction: Direction::of(change_24h),
        });
    }

    triggered
}

/// Evaluate a reading against the configured thresholds.
pub fn evaluate_conditions(config: &AlertConfig, reading: &PriceReading) -> Vec<Condition> {
    check_alert_conditions(
        reading.price,
        reading.change_24h,
        config.target_price,
        config.percentage_change,
    )
}
