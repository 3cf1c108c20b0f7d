//! Per-condition alert-sent flags.

use crate::{Condition, ConditionKind};
use serde::{Deserialize, Serialize};

/// Tracks which conditions have already been notified.
///
/// A set flag suppresses duplicate sends. It is cleared once its own
/// condition is observed false, independent of the other flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    pub target_price_sent: bool,
    pub percentage_change_sent: bool,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_sent(&self, kind: ConditionKind) -> bool {
        match kind {
            ConditionKind::TargetPrice => self.target_price_sent,
            ConditionKind::PercentageChange => self.percentage_change_sent,
        }
    }

    pub fn mark_sent(&mut self, kind: ConditionKind) {
        *self.flag_mut(kind) = true;
    }

    pub fn clear(&mut self, kind: ConditionKind) {
        *self.flag_mut(kind) = false;
    }

    /// Clear every flag whose condition is absent from `triggered`.
    pub fn rearm_cleared(&mut self, triggered: &[Condition]) {
        for kind in ConditionKind::ALL {
            if !triggered.iter().any(|c| c.kind() == kind) {
                self.clear(kind);
            }
        }
    }

    fn flag_mut(&mut self, kind: ConditionKind) -> &mut bool {
        match kind {
            ConditionKind::TargetPrice => &mut self.target_price_sent,
            ConditionKind::PercentageChange => &mut self.percentage_change_sent,
        }
    }
}
