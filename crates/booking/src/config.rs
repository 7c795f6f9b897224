//! Orchestrator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a failed confirmation means for the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPolicy {
    /// Log and count the failure; the booking still succeeds.
    #[default]
    BestEffort,

    /// Undo the booking (record, room, payment) and fail the call.
    Required,
}

impl NotificationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationPolicy::BestEffort => "best_effort",
            NotificationPolicy::Required => "required",
        }
    }
}

impl std::fmt::Display for NotificationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NotificationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best_effort" | "best-effort" => Ok(NotificationPolicy::BestEffort),
            "required" => Ok(NotificationPolicy::Required),
            other => Err(format!("unknown notification policy: {other}")),
        }
    }
}

/// Tunables for [`BookingOrchestrator`](crate::BookingOrchestrator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    pub notification_policy: NotificationPolicy,
    /// Upper bound on a single payment gateway call.
    pub payment_timeout: Duration,
    /// Upper bound on a single confirmation call.
    pub notification_timeout: Duration,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            notification_policy: NotificationPolicy::BestEffort,
            payment_timeout: Duration::from_secs(5),
            notification_timeout: Duration::from_secs(2),
        }
    }
}
