//! Status enums.

use serde::{Deserialize, Serialize};

/// Order lifecycle status as reported in the order history.
///
/// Mirrors the four tracking steps: a freshly placed order starts out
/// `Confirmed` and ends `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Wire value (`"out_for_delivery"` etc.).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
        }
    }

    /// The status corresponding to a 1-based tracking step.
    ///
    /// Steps past the last one clamp to `Delivered`.
    #[must_use]
    pub const fn from_step(step: u8) -> Self {
        match step {
            0 | 1 => Self::Confirmed,
            2 => Self::Preparing,
            3 => Self::OutForDelivery,
            _ => Self::Delivered,
        }
    }
}

/// Availability of a support agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Online,
    Offline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).ok().as_deref(),
            Some("\"out_for_delivery\"")
        );
        assert_eq!(OrderStatus::Delivered.as_str(), "delivered");
    }

    #[test]
    fn test_from_step_clamps() {
        assert_eq!(OrderStatus::from_step(1), OrderStatus::Confirmed);
        assert_eq!(OrderStatus::from_step(3), OrderStatus::OutForDelivery);
        assert_eq!(OrderStatus::from_step(9), OrderStatus::Delivered);
    }
}
