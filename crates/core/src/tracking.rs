//! Order tracking progress.
//!
//! Delivery moves linearly through four steps. Tracking starts at the first
//! step with a 25 minute estimate and advances one step per tick, taking 10
//! minutes off the estimate each time (never below 5).

use std::time::Duration;

use serde::Serialize;

/// Time between automatic step advances.
pub const TICK: Duration = Duration::from_secs(10);

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;

const INITIAL_ESTIMATE_MINUTES: u32 = 25;
const MIN_ESTIMATE_MINUTES: u32 = 5;
const ESTIMATE_STEP_MINUTES: u32 = 10;

const STEPS: [(&str, &str); 4] = [
    ("Order Confirmed", "Your order has been received"),
    ("Preparing Order", "Your items are being prepared"),
    ("Out for Delivery", "Your order is on the way"),
    ("Delivered", "Your order has been delivered"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// One row of the tracking timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingStep {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTracking {
    current_step: u8,
    estimated_minutes: u32,
}

impl Default for OrderTracking {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderTracking {
    /// Tracking for a freshly placed order.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_step: FIRST_STEP,
            estimated_minutes: INITIAL_ESTIMATE_MINUTES,
        }
    }

    /// Tracking for an order that has already arrived.
    #[must_use]
    pub fn delivered() -> Self {
        let mut tracking = Self::new();
        while tracking.advance() {}
        tracking
    }

    /// Progress after `elapsed` time since placement, one step per [`TICK`].
    #[must_use]
    pub fn at_elapsed(elapsed: Duration) -> Self {
        let ticks = elapsed.as_secs() / TICK.as_secs();
        let mut tracking = Self::new();
        for _ in 0..ticks {
            if !tracking.advance() {
                break;
            }
        }
        tracking
    }

    /// Move to the next step. Returns `false` once delivered.
    pub fn advance(&mut self) -> bool {
        if self.current_step >= LAST_STEP {
            return false;
        }
        self.current_step += 1;
        self.estimated_minutes = self
            .estimated_minutes
            .saturating_sub(ESTIMATE_STEP_MINUTES)
            .max(MIN_ESTIMATE_MINUTES);
        true
    }

    #[must_use]
    pub const fn current_step(&self) -> u8 {
        self.current_step
    }

    #[must_use]
    pub const fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        self.current_step >= LAST_STEP
    }

    #[must_use]
    pub fn step_status(&self, step: u8) -> StepStatus {
        match step.cmp(&self.current_step) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }

    /// The full timeline with each step's status.
    #[must_use]
    pub fn steps(&self) -> Vec<TrackingStep> {
        (FIRST_STEP..)
            .zip(STEPS)
            .map(|(id, (title, description))| TrackingStep {
                id,
                title,
                description,
                status: self.step_status(id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_first_step() {
        let tracking = OrderTracking::new();
        assert_eq!(tracking.current_step(), 1);
        assert_eq!(tracking.estimated_minutes(), 25);
        assert!(!tracking.is_delivered());
    }

    #[test]
    fn test_advance_reduces_estimate_with_floor() {
        let mut tracking = OrderTracking::new();
        assert!(tracking.advance());
        assert_eq!(tracking.estimated_minutes(), 15);
        assert!(tracking.advance());
        assert_eq!(tracking.estimated_minutes(), 5);
        assert!(tracking.advance());
        assert_eq!(tracking.estimated_minutes(), 5);
        assert!(tracking.is_delivered());
        assert!(!tracking.advance());
        assert_eq!(tracking.current_step(), LAST_STEP);
    }

    #[test]
    fn test_at_elapsed_advances_per_tick() {
        assert_eq!(OrderTracking::at_elapsed(Duration::from_secs(9)).current_step(), 1);
        assert_eq!(OrderTracking::at_elapsed(Duration::from_secs(10)).current_step(), 2);
        assert_eq!(OrderTracking::at_elapsed(Duration::from_secs(25)).current_step(), 3);
        assert_eq!(
            OrderTracking::at_elapsed(Duration::from_secs(3600)),
            OrderTracking::delivered()
        );
    }

    #[test]
    fn test_step_statuses() {
        let tracking = OrderTracking::at_elapsed(Duration::from_secs(10));
        let statuses: Vec<StepStatus> = tracking.steps().iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Completed,
                StepStatus::Current,
                StepStatus::Upcoming,
                StepStatus::Upcoming
            ]
        );
        assert_eq!(tracking.steps()[2].title, "Out for Delivery");
    }
}
