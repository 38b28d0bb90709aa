#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Defers the narrative notification that follows a latched outcome.

use std::time::Duration;

use warp_adventure_core::{Event, Outcome};

const DEFAULT_NOTIFY_DELAY: Duration = Duration::from_secs(2);

/// Narrative notification to deliver once its delay has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Outcome the narrative collaborator should present.
    pub outcome: Outcome,
    /// Time to wait before delivering the notification.
    pub delay: Duration,
}

/// Pure system that turns the first outcome latch into a delayed notification.
#[derive(Debug)]
pub struct OutcomeNotifier {
    delay: Duration,
    notified: bool,
}

impl Default for OutcomeNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFY_DELAY)
    }
}

impl OutcomeNotifier {
    /// Creates a notifier waiting `delay` after the latch.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            notified: false,
        }
    }

    /// Reports whether a notification was already issued.
    #[must_use]
    pub const fn has_notified(&self) -> bool {
        self.notified
    }

    /// Consumes world events and emits at most one notification per session.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Notification>) {
        if self.notified {
            return;
        }

        let latched = events.iter().find_map(|event| match event {
            Event::OutcomeLatched { outcome } => Some(*outcome),
            _ => None,
        });
        if let Some(outcome) = latched {
            self.notified = true;
            out.push(Notification {
                outcome,
                delay: self.delay,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_events_without_latch() {
        let mut notifier = OutcomeNotifier::default();
        let mut out = Vec::new();
        notifier.handle(&[Event::TimeAdvanced { tick: 1 }], &mut out);
        assert!(out.is_empty());
        assert!(!notifier.has_notified());
    }

    #[test]
    fn latch_produces_delayed_notification() {
        let mut notifier = OutcomeNotifier::default();
        let mut out = Vec::new();
        notifier.handle(
            &[Event::OutcomeLatched {
                outcome: Outcome::Victory,
            }],
            &mut out,
        );
        assert_eq!(
            out,
            vec![Notification {
                outcome: Outcome::Victory,
                delay: Duration::from_secs(2),
            }]
        );
    }

    #[test]
    fn only_first_latch_is_notified() {
        let mut notifier = OutcomeNotifier::new(Duration::from_millis(500));
        let mut out = Vec::new();
        let latch = |outcome| Event::OutcomeLatched { outcome };
        notifier.handle(&[latch(Outcome::Defeat)], &mut out);
        notifier.handle(&[latch(Outcome::Victory)], &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].outcome, Outcome::Defeat);
    }
}
