//! Door state changes published on a tokio broadcast channel.
//!
//! ```
//! use rs_garagedoor::services::BroadcastNotifier;
//! use rs_garagedoor::traits::DoorNotifier;
//! use rs_garagedoor::DoorState;
//!
//! let mut notifier = BroadcastNotifier::new(16);
//! let mut rx = notifier.subscribe();
//!
//! notifier.state_changed(DoorState::Opening);
//! assert_eq!(rx.try_recv().unwrap(), DoorState::Opening);
//! ```

use tokio::sync::broadcast;

use crate::traits::DoorNotifier;
use crate::DoorState;

/// Default channel capacity.
pub const DEFAULT_CAPACITY: usize = 16;

/// Publishes every state change to all subscribers.
///
/// Clones share the same channel, so a clone can be kept outside the
/// controller for subscribing later.
#[derive(Clone, Debug)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<DoorState>,
}

impl BroadcastNotifier {
    /// Create a channel buffering up to `capacity` unread changes per
    /// subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Receive every change from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DoorState> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl DoorNotifier for BroadcastNotifier {
    fn state_changed(&mut self, state: DoorState) {
        log::info!("Door state is now {}", state);
        // No subscribers is fine
        let _ = self.tx.send(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_without_subscribers_is_silent() {
        let mut notifier = BroadcastNotifier::default();
        assert_eq!(notifier.subscriber_count(), 0);
        notifier.state_changed(DoorState::Closing);
    }

    #[test]
    fn clones_share_the_channel() {
        let mut notifier = BroadcastNotifier::new(4);
        let observer = notifier.clone();
        let mut rx = observer.subscribe();

        notifier.state_changed(DoorState::Opening);
        notifier.state_changed(DoorState::Open);

        assert_eq!(rx.try_recv().unwrap(), DoorState::Opening);
        assert_eq!(rx.try_recv().unwrap(), DoorState::Open);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut notifier = BroadcastNotifier::new(0);
        let mut rx = notifier.subscribe();
        notifier.state_changed(DoorState::Stopped);
        assert_eq!(rx.try_recv().unwrap(), DoorState::Stopped);
    }
}
