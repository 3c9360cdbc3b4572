//! Background tick loop.
//!
//! The controller only confirms moves when it is updated, so something has
//! to call [`DoorStateProvider::tick`] regularly. On desktop that is this
//! tokio task; on ESP32 it is the firmware's main loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::shared::DoorStateProvider;

/// Spawn the single controller update loop.
///
/// Runs every `tick_ms` (at least 1 ms) until the task is aborted.
/// Missed ticks are skipped rather than replayed, since one late update
/// delivers every due confirmation anyway.
pub fn spawn_update_loop<S>(state: Arc<S>, tick_ms: u64) -> JoinHandle<()>
where
    S: DoorStateProvider + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if let Some(confirmed) = state.tick() {
                log::debug!("Tick confirmed door {}", confirmed);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockActuator;
    use crate::services::SharedDoorState;
    use crate::{DoorConfig, DoorState, GarageDoorController, LogNotifier, TargetState};

    #[tokio::test]
    async fn loop_confirms_moves() {
        let door = GarageDoorController::new(
            DoorConfig::default().with_time_to_move_s(0.02),
            MockActuator::new(),
            LogNotifier,
        );
        let state = Arc::new(SharedDoorState::new(door));
        let handle = spawn_update_loop(Arc::clone(&state), 5);

        state.request_target(TargetState::Open);
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(state.state().current, DoorState::Open);
        handle.abort();
    }
}
