//! State shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use sentinel_core::events::Stamped;
use sentinel_core::types::EntityId;
use sentinel_engine::report::TickReport;
use sentinel_sim::world::Spawn;

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// Report that an entity (or the agent) was damaged.
    Hurt(EntityId),
    /// Overwrite the agent's health.
    SetHealth(f64),
    /// Add an entity to the running world.
    Spawn(Spawn),
    /// Forgive a hostile player by username.
    Forgive(String),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Caller's end of a running game loop.
///
/// The notification channel disconnects once the loop thread has exited,
/// which is how callers wait for shutdown.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub notifications: mpsc::Receiver<Stamped>,
    /// Report of the most recent tick, for polling.
    pub latest_report: Arc<Mutex<Option<TickReport>>>,
}

impl GameLoopHandle {
    /// Ask the loop to stop. Returns false if it already has.
    pub fn shutdown(&self) -> bool {
        self.commands.send(GameLoopCommand::Shutdown).is_ok()
    }

    /// Clone of the latest tick report, if any tick has run.
    pub fn latest_report(&self) -> Option<TickReport> {
        self.latest_report.lock().ok().and_then(|lock| lock.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_reports_closed_loop() {
        let (commands, cmd_rx) = mpsc::channel();
        let (_note_tx, notifications) = mpsc::channel();
        let handle = GameLoopHandle {
            commands,
            notifications,
            latest_report: Arc::new(Mutex::new(None)),
        };
        assert!(handle.latest_report().is_none());
        assert!(handle.shutdown());
        assert_eq!(cmd_rx.try_recv().unwrap(), GameLoopCommand::Shutdown);

        drop(cmd_rx);
        assert!(!handle.shutdown());
    }
}
