//! Game loop thread: drives the simulated world and the companion engine at
//! 20Hz and forwards notifications.
//!
//! World and engine are moved into the thread. Commands arrive via `mpsc`;
//! notifications leave via a second channel and the latest tick report is
//! stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use sentinel_core::config::CombatConfig;
use sentinel_core::constants::TICK_RATE;
use sentinel_core::events::Stamped;
use sentinel_engine::report::TickReport;
use sentinel_engine::CompanionEngine;
use sentinel_sim::driver::drive;
use sentinel_sim::SimWorld;

use crate::state::{GameLoopCommand, GameLoopHandle};

/// Wall-clock duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(world: SimWorld, config: CombatConfig) -> io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (note_tx, note_rx) = mpsc::channel::<Stamped>();
    let latest_report = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_report);

    std::thread::Builder::new()
        .name("sentinel-game-loop".into())
        .spawn(move || {
            let engine = CompanionEngine::new(config);
            run_game_loop(world, engine, cmd_rx, note_tx, &shared);
        })?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        notifications: note_rx,
        latest_report,
    })
}

/// The game loop. Runs until Shutdown, a closed command channel, or a
/// closed notification channel.
fn run_game_loop(
    mut world: SimWorld,
    mut engine: CompanionEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    note_tx: mpsc::Sender<Stamped>,
    latest_report: &Mutex<Option<TickReport>>,
) {
    let mut next_tick_time = Instant::now();
    info!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(cmd) => {
                    if !apply_command(&mut world, &mut engine, cmd) {
                        info!("game loop shut down");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Step the world and tick the engine
        let report = drive(&mut world, &mut engine);

        // 3. Forward notifications
        for note in engine.drain_notifications() {
            if note_tx.send(note).is_err() {
                debug!("notification receiver gone");
                return;
            }
        }

        // 4. Store latest report for polling
        if let Ok(mut lock) = latest_report.lock() {
            *lock = Some(report);
        }

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, skip the backlog
            next_tick_time = now;
        }
    }
}

/// Apply one command. Returns false on Shutdown.
fn apply_command(world: &mut SimWorld, engine: &mut CompanionEngine, cmd: GameLoopCommand) -> bool {
    let now = world.now();
    match cmd {
        GameLoopCommand::Hurt(id) => engine.on_entity_hurt(now, id, world),
        GameLoopCommand::SetHealth(health) => world.set_agent_health(health),
        GameLoopCommand::Spawn(spawn) => {
            let id = world.spawn(&spawn);
            debug!(?id, ?spawn, "spawned");
        }
        GameLoopCommand::Forgive(username) => engine.forgive(now, &username, world),
        GameLoopCommand::Shutdown => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::enums::MobKind;
    use sentinel_core::types::{EntityId, Position};
    use sentinel_engine::ports::WorldView;
    use sentinel_sim::scenario::{self, Scenario};
    use sentinel_sim::world::Spawn;
    use sentinel_sim::SimConfig;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::SetHealth(4.0)).unwrap();
        tx.send(GameLoopCommand::Hurt(EntityId(0))).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], GameLoopCommand::SetHealth(4.0));
        assert_eq!(commands[1], GameLoopCommand::Hurt(EntityId(0)));
        assert_eq!(commands[2], GameLoopCommand::Shutdown);
    }

    #[test]
    fn test_apply_command_effects() {
        let mut world = scenario::build(Scenario::LoneZombie, SimConfig::default());
        let mut engine = CompanionEngine::default();

        assert!(apply_command(&mut world, &mut engine, GameLoopCommand::SetHealth(9.0)));
        assert_eq!(world.agent_state().health, 9.0);

        let before = world.entities().len();
        let spawn = Spawn::Mob {
            kind: MobKind::Creeper,
            position: Position::new(0.0, 64.0, 9.0),
        };
        assert!(apply_command(&mut world, &mut engine, GameLoopCommand::Spawn(spawn)));
        assert_eq!(world.entities().len(), before + 1);

        assert!(!apply_command(&mut world, &mut engine, GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_forwards_notifications_and_shuts_down() {
        let world = scenario::build(Scenario::LoneZombie, SimConfig::default());
        let handle = spawn_game_loop(world, CombatConfig::default()).unwrap();

        // The guard picks up the zombie on the first tick
        let first = handle
            .notifications
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert!(first.at >= 50);

        assert!(handle.shutdown());
        loop {
            match handle.notifications.recv_timeout(Duration::from_secs(5)) {
                Ok(_) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
                Err(mpsc::RecvTimeoutError::Timeout) => panic!("game loop did not stop"),
            }
        }
    }

    #[test]
    fn test_report_serialization_under_3ms() {
        let mut world = scenario::build(Scenario::SurroundedAlly, SimConfig::default());
        let mut engine = CompanionEngine::default();
        for _ in 0..50 {
            drive(&mut world, &mut engine);
        }

        let report = drive(&mut world, &mut engine);
        let start = Instant::now();
        let json = serde_json::to_string(&report).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Report serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(json.contains("\"at\":2550"));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 20Hz = 50ms per tick
        assert_eq!(TICK_DURATION, Duration::from_millis(50));
    }
}
