//! Helion Server
//!
//! Runs the lag-compensation session behind its tick driver and feeds it
//! simulated position reports from one task per player slot.

use std::time::Duration;
use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use helion::{
    ServerConfig, ServerSession, TickDriver, DriverHandle, PositionReport, FixedVec3,
    APPLICATION_NAME, APPLICATION_VERSION, VERSION,
};

/// Report rounds each simulated player sends per level.
const ROUNDS_PER_LEVEL: i32 = 70;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env().context("Failed to load configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid log filter {:?}", config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("{} v{} (crate {})", APPLICATION_NAME, APPLICATION_VERSION, VERSION);
    info!("Tick Rate: {} Hz", config.tick_rate);
    info!("Player Slots: {}", config.player_slots);

    let mut session = ServerSession::new(&config);
    session.begin_level("MAP01");

    let tick_rate = config.tick_rate;
    let observer = move |s: &ServerSession| {
        if s.tick() % tick_rate != 0 {
            return;
        }
        if let Ok(shooter) = s.slot(0) {
            for (target, position) in s.perspective(shooter).known() {
                debug!("Tick {}: {} last saw {} at {}", s.tick(), shooter, target, position);
            }
        }
    };

    let (driver, handle) = TickDriver::new(session, &config, observer);
    let runner = tokio::spawn(driver.run());
    let tick = config.tick_duration();

    simulate_level(&handle, config.player_slots, tick).await?;
    handle.change_level("MAP02").await?;
    simulate_level(&handle, config.player_slots, tick).await?;
    handle.shutdown().await?;

    let session = runner.await.context("Tick driver task failed")?;

    info!("=== Final State ===");
    info!("Level {} ({}) at tick {}", session.level(), session.level_name(), session.tick());
    info!("Unlagged State Hash: {}", hex::encode(session.compute_hash()));

    let shooter = session.slot(0)?;
    let snapshot = serde_json::to_string(&session.snapshot(shooter))
        .context("Failed to serialize perspective snapshot")?;
    info!("Perspective of {}: {}", shooter, snapshot);

    Ok(())
}

/// Spawn one producer per slot; each reports its own position and where it
/// saw every other player one round earlier.
async fn simulate_level(handle: &DriverHandle, slots: usize, tick: Duration) -> Result<()> {
    let mut producers = Vec::with_capacity(slots);

    for slot in 0..slots as u8 {
        let handle = handle.clone();
        producers.push(tokio::spawn(async move {
            for round in 1..=ROUNDS_PER_LEVEL {
                handle
                    .report(PositionReport::own(slot, walk(slot, round)))
                    .await?;
                for other in (0..slots as u8).filter(|o| *o != slot) {
                    handle
                        .report(PositionReport::seen(slot, other, walk(other, round - 1)))
                        .await?;
                }
                tokio::time::sleep(tick).await;
            }
            Ok::<(), helion::network::DriverError>(())
        }));
    }

    for producer in producers {
        producer.await.context("Producer task panicked")??;
    }
    Ok(())
}

/// Position of `slot` after `round` steps along its own lane.
fn walk(slot: u8, round: i32) -> FixedVec3 {
    FixedVec3::from_ints(64 * slot as i32 + 1, 16 * round, 0)
}
