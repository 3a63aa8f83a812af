//! Headless starpond demo runner.
//!
//! Drives the simulation at its fixed tick rate with two scripted players
//! until one of them wins, logging phase transitions along the way.

use engine::{Config, Game};
use protocol::{Color, GameStep, JoypadInput, PlayerInfo};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starpond engine v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load()?;
    let tick_rate = config.game.tick_rate as f64;
    info!("  Tick rate: {}", config.game.tick_rate);
    info!("  Victory score: {}", config.game.victory_score);

    let mut game = Game::new(config);
    // No real asset pipeline here; the gate opens immediately.
    game.set_assets_ready(true);

    let mut players = HashMap::new();
    players.insert(
        "p1".to_string(),
        PlayerInfo {
            name: "Daisy".to_string(),
            color: Color::new(240, 200, 60),
        },
    );
    players.insert(
        "p2".to_string(),
        PlayerInfo {
            name: "Rollo".to_string(),
            color: Color::new(90, 160, 240),
        },
    );
    game.sync_players(players);

    let tick = Duration::from_secs_f64(1.0 / tick_rate);
    let mut ticker = interval_at(Instant::now() + tick, tick);
    // Use Skip to catch up on missed ticks - ensures consistent game speed.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frame: u64 = 0;
    loop {
        ticker.tick().await;
        frame += 1;
        let time = frame as f64 / tick_rate;

        if game.step() == GameStep::Intro && frame % 30 == 0 {
            for id in ["p1", "p2"] {
                let _ = game.handle_input(
                    id,
                    JoypadInput {
                        ready: Some(true),
                        ..Default::default()
                    },
                );
            }
        }

        // Scripted play: dash toward the nearest star.
        if game.step() == GameStep::Game && frame % 12 == 0 {
            let snapshot = game.snapshot();
            for hero in &snapshot.heroes {
                let nearest = snapshot.stars.iter().min_by(|a, b| {
                    let da = (a.x - hero.x).hypot(a.y - hero.y);
                    let db = (b.x - hero.x).hypot(b.y - hero.y);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                });
                if let Some(star) = nearest {
                    let _ = game.handle_input(
                        &hero.player_id,
                        JoypadInput {
                            dir_x: Some((star.x - hero.x).signum()),
                            dir_y: Some((star.y - hero.y).signum()),
                            ..Default::default()
                        },
                    );
                }
            }
        }

        let report = game.update(time);
        for event in &report.events {
            info!(step = ?event.step, "step change");
            if event.step == GameStep::Victory {
                let snapshot = game.snapshot();
                info!(
                    winner = snapshot.winner.as_deref().unwrap_or("?"),
                    "game over"
                );
                return Ok(());
            }
        }
    }
}
