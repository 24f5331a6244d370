//! SpaceFist Demo
//!
//! Runs a headless scripted session against the null renderer and a
//! recording audio sink, then prints the event log and summary as JSON.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use spacefist::{
    game::session::GameSession,
    io::{FixedInput, InputSnapshot, NullRenderer, RecordingAudio},
    GameConfig, TICK_RATE, VERSION,
};

/// How long the demo runs, in ticks (30 seconds at the sim rate).
const DEMO_TICKS: u32 = 30 * TICK_RATE;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("SpaceFist core v{}", VERSION);
    info!("Tick rate: {} Hz", TICK_RATE);

    let config = GameConfig {
        rng_seed: 12345,
        ..GameConfig::default()
    };
    let mut session = GameSession::new(config)?;

    let mut renderer = NullRenderer;
    let mut audio = RecordingAudio::default();

    info!("Running {} ticks...", DEMO_TICKS);

    for t in 0..DEMO_TICKS {
        // Scripted input: climb the world, weave, fire in bursts
        let input = FixedInput(InputSnapshot {
            forward: true,
            left: (t / 90) % 2 == 0,
            right: (t / 90) % 2 == 1,
            fire: t % 20 < 10,
            ..InputSnapshot::default()
        });

        session.tick(&input, &mut audio);
        session.draw(&mut renderer);

        // Report every 5 seconds
        if t % (5 * TICK_RATE) == 0 {
            info!(
                "Tick {}: score {}, {} enemies alive, {} shots in flight",
                t,
                session.score(),
                session.enemies().live_count(),
                session.projectiles().live_count()
            );
        }

        if session.is_game_over() {
            info!("Game over at tick {}", t);
            break;
        }
    }

    info!("=== Session Results ===");
    info!("Sounds triggered: {}", audio.played.len());
    println!("{}", serde_json::to_string_pretty(&session.events())?);
    println!("{}", serde_json::to_string_pretty(&session.summary())?);

    Ok(())
}
