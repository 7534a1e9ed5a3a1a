//! Planet Sim entry point
//!
//! Runs a scenario headlessly for a fixed number of frames and reports where
//! the bodies ended up.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use planet_sim::renderer::HeadlessBackend;
use planet_sim::sim::PairUpdate;
use planet_sim::{Preset, ScenarioConfig, Scene};

#[derive(Parser, Debug)]
#[command(name = "planet-sim", about = "Run a 2D gravity scenario headlessly")]
struct Args {
    /// Scenario JSON file (takes precedence over --preset)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Built-in scenario: two-body, solar or ring
    #[arg(short, long, default_value = "two-body")]
    preset: String,

    /// Satellite count for the ring preset
    #[arg(long, default_value_t = 8)]
    count: usize,

    /// RNG seed for the ring preset
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Use the sequential pair update instead of the snapshot step
    #[arg(long)]
    sequential: bool,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Simulated wall-clock time per frame, in milliseconds
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f32,

    /// Print the final state as JSON
    #[arg(long)]
    dump: bool,
}

fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    if let Some(path) = &args.scenario {
        return ScenarioConfig::load(path)
            .with_context(|| format!("loading {}", path.display()));
    }
    let preset = match Preset::from_str(&args.preset) {
        Some(Preset::Ring { .. }) => Preset::Ring {
            count: args.count,
            seed: args.seed,
        },
        Some(preset) => preset,
        None => bail!("unknown preset '{}'", args.preset),
    };
    log::info!("Using preset {}", preset.as_str());
    Ok(preset.scenario())
}

fn run() -> Result<()> {
    let args = Args::parse();
    let mut scenario = load_scenario(&args)?;
    if args.sequential {
        scenario.sim.physics.pair_update = PairUpdate::Sequential;
    }

    let mut backend = HeadlessBackend::new();
    let mut scene = Scene::build(&scenario, &mut backend).context("building scene")?;

    let elapsed = args.frame_ms / 1000.0;
    for _ in 0..args.frames {
        scene.advance(elapsed);
        scene.render(&mut backend);
    }

    for body in &scene.state.bodies {
        log::info!(
            "{:>12}: pos ({:>9.2}, {:>9.2}) vel ({:>7.4}, {:>7.4})",
            body.name,
            body.position.x,
            body.position.y,
            body.velocity.x,
            body.velocity.y
        );
    }
    log::info!(
        "{} frames, t={:.1}, energy drift {:.3e}, {} draw calls",
        args.frames,
        scene.state.time,
        scene.energy_drift(),
        backend.draws
    );

    let state = scene.teardown(&mut backend);
    if backend.live_meshes() != 0 {
        log::warn!("{} meshes still live after teardown", backend.live_meshes());
    }

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Planet Sim starting...");
    run()
}
