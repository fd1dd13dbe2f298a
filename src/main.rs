//! Headless maze walker.
//!
//! Generates a maze, prints it, then drives a [`Session`] for a fixed number of
//! frames with randomly scripted key presses, logging the pose and lighting as
//! it goes. Halfway through the run it triggers a level reset so the lockout
//! and regeneration path is exercised.
//!
//! Set `RUST_LOG` (or pass `--verbose`) to see per-tile movement.

use anyhow::Context;
use clap::Parser;
use maze_walker::benchmarks::{self, BenchmarkConfig, Profiler};
use maze_walker::config::GameConfig;
use maze_walker::game::Session;
use maze_walker::game::keys::{GameKey, KeyState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Frames between changes of the scripted keys
const SCRIPT_INTERVAL: u64 = 30;

/// Frames between status log lines
const STATUS_INTERVAL: u64 = 60;

const SCRIPTED_KEYS: [GameKey; 7] = [
    GameKey::Forward,
    GameKey::TurnLeft,
    GameKey::TurnRight,
    GameKey::Jump,
    GameKey::FastForwardTime,
    GameKey::MakeRain,
    GameKey::GrabCloud,
];

#[derive(Debug, Parser)]
#[command(name = "maze-walker", version, about = "Walk a procedurally generated maze headlessly")]
struct Cli {
    /// Generation cells along x
    #[arg(long)]
    tiles_x: Option<i32>,

    /// Generation cells along z
    #[arg(long)]
    tiles_z: Option<i32>,

    /// Radius of the central clearing
    #[arg(long)]
    cutout: Option<i32>,

    /// Seed for reproducible mazes and input
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// JSON file with session parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to save the generated maze in
    #[arg(long)]
    save_maze: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    /// Directory to write a timing report to
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(tiles_x) = self.tiles_x {
            config.maze.tiles_x = tiles_x;
        }
        if let Some(tiles_z) = self.tiles_z {
            config.maze.tiles_z = tiles_z;
        }
        if let Some(cutout) = self.cutout {
            config.maze.cutout = cutout;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn script_keys(keys: &mut KeyState, rng: &mut StdRng) {
    keys.clear();
    for key in SCRIPTED_KEYS {
        if rng.gen_bool(0.4) {
            keys.press_key(key);
        }
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.dt <= 0.0 || !cli.dt.is_finite() {
        anyhow::bail!("--dt must be a positive number of seconds, got {}", cli.dt);
    }
    let config = cli.game_config()?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("installing Ctrl-C handler")?;
    }

    let mut session = maze_walker::benchmark!("session_setup", {
        Session::new(config, cli.seed).context("starting session")?
    });
    println!("{}", session.grid().to_ascii());

    if let Some(dir) = &cli.save_maze {
        let path = session
            .grid()
            .save_to_file(dir)
            .with_context(|| format!("saving maze to {}", dir.display()))?;
        println!("saved maze to {}", path.display());
    }

    let mut input_rng = cli
        .seed
        .map_or_else(StdRng::from_entropy, |seed| StdRng::seed_from_u64(seed ^ 0x5eed));
    let mut profiler = Profiler::new(BenchmarkConfig::always());
    let mut keys = KeyState::new();
    let frame_time = Duration::from_secs_f32(cli.dt);

    for frame in 0..cli.frames {
        if !running.load(Ordering::SeqCst) {
            tracing::warn!(frame, "interrupted");
            break;
        }

        if frame % SCRIPT_INTERVAL == 0 {
            script_keys(&mut keys, &mut input_rng);
        }
        if frame == cli.frames / 2 {
            keys.press_key(GameKey::Reset);
        } else {
            keys.release_key(GameKey::Reset);
        }

        let output = profiler.time_closure("session_frame", || session.frame(&keys, cli.dt));
        benchmarks::record_frame_time(frame_time);

        if output.maze_regenerated {
            tracing::info!(frame, rounds = session.rounds_completed(), "new maze");
            println!("{}", session.grid().to_ascii());
        }
        if frame % STATUS_INTERVAL == 0 {
            let [x, y, z] = output.pose.position;
            tracing::info!(
                frame,
                time = %session.clock().format_hour(),
                tile_x = output.tile.x,
                tile_z = output.tile.z,
                x,
                y,
                z,
                ambient = ?output.lighting.ambient_color,
                sun = ?output.lighting.sun_color,
                flashlight = output.lighting.flashlight_intensity,
                locked = output.locked,
                lake = output.lake_level,
                drops = output.raindrops,
                carried = output.cloud_carried,
                "frame"
            );
        }
    }

    let poi = session.point_of_interest();
    tracing::info!(
        ?poi,
        lake = session.weather().lake_level(),
        rounds = session.rounds_completed(),
        "run finished"
    );
    benchmarks::log_summary();

    if let Some(dir) = &cli.report {
        let path = benchmarks::write_report(dir, "maze-walker")
            .with_context(|| format!("writing report to {}", dir.display()))?;
        println!("wrote report to {}", path.display());
    }

    Ok(())
}
