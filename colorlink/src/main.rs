// main.rs - colorlink command line: inspect levels, lay them out and replay sessions

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::{Path, PathBuf};

use colorlink_engine::label::{max_label_width, monospace_measure, wrap_label};
use colorlink_engine::layout::{self, Layout};
use colorlink_engine::{input, BoardStyle, GameBoard, GameSettings, LevelCatalog, PathOutcome};

/// CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings JSON; built-in defaults when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the configuration of a level as JSON
    Level {
        level: u32,
    },

    /// Lay out a level on a board of the given size
    Layout {
        level: u32,

        #[arg(short = 'W', long, default_value = "1080")]
        width: f32,

        #[arg(short = 'H', long, default_value = "1920")]
        height: f32,

        /// Seed for the placement draws
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the layout here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lay out every level and report the ones that do not fit
    Catalog {
        #[arg(short = 'W', long, default_value = "1080")]
        width: f32,

        #[arg(short = 'H', long, default_value = "1920")]
        height: f32,

        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Feed recorded input samples (one JSON sample per line) to a board
    Replay {
        samples: PathBuf,

        #[arg(short, long, default_value = "1")]
        level: u32,

        #[arg(short = 'W', long, default_value = "1080")]
        width: f32,

        #[arg(short = 'H', long, default_value = "1920")]
        height: f32,

        /// Layout JSON from the `layout` command; generated when omitted
        #[arg(long)]
        layout: Option<PathBuf>,

        #[arg(short, long)]
        seed: Option<u64>,
    },
}

/// Layout plus what a renderer derives per tile: wrapped label lines and path color
#[derive(Serialize)]
struct LayoutReport<'a> {
    #[serde(flatten)]
    layout: &'a Layout,
    label_lines: Vec<Vec<String>>,
    path_colors: Vec<String>,
}

fn load_settings(path: Option<&Path>) -> Result<GameSettings> {
    match path {
        Some(path) => GameSettings::from_json_file(path)
            .with_context(|| format!("Failed to load settings {}", path.display())),
        None => Ok(GameSettings::default()),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_layout(
    settings: &GameSettings,
    level: u32,
    width: f32,
    height: f32,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let catalog = LevelCatalog::new();
    let config = catalog.get(level);
    let mut rng = make_rng(seed);
    let layout = layout::place(config, width, height, &settings.layout, &mut rng)
        .with_context(|| format!("Failed to lay out level {level}"))?;

    let style = BoardStyle::default();
    let measure = monospace_measure(style.label_text_size);
    let max_width = max_label_width(layout.tile_width);
    let label_lines = layout
        .tiles
        .iter()
        .map(|tile| wrap_label(&tile.label, max_width, &measure))
        .collect();
    let path_colors = layout
        .tiles
        .iter()
        .map(|tile| style.path_color(tile.color).to_hex())
        .collect();

    let report = LayoutReport {
        layout: &layout,
        label_lines,
        path_colors,
    };
    write_json(&report, output)
}

fn run_catalog(settings: &GameSettings, width: f32, height: f32, seed: Option<u64>) -> Result<()> {
    let catalog = LevelCatalog::new();
    let mut rng = make_rng(seed);
    let mut failures = 0;

    for config in catalog.iter() {
        match layout::place(config, width, height, &settings.layout, &mut rng) {
            Ok(layout) => info!(
                "Level {:>3}: {} tiles at {:.1}x{:.1} in {} attempt(s)",
                config.level,
                layout.tiles.len(),
                layout.tile_width,
                layout.tile_height,
                layout.attempts
            ),
            Err(err) => {
                warn!("Level {:>3}: {}", config.level, err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} levels could not be laid out on {width}x{height}", catalog.len());
    }
    info!("All {} levels fit on {}x{}", catalog.len(), width, height);
    Ok(())
}

fn run_replay(
    settings: GameSettings,
    samples_path: &Path,
    level: u32,
    width: f32,
    height: f32,
    layout_path: Option<&Path>,
    seed: Option<u64>,
) -> Result<()> {
    let text = std::fs::read_to_string(samples_path)
        .with_context(|| format!("Failed to read {}", samples_path.display()))?;
    let samples = input::parse_samples(&text)
        .with_context(|| format!("Failed to parse {}", samples_path.display()))?;

    let mut board = match seed {
        Some(seed) => GameBoard::with_seed(settings, seed),
        None => GameBoard::new(settings),
    };
    board.set_level_complete_callback(|level| info!("Level {level} solved"));
    board.set_board_size(width, height)?;

    match layout_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let layout: Layout = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse layout {}", path.display()))?;
            board.setup_level_with_layout(level, layout)?;
        }
        None => board.setup_level(level)?,
    }

    info!("Replaying {} samples on level {}", samples.len(), board.level());
    for sample in &samples {
        match board.handle_input(sample) {
            Some(PathOutcome::Rejected(reason)) => {
                info!("t={}ms rejected: {:?}", sample.timestamp_ms, reason)
            }
            Some(PathOutcome::Connected { color, level_complete }) => info!(
                "t={}ms connected color {} (level complete: {})",
                sample.timestamp_ms, color.0, level_complete
            ),
            Some(PathOutcome::Idle) | None => {}
        }
    }

    write_json(&board.snapshot(), None)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;

    match args.command {
        Command::Level { level } => {
            let catalog = LevelCatalog::new();
            write_json(catalog.get(level), None)
        }
        Command::Layout {
            level,
            width,
            height,
            seed,
            output,
        } => run_layout(&settings, level, width, height, seed, output.as_deref()),
        Command::Catalog { width, height, seed } => run_catalog(&settings, width, height, seed),
        Command::Replay {
            samples,
            level,
            width,
            height,
            layout,
            seed,
        } => run_replay(settings, &samples, level, width, height, layout.as_deref(), seed),
    }
}
