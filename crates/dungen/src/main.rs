//! Dungeon map generator
//!
//! Generates one or more layouts and prints them as ASCII, SVG or JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use strum::Display;
use tracing::Level;

use dungen_core::render::svg::to_svg;
use dungen_core::render::text::to_text;
use dungen_core::{Dungeon, DungeonConfig, Size, generate_maps, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
enum Format {
    Text,
    Svg,
    Json,
}

/// Grid-based dungeon map generator
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Generate dungeon room layouts", long_about = None)]
struct Args {
    /// Base seed (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Grid width in cells
    #[arg(long = "width")]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long = "height")]
    height: Option<usize>,

    /// Target number of rooms
    #[arg(short = 'r', long = "rooms")]
    rooms: Option<usize>,

    /// Derive grid size and counts from a 1-10 complexity
    #[arg(short = 'c', long = "complexity", value_parser = clap::value_parser!(u8).range(1..=10))]
    complexity: Option<u8>,

    /// Minimum room interior size
    #[arg(long = "min-room")]
    min_room: Option<usize>,

    /// Maximum room interior size
    #[arg(long = "max-room")]
    max_room: Option<usize>,

    /// Extra doors between neighbouring rooms
    #[arg(long = "connections")]
    connections: Option<usize>,

    /// Number of traps
    #[arg(long = "traps")]
    traps: Option<usize>,

    /// Number of maps to generate
    #[arg(short = 'n', long = "maps")]
    maps: Option<usize>,

    /// JSON configuration file; flags override its values
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write one file per map into this directory instead of stdout
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Mark cells where another room could still attach (text output)
    #[arg(long = "show-connections")]
    show_connections: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<DungeonConfig> {
    let mut config = match (&args.config, args.complexity) {
        (Some(path), _) => DungeonConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        (None, Some(complexity)) => DungeonConfig::from_complexity(complexity),
        (None, None) => DungeonConfig::default(),
    };

    if let Some(width) = args.width {
        config.grid_width = width;
    }
    if let Some(height) = args.height {
        config.grid_height = height;
    }
    if let Some(rooms) = args.rooms {
        config.room_count = rooms;
    }
    if let Some(min) = args.min_room {
        config.room_size.min = min;
    }
    if let Some(max) = args.max_room {
        config.room_size.max = max;
    }
    if let Some(connections) = args.connections {
        config.connection_count = connections;
    }
    if let Some(traps) = args.traps {
        config.trap_count = traps;
    }
    if let Some(maps) = args.maps {
        config.map_count = maps;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn format_dungeon(dungeon: &Dungeon, config: &DungeonConfig, args: &Args) -> Result<String> {
    let body = match args.format {
        Format::Text if args.show_connections => {
            let min = config.room_size.min;
            let points = dungeon.connection_points(Size::new(min, min));
            let grid = dungeon.grid.with_connections(&points);
            to_text(&grid, &dungeon.doors, &dungeon.traps)
        }
        Format::Text => to_text(&dungeon.grid, &dungeon.doors, &dungeon.traps),
        Format::Svg => to_svg(&render(dungeon)),
        Format::Json => {
            serde_json::to_string_pretty(dungeon).context("failed to serialize dungeon")?
        }
    };
    Ok(body)
}

fn write_map(dir: &Path, index: usize, format: Format, body: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(format!("dungeon-{:03}.{}", index + 1, format));
    fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    let maps = generate_maps(&config, config.map_count).context("failed to generate dungeon")?;

    for (index, dungeon) in maps.iter().enumerate() {
        let body = format_dungeon(dungeon, &config, &args)?;
        match &args.out {
            Some(dir) => {
                let path = write_map(dir, index, args.format, &body)?;
                tracing::info!(
                    "wrote map {} (seed {:?}) to {}",
                    index + 1,
                    dungeon.seed,
                    path.display()
                );
            }
            None => {
                if index > 0 {
                    println!();
                }
                print!("{body}");
                if args.format != Format::Text {
                    println!();
                }
            }
        }
    }

    Ok(())
}
