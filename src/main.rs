//! # Burrow Main Entry Point
//!
//! Generates a level from the command line and prints it as text, or as JSON.

use burrow::{BurrowResult, CarverStrategy, Dungeon, GenerationConfig, Level, Renderable};
use clap::{Parser, ValueEnum};

/// Passage carving algorithm, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CarverArg {
    Eating,
    Frontier,
}

impl From<CarverArg> for CarverStrategy {
    fn from(arg: CarverArg) -> Self {
        match arg {
            CarverArg::Eating => CarverStrategy::Eating,
            CarverArg::Frontier => CarverStrategy::Frontier,
        }
    }
}

/// Command line arguments for the Burrow level generator.
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "Procedural maze carving and level population")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Level to generate (0 is home, 1-10 dungeon, 11-13 volcano)
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Place walls, objects and monsters pre-revealed
    #[arg(long)]
    reveal: bool,

    /// Passage carving algorithm
    #[arg(long, value_enum)]
    carver: Option<CarverArg>,

    /// JSON generation config; command line flags override its fields
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Dump the generated level as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> BurrowResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    log::info!("Starting Burrow v{}", burrow::VERSION);

    let config = build_config(&args)?;
    let mut dungeon = Dungeon::new(config)?;
    let level = dungeon.visit(args.level)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&*level)?);
    } else {
        print_level(level);
    }
    Ok(())
}

fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .format_target(false)
        .init();
}

/// Starts from the config file when given, then applies command line flags.
fn build_config(args: &Args) -> BurrowResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading generation config from {}", path.display());
            GenerationConfig::from_json_file(path)?
        }
        None => GenerationConfig::new(rand::random()),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.reveal {
        config.reveal = true;
    }
    if let Some(carver) = args.carver {
        config.carver = carver.into();
    }

    config.validate()?;
    Ok(config)
}

fn print_level(level: &Level) {
    println!("{}", level.render());
    println!(
        "Level {} ({:?}), seed {}, {} treasure room(s)",
        level.number,
        level.category,
        level.seed,
        level.treasure_rooms.len()
    );

    if level.spawned.is_empty() {
        return;
    }
    println!("Monsters:");
    for id in &level.spawned {
        if let Some(monster) = level.monster(*id) {
            let info = monster.kind.info();
            println!(
                "  {} {:<18} lvl {:>2} hp {:>3} at ({}, {})",
                info.glyph,
                monster.name(),
                info.level,
                monster.hit_points,
                monster.position.x,
                monster.position.y
            );
        }
    }
    let hidden = level.spawned.len()
        - level
            .spawned
            .iter()
            .filter_map(|id| level.monster(*id))
            .filter(|monster| monster.glyph() != ' ')
            .count();
    if hidden > 0 {
        println!("  ({} not yet seen)", hidden);
    }
}
