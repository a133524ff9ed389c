//! # Treasure Hunt Main Entry Point
//!
//! Parses the command line, initializes logging, builds the session and runs
//! the macroquad scene loop. `--print-board` skips the window entirely.

use clap::Parser;
use log::{error, info};
use macroquad::window::Conf;
use macroquad::Window;
use std::path::PathBuf;
use treasure_hunt::scenes::SceneManager;
use treasure_hunt::{
    BoardGenerator, GameSession, GenerationConfig, Generator, HighScoreStore, InputHandler,
    TreasureResult,
};

/// Command line arguments for the treasure hunt.
#[derive(Parser, Debug)]
#[command(name = "treasure_hunt")]
#[command(about = "Collect every treasure on the grid while avoiding obstacles")]
#[command(version)]
struct Args {
    /// Random seed for board generation (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// High-score file
    #[arg(long, default_value = treasure_hunt::config::DEFAULT_SCORES_FILE)]
    scores: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Generate one board, print it and exit without opening a window
    #[arg(long)]
    print_board: bool,
}

/// Window settings for the game.
fn window_conf() -> Conf {
    Conf {
        window_title: "Treasure Hunt Adventure".to_string(),
        window_width: 800,
        window_height: 860,
        ..Default::default()
    }
}

fn main() -> TreasureResult<()> {
    let args = Args::parse();

    // Initialize logging
    initialize_logging(&args.log_level);

    info!("Starting Treasure Hunt v{}", treasure_hunt::VERSION);

    let config = load_config(&args)?;
    info!(
        "Board settings: {}x{}, {} treasures, {}..={} obstacles, seed {}",
        config.grid_size,
        config.grid_size,
        config.treasure_count,
        config.min_obstacles,
        config.max_obstacles,
        config.seed
    );

    if args.print_board {
        return print_board(&config);
    }

    let session = GameSession::new(config)?;
    let store = HighScoreStore::new(args.scores);
    let mut scenes = SceneManager::new(session, InputHandler::new(), store);

    Window::from_config(window_conf(), async move {
        if let Err(e) = scenes.run().await {
            error!("Game loop failed: {}", e);
        }
    });
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(log_level))
            .with_target(false)
            .try_init();
        tracing::debug!("Tracing subscriber installed");
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let _ = env_logger::Builder::new()
            .parse_filters(log_level)
            .format_timestamp(None)
            .try_init();
    }
}

/// Builds the generation config from the optional file and seed override.
fn load_config(args: &Args) -> TreasureResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::default(),
    };

    config.seed = match (args.seed, &args.config) {
        (Some(seed), _) => seed,
        (None, Some(_)) => config.seed,
        (None, None) => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(config.seed),
    };

    Ok(config)
}

/// Prints a single generated board to stdout.
fn print_board(config: &GenerationConfig) -> TreasureResult<()> {
    let mut rng = treasure_hunt::generation::utils::create_rng(config);
    let grid = BoardGenerator::new().generate(config, &mut rng)?;
    print!("{}", grid.render_ascii());
    Ok(())
}
