use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Env, Target};
use grid_snake::assets::{AssetCatalog, GameAssets};
use grid_snake::audio::{Audio, Silent, SoundBoard, TerminalBell};
use grid_snake::config::{default_log_path, GameConfig, WINDOW_TITLE};
use grid_snake::error::AppError;
use grid_snake::game::GameState;
use grid_snake::input::TerminalInput;
use grid_snake::renderer::TerminalRenderer;
use grid_snake::session::Session;
use grid_snake::terminal_runtime::{install_panic_hook, TerminalGuard};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Read settings from this JSON file instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,
    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
    /// Disable all sound.
    #[arg(long)]
    mute: bool,
    /// JSON manifest overriding built-in sprites and sounds.
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Write logs here instead of the default data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut GameConfig) {
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.mute {
            config.muted = true;
        }
        if self.assets.is_some() {
            config.assets.clone_from(&self.assets);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path)?;

    let mut config = GameConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    log::info!("starting with {config:?}");

    let grid = config.grid()?;
    let tick_interval = config.tick_interval()?;

    // Sprites are required, so resolve them before touching the terminal.
    let catalog = AssetCatalog::load(config.assets.as_deref())?;
    let assets = GameAssets::resolve(&catalog)?;

    let state = match config.seed {
        Some(seed) => GameState::new_with_seed(grid, seed),
        None => GameState::new(grid),
    };

    let backend: Box<dyn Audio> = if config.muted {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::stdout())
    };
    let sound = SoundBoard::new(
        backend,
        assets.music.clone(),
        assets.food_cue.clone(),
        assets.crash_cue.clone(),
    );

    install_panic_hook();
    let (_guard, terminal) = TerminalGuard::enter(WINDOW_TITLE)?;
    let renderer = TerminalRenderer::new(terminal, grid);

    let mut session = Session::new(state, assets, sound, renderer, TerminalInput, tick_interval);
    session.run()?;

    Ok(())
}

/// Sends logs to a file; the terminal is busy drawing the game.
fn init_logging(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))
}
