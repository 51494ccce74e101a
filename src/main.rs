//! # Keyhunt Main Entry Point
//!
//! Parses the command line, sets up logging and the asset runtime, builds
//! the session and runs the macroquad frame loop.

use clap::Parser;
use keyhunt::{
    AssetCatalog, AssetLoader, CatalogAssetLoader, GameConfig, GameState, InputHandler,
    KeyhuntError, KeyhuntResult, SceneManager,
};
use log::{info, warn};
use macroquad::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Command line arguments for Keyhunt.
#[derive(Parser, Debug)]
#[command(name = "keyhunt")]
#[command(about = "Find the key, unlock the treasure")]
#[command(version)]
struct Args {
    /// Random seed for house placement and scenery (fresh each launch if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory model paths are resolved against
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Enable development mode with collision wireframes and debug overlay
    #[arg(long)]
    dev_mode: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Keyhunt".to_string(),
        window_width: 1280,
        window_height: 720,
        high_dpi: true,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> KeyhuntResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);
    info!("Starting Keyhunt v{}", keyhunt::VERSION);

    let config = load_config(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("keyhunt-assets")
        .build()
        .map_err(|e| KeyhuntError::Runtime(e.to_string()))?;

    let loader = runtime.block_on(build_loader(&config));
    let game_state = GameState::start(config, loader, runtime.handle().clone(), Instant::now())?;

    let mut scenes = SceneManager::new(game_state, InputHandler::new(), args.dev_mode);
    scenes.run().await?;

    info!("Game loop ended");
    runtime.shutdown_background();
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let filter = tracing_subscriber::EnvFilter::try_new(log_level)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .format_timestamp_millis()
            .init();
    }
}

/// Reads the config file if given, then applies CLI overrides.
fn load_config(args: &Args) -> KeyhuntResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::load_from_file(path)?
        }
        None => GameConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(root) = &args.assets {
        config.assets.root = root.clone();
    }
    config.validate()?;
    info!("Using seed {} (pass --seed {} to replay this town)", config.seed, config.seed);
    Ok(config)
}

/// Builds the configured loader, falling back to the built-in catalog.
async fn build_loader(config: &GameConfig) -> Arc<dyn AssetLoader> {
    match CatalogAssetLoader::from_config(&config.assets).await {
        Ok(loader) => Arc::new(loader),
        Err(e) => {
            warn!("Asset catalog unavailable ({}), using the built-in catalog", e);
            let catalog = AssetCatalog::builtin().unwrap_or_default();
            Arc::new(CatalogAssetLoader::new(
                catalog,
                config.assets.root.clone(),
                config.assets.verify_files,
            ))
        }
    }
}
