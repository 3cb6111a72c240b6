use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use snake_arcade::app::App;
use snake_arcade::audio::AudioMixer;
use snake_arcade::game::GameConfig;
use snake_arcade::scores::HighScoreStore;

#[derive(Parser)]
#[command(name = "snake-arcade")]
#[command(version, about = "Classic snake in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "40")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "30")]
    height: usize,

    /// Leaderboard file
    #[arg(long, default_value = "snake_highscores.json")]
    scores_file: PathBuf,

    /// Start with all audio muted
    #[arg(long)]
    mute: bool,

    /// Write diagnostics to this file
    #[arg(long, default_value = "snake-arcade.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal is taken over by the TUI, so diagnostics go to a file.
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    WriteLogger::init(LevelFilter::Info, LogConfig::default(), log_file)
        .context("initializing logger")?;
    info!("snake-arcade starting");

    let config = GameConfig::new(cli.width, cli.height);
    let store = HighScoreStore::new(cli.scores_file);
    let mixer = AudioMixer::new(cli.mute);

    App::new(config, store, mixer).run().await
}
