//! Configuration and CLI argument handling

use std::{num::NonZeroU32, path::PathBuf};
use clap::Parser;

use crate::{
    catalog::{CatalogError, TrackCatalog},
    controller::TimerSettings,
    services::PlayerCommand,
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-session")]
#[command(about = "Headless focus timer with ambient audio and session logging")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Focus interval length in minutes
    #[arg(short, long, default_value = "25")]
    pub focus_minutes: NonZeroU32,

    /// Break interval length in minutes
    #[arg(short, long, default_value = "5")]
    pub break_minutes: NonZeroU32,

    /// JSON file with the ambient track catalog (built-in catalog if omitted)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Audio player executable used for ambient tracks
    #[arg(long, default_value = "mpv")]
    pub player: String,

    /// Argument passed to the player before the track source (repeatable)
    #[arg(
        long = "player-arg",
        allow_hyphen_values = true,
        default_values = ["--no-video", "--loop=inf", "--really-quiet"]
    )]
    pub player_args: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings::new(self.focus_minutes, self.break_minutes)
    }

    pub fn player_command(&self) -> PlayerCommand {
        PlayerCommand {
            program: self.player.clone(),
            args: self.player_args.clone(),
        }
    }

    /// Load the configured track catalog
    pub fn track_catalog(&self) -> Result<TrackCatalog, CatalogError> {
        match &self.catalog {
            Some(path) => TrackCatalog::load(path),
            None => Ok(TrackCatalog::default()),
        }
    }
}
