use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
pub use commands::*;

#[derive(Parser)]
#[command(name = "spotify-nvim")]
#[command(about = "Control Spotify from Neovim and render its playback status")]
#[command(version)]
pub struct Cli {
    /// Print every result as one JSON object
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file to use instead of the default location
    #[arg(long = "config", global = true, env = "SPOTIFY_NVIM_CONFIG")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an action by name, as the editor command does
    Action {
        /// play/pause, play, pause, stop, next, prev, show, status, volume, shuffle or time
        name: String,
        /// Value for volume, shuffle and time
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Toggle between playing and paused
    #[command(alias = "play/pause")]
    Toggle,

    /// Start playback
    Play,

    /// Pause playback
    Pause,

    /// Stop playback
    Stop,

    /// Skip to the next track
    Next,

    /// Go to the previous track
    #[command(name = "prev", alias = "previous")]
    Previous,

    /// Bring the Spotify window to the foreground
    Show,

    /// Render the current playback status
    Status,

    /// Show or change the volume
    Volume {
        /// 0-100, or +N/-N relative to the current volume
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Show or change shuffle
    Shuffle {
        /// yes, on, true, no, off, false or toggle
        value: Option<String>,
    },

    /// Show or change the playback position
    Time {
        /// Seconds, or +N/-N relative to the current position
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Render the status template for one cycle tick
    Render {
        /// Cycle counter driving the scrolling of long fields
        #[arg(long, default_value_t = 0)]
        cycle: u64,
        /// Render a snapshot saved as JSON instead of asking Spotify
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Status configuration as JSON, replacing the [status] section
        #[arg(long)]
        config_json: Option<String>,
    },

    /// Dump the raw player state
    Metadata,

    /// Print the state the renderer works from, as `render --snapshot` reads it
    Snapshot,

    /// List action names starting with a prefix
    Complete {
        #[arg(default_value = "")]
        lead: String,
    },

    /// Print the effective configuration
    Config,
}
