//! Error types for player control and status rendering

/// Result type alias for player and rendering operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Spotify does not own its MPRIS name on the session bus
    #[error("Spotify is not running")]
    PlayerNotRunning,

    /// `pgrep` found no process with this name
    #[error("{0} is not running")]
    ProcessNotRunning(String),

    /// wmctrl is missing, failed, or has no window for the process
    #[error("{0}")]
    WindowToolUnavailable(String),

    #[error("Invalid action `{0}`")]
    InvalidAction(String),

    #[error("Invalid {option} value `{value}`. Valid options are: {expected}")]
    InvalidOptionValue {
        option: &'static str,
        value: String,
        expected: String,
    },

    /// The player reports a zero track length
    #[error("No track loaded")]
    NoTrackLoaded,

    #[cfg(target_os = "linux")]
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    #[cfg(target_os = "linux")]
    #[error("D-Bus error: {0}")]
    DbusFdo(#[from] zbus::fdo::Error),
}
