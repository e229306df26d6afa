use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Playing,
    Paused,
    #[default]
    Stopped,
}

impl PlaybackStatus {
    /// Key of this status in the symbol and state tables.
    pub fn key(self) -> &'static str {
        match self {
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for PlaybackStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "playing" => Ok(PlaybackStatus::Playing),
            "paused" => Ok(PlaybackStatus::Paused),
            "stopped" => Ok(PlaybackStatus::Stopped),
            _ => Err(format!("Invalid playback status: {s}")),
        }
    }
}

/// Track metadata as read from the player, with fallbacks already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub id: Option<String>,
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub album_artists: Vec<String>,
    pub length: u64,
    pub url: Option<String>,
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self {
            id: None,
            title: "No Title".to_string(),
            artists: vec!["Unknown".to_string()],
            album: "No Title".to_string(),
            album_artists: vec!["Unknown".to_string()],
            length: 0,
            url: None,
        }
    }
}

/// Everything the status renderer needs, captured at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub album_artists: Vec<String>,
    pub status: PlaybackStatus,
    pub shuffle: bool,
    pub volume: u8,
    pub position: u64,
    pub duration: u64,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        let meta = TrackMetadata::default();
        Self {
            title: meta.title,
            artists: meta.artists,
            album: meta.album,
            album_artists: meta.album_artists,
            status: PlaybackStatus::Stopped,
            shuffle: false,
            volume: 0,
            position: 0,
            duration: 0,
        }
    }
}

/// A value given to `volume` or `time`: `+N`/`-N` is relative, `N` absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Absolute(i64),
    Relative(i64),
}

impl Adjustment {
    pub fn parse(option: &'static str, value: &str) -> Result<Self> {
        let value = value.trim();
        let invalid = || Error::InvalidOptionValue {
            option,
            value: value.to_string(),
            expected: "a number, optionally prefixed with + or -".to_string(),
        };

        let relative = value.starts_with('+') || value.starts_with('-');
        let amount: i64 = value.parse().map_err(|_| invalid())?;

        if relative {
            Ok(Adjustment::Relative(amount))
        } else {
            Ok(Adjustment::Absolute(amount))
        }
    }

    pub fn apply(self, current: i64) -> i64 {
        match self {
            Adjustment::Absolute(value) => value,
            Adjustment::Relative(delta) => current.saturating_add(delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_status_from_mpris() {
        assert_eq!("Playing".parse(), Ok(PlaybackStatus::Playing));
        assert_eq!("paused".parse(), Ok(PlaybackStatus::Paused));
        assert_eq!("STOPPED".parse(), Ok(PlaybackStatus::Stopped));
        assert!("buffering".parse::<PlaybackStatus>().is_err());
    }

    #[test]
    fn test_adjustment_parse() {
        assert_eq!(
            Adjustment::parse("volume", "+10").unwrap(),
            Adjustment::Relative(10)
        );
        assert_eq!(
            Adjustment::parse("volume", "-5").unwrap(),
            Adjustment::Relative(-5)
        );
        assert_eq!(
            Adjustment::parse("time", "90").unwrap(),
            Adjustment::Absolute(90)
        );
        assert!(matches!(
            Adjustment::parse("volume", "loud"),
            Err(Error::InvalidOptionValue { option: "volume", .. })
        ));
    }

    #[test]
    fn test_adjustment_apply() {
        assert_eq!(Adjustment::Relative(-15).apply(40), 25);
        assert_eq!(Adjustment::Absolute(70).apply(40), 70);
    }

    #[test]
    fn test_snapshot_from_partial_json() {
        let snapshot: PlayerSnapshot =
            serde_json::from_str(r#"{"title": "Song", "status": "playing", "volume": 80}"#)
                .unwrap();
        assert_eq!(snapshot.title, "Song");
        assert_eq!(snapshot.status, PlaybackStatus::Playing);
        assert_eq!(snapshot.artists, vec!["Unknown".to_string()]);
        assert_eq!(snapshot.duration, 0);
    }
}
