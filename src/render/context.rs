use std::collections::HashMap;

use crate::config::{StatusConfig, SymbolTable};
use crate::error::{Error, Result};
use crate::models::PlayerSnapshot;

/// Symbol/state key for a volume on the 0-100 scale.
pub fn volume_key(volume: u8) -> &'static str {
    match volume {
        0 => "volume.muted",
        1..=49 => "volume.low",
        50..=74 => "volume.medium",
        _ => "volume.high",
    }
}

pub fn shuffle_key(shuffle: bool) -> &'static str {
    if shuffle {
        "shuffle.enabled"
    } else {
        "shuffle.disabled"
    }
}

/// `MM:SS`, minutes are not rolled over into hours.
pub fn format_seconds(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn progress_bar(
    width: usize,
    position: u64,
    duration: u64,
    symbols: &SymbolTable,
) -> Result<String> {
    if duration == 0 {
        return Err(Error::NoTrackLoaded);
    }
    if width == 0 {
        return Ok(String::new());
    }

    let percent = (position as f64 / duration as f64).min(1.0);
    let filled = ((width as f64 * percent).floor() as usize).min(width - 1);

    let mut bar = symbols.get("progress.filled").repeat(filled);
    bar.push_str(symbols.get("progress.mark"));
    bar.push_str(&symbols.get("progress.remaining").repeat(width - filled - 1));
    Ok(bar)
}

/// Placeholder values for one snapshot.
pub struct Context {
    values: HashMap<&'static str, String>,
}

impl Context {
    pub fn new(snapshot: &PlayerSnapshot, config: &StatusConfig) -> Result<Self> {
        let symbols = &config.symbols;
        let states = &config.states;

        let status = snapshot.status.key();
        let shuffle = shuffle_key(snapshot.shuffle);
        let volume = volume_key(snapshot.volume);
        let current = format_seconds(snapshot.position);
        let duration = format_seconds(snapshot.duration);
        let progressbar = progress_bar(
            config.progressbar.width,
            snapshot.position,
            snapshot.duration,
            symbols,
        )?;

        let values = HashMap::from([
            ("title", snapshot.title.clone()),
            ("artists", snapshot.artists.join(", ")),
            ("album", snapshot.album.clone()),
            ("album.name", snapshot.album.clone()),
            ("album.artists", snapshot.album_artists.join(", ")),
            ("playback", symbols.get(status).to_string()),
            ("playback.symbol", symbols.get(status).to_string()),
            ("playback.state", states.get(status).to_string()),
            ("shuffle", symbols.get(shuffle).to_string()),
            ("shuffle.symbol", symbols.get(shuffle).to_string()),
            ("shuffle.state", states.get(shuffle).to_string()),
            ("volume", snapshot.volume.to_string()),
            ("volume.value", snapshot.volume.to_string()),
            ("volume.symbol", symbols.get(volume).to_string()),
            ("volume.state", states.get(volume).to_string()),
            ("time", current.clone()),
            ("time.current", current),
            ("duration", duration.clone()),
            ("time.duration", duration),
            ("progressbar", progressbar),
        ]);

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replace `{name}` placeholders. `{{` and `}}` are literal braces and
    /// unknown names are kept as written.
    pub fn substitute(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(i) = rest.find(['{', '}']) {
            out.push_str(&rest[..i]);
            let tail = &rest[i..];

            if tail.starts_with("{{") || tail.starts_with("}}") {
                out.push_str(&tail[..1]);
                rest = &tail[2..];
                continue;
            }

            if let Some(close) = tail.strip_prefix('{').and_then(|t| t.find('}')) {
                if let Some(value) = self.get(&tail[1..=close]) {
                    out.push_str(value);
                    rest = &tail[close + 2..];
                    continue;
                }
            }

            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }

        out.push_str(rest);
        out
    }
}
