use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::actions::{self, Action, Dispatcher, Outcome, Session};
use crate::config::{Config, StatusConfig};
use crate::models::{PlaybackStatus, PlayerSnapshot, TrackMetadata};
use crate::player::{MprisPlayer, Player};
use crate::render::render;
use crate::window::Wmctrl;

pub struct App {
    pub config: Config,
    json: bool,
    dispatcher: Dispatcher,
}

/// One line of `--json` output.
#[derive(Serialize)]
struct Response<'a, T: ?Sized> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct MetadataReport {
    volume: u8,
    shuffle: bool,
    length: u64,
    time: u64,
    status: PlaybackStatus,
    metadata: TrackMetadata,
}

impl App {
    pub fn new(config_path: Option<&Path>, json: bool) -> Result<Self> {
        let config = Config::load(config_path)?;

        Ok(Self {
            config,
            json,
            dispatcher: Dispatcher::new(),
        })
    }

    fn emit<T: Serialize + ?Sized>(&self, value: &T, text: &str) -> Result<()> {
        if self.json {
            let response = Response {
                ok: true,
                result: Some(value),
                error: None,
            };
            println!("{}", serde_json::to_string(&response)?);
        } else {
            println!("{text}");
        }
        Ok(())
    }

    fn emit_outcome(&self, outcome: &Outcome) -> Result<()> {
        self.emit(outcome, &outcome.to_string())
    }

    // Command implementations

    pub fn action_by_name(&self, name: &str, value: Option<&str>) -> Result<()> {
        let action: Action = name.parse()?;
        self.action(action, value)
    }

    pub fn action(&self, action: Action, value: Option<&str>) -> Result<()> {
        let player = if action.needs_player() {
            Some(MprisPlayer::connect()?)
        } else {
            None
        };

        let session = Session {
            player: player.as_ref().map(|p| p as &dyn Player),
            window: &Wmctrl,
            config: &self.config,
        };

        let outcome = self.dispatcher.dispatch(&session, action, value)?;
        self.emit_outcome(&outcome)
    }

    pub fn render(
        &self,
        cycle: u64,
        snapshot_path: Option<&Path>,
        config_json: Option<&str>,
    ) -> Result<()> {
        let status = match config_json {
            Some(json) => StatusConfig::from_json(json)?,
            None => self.config.status.clone(),
        };

        let snapshot = match snapshot_path {
            Some(path) => load_snapshot(path)?,
            None => MprisPlayer::connect()?.snapshot()?,
        };

        let lines = render(&snapshot, &status, cycle)?;
        self.emit_outcome(&Outcome::Status(lines))
    }

    pub fn metadata(&self) -> Result<()> {
        let player = MprisPlayer::connect()?;
        let metadata = player.metadata()?;
        let report = MetadataReport {
            volume: player.volume()?,
            shuffle: player.shuffle()?,
            length: metadata.length,
            time: player.position()?,
            status: player.playback_status()?,
            metadata,
        };

        let text = serde_json::to_string_pretty(&report)?;
        self.emit(&report, &text)
    }

    pub fn snapshot(&self) -> Result<()> {
        let snapshot = MprisPlayer::connect()?.snapshot()?;
        let text = serde_json::to_string_pretty(&snapshot)?;
        self.emit(&snapshot, &text)
    }

    pub fn complete(&self, lead: &str) -> Result<()> {
        let names = actions::complete(lead);
        self.emit(&names, &names.join("\n"))
    }

    pub fn show_config(&self) -> Result<()> {
        let text = self.config.to_toml()?;
        self.emit(&self.config, text.trim_end())
    }
}

fn load_snapshot(path: &Path) -> Result<PlayerSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| "Failed to parse snapshot")
}

/// Report a failed command as a single line. In JSON mode the failure is part
/// of the normal output, for the editor to turn into a notification.
pub fn report_error(json: bool, error: &anyhow::Error) -> ExitCode {
    tracing::debug!("{error:?}");
    let message = format!("{error:#}");
    if json {
        let response = Response::<()> {
            ok: false,
            result: None,
            error: Some(message.clone()),
        };
        match serde_json::to_string(&response) {
            Ok(line) => {
                println!("{line}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("spotify-nvim: {message} ({e})");
                ExitCode::FAILURE
            }
        }
    } else {
        eprintln!("spotify-nvim: {message}");
        ExitCode::FAILURE
    }
}
