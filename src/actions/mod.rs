use serde::Serialize;
use std::collections::HashMap;
use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::Adjustment;
use crate::player::Player;
use crate::render::{format_seconds, render};
use crate::window::WindowFocus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Toggle,
    Play,
    Pause,
    Stop,
    Next,
    Prev,
    Show,
    Status,
    Volume,
    Shuffle,
    Time,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::Toggle,
        Action::Play,
        Action::Pause,
        Action::Stop,
        Action::Next,
        Action::Prev,
        Action::Show,
        Action::Status,
        Action::Volume,
        Action::Shuffle,
        Action::Time,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Toggle => "play/pause",
            Action::Play => "play",
            Action::Pause => "pause",
            Action::Stop => "stop",
            Action::Next => "next",
            Action::Prev => "prev",
            Action::Show => "show",
            Action::Status => "status",
            Action::Volume => "volume",
            Action::Shuffle => "shuffle",
            Action::Time => "time",
        }
    }

    pub fn takes_value(self) -> bool {
        matches!(self, Action::Volume | Action::Shuffle | Action::Time)
    }

    /// Everything but focusing the window talks to the player.
    pub fn needs_player(self) -> bool {
        self != Action::Show
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "toggle" => Ok(Action::Toggle),
            "previous" => Ok(Action::Prev),
            _ => Action::ALL
                .into_iter()
                .find(|action| action.name() == name)
                .ok_or_else(|| Error::InvalidAction(s.to_string())),
        }
    }
}

/// Action names starting with `lead`, for editor command completion.
pub fn complete(lead: &str) -> Vec<&'static str> {
    let lead = lead.to_lowercase();
    Action::ALL
        .into_iter()
        .map(Action::name)
        .filter(|name| name.starts_with(&lead))
        .collect()
}

/// Result of an action, serialized bare for the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Done(bool),
    Volume(u8),
    Shuffle(bool),
    Time(u64),
    Status(Vec<String>),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Done(true) => write!(f, "Done"),
            Outcome::Done(false) => write!(f, "Failed"),
            Outcome::Volume(volume) => write!(f, "Volume: {volume}%"),
            Outcome::Shuffle(enabled) => {
                write!(f, "Shuffle: {}", if *enabled { "on" } else { "off" })
            }
            Outcome::Time(seconds) => write!(f, "Time: {}", format_seconds(*seconds)),
            Outcome::Status(lines) => write!(f, "{}", lines.join("\n")),
        }
    }
}

/// What a handler gets to work with for one command.
pub struct Session<'a> {
    pub player: Option<&'a dyn Player>,
    pub window: &'a dyn WindowFocus,
    pub config: &'a Config,
}

impl Session<'_> {
    fn player(&self) -> Result<&dyn Player> {
        self.player.ok_or(Error::PlayerNotRunning)
    }

    fn render_status(&self) -> Result<Outcome> {
        let snapshot = self.player()?.snapshot()?;
        let lines = render(&snapshot, &self.config.status, 0)?;
        Ok(Outcome::Status(lines))
    }

    /// The player applies commands asynchronously, so give it a moment
    /// before reading its state back.
    fn status_after_command(&self) -> Result<Outcome> {
        let control = &self.config.control;
        if !control.auto_show_status {
            return Ok(Outcome::Done(true));
        }

        thread::sleep(Duration::from_millis(control.wait_ms));
        match self.render_status() {
            Err(Error::NoTrackLoaded) => Ok(Outcome::Done(true)),
            other => other,
        }
    }
}

type Handler = fn(&Session<'_>, Option<&str>) -> Result<Outcome>;

pub struct Dispatcher {
    handlers: HashMap<Action, Handler>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        let handlers = HashMap::from([
            (Action::Toggle, toggle as Handler),
            (Action::Play, play as Handler),
            (Action::Pause, pause as Handler),
            (Action::Stop, stop as Handler),
            (Action::Next, next as Handler),
            (Action::Prev, prev as Handler),
            (Action::Show, show as Handler),
            (Action::Status, status as Handler),
            (Action::Volume, volume as Handler),
            (Action::Shuffle, shuffle as Handler),
            (Action::Time, time as Handler),
        ]);
        Self { handlers }
    }

    pub fn dispatch(
        &self,
        session: &Session<'_>,
        action: Action,
        value: Option<&str>,
    ) -> Result<Outcome> {
        let handler = self
            .handlers
            .get(&action)
            .ok_or_else(|| Error::InvalidAction(action.to_string()))?;

        let value = value.map(str::trim).filter(|v| !v.is_empty());
        if value.is_some() && !action.takes_value() {
            debug!("Ignoring value for {action}");
        }
        let value = value.filter(|_| action.takes_value());

        debug!("Dispatching {action} {value:?}");
        handler(session, value)
    }
}

fn transport(session: &Session<'_>, command: fn(&dyn Player) -> Result<()>) -> Result<Outcome> {
    command(session.player()?)?;
    session.status_after_command()
}

fn toggle(session: &Session<'_>, _value: Option<&str>) -> Result<Outcome> {
    transport(session, |player| player.toggle())
}

fn play(session: &Session<'_>, _value: Option<&str>) -> Result<Outcome> {
    transport(session, |player| player.play())
}

fn pause(session: &Session<'_>, _value: Option<&str>) -> Result<Outcome> {
    transport(session, |player| player.pause())
}

fn stop(session: &Session<'_>, _value: Option<&str>) -> Result<Outcome> {
    transport(session, |player| player.stop())
}

fn next(session: &Session<'_>, _value: Option<&str>) -> Result<Outcome> {
    transport(session, |player| player.next())
}

fn prev(session: &Session<'_>, _value: Option<&str>) -> Result<Outcome> {
    transport(session, |player| player.previous())
}

fn show(session: &Session<'_>, _value: Option<&str>) -> Result<Outcome> {
    session.window.focus(&session.config.control.process_name)?;
    Ok(Outcome::Done(true))
}

fn status(session: &Session<'_>, _value: Option<&str>) -> Result<Outcome> {
    session.render_status()
}

fn volume(session: &Session<'_>, value: Option<&str>) -> Result<Outcome> {
    let player = session.player()?;
    let volume = match value {
        Some(value) => player.adjust_volume(Adjustment::parse("volume", value)?)?,
        None => player.volume()?,
    };
    Ok(Outcome::Volume(volume))
}

fn time(session: &Session<'_>, value: Option<&str>) -> Result<Outcome> {
    let player = session.player()?;
    let position = match value {
        Some(value) => player.adjust_time(Adjustment::parse("time", value)?)?,
        None => player.position()?,
    };
    Ok(Outcome::Time(position))
}

const SHUFFLE_ON: [&str; 3] = ["yes", "on", "true"];
const SHUFFLE_OFF: [&str; 3] = ["no", "off", "false"];

fn shuffle(session: &Session<'_>, value: Option<&str>) -> Result<Outcome> {
    let player = session.player()?;
    let Some(value) = value else {
        return Ok(Outcome::Shuffle(player.shuffle()?));
    };

    let lowered = value.to_lowercase();
    let enabled = if SHUFFLE_ON.contains(&lowered.as_str()) {
        true
    } else if SHUFFLE_OFF.contains(&lowered.as_str()) {
        false
    } else if lowered == "toggle" {
        !player.shuffle()?
    } else {
        return Err(Error::InvalidOptionValue {
            option: "shuffle",
            value: value.to_string(),
            expected: format!("{}, {}, toggle", SHUFFLE_ON.join(", "), SHUFFLE_OFF.join(", ")),
        });
    };

    player.set_shuffle(enabled)?;
    Ok(Outcome::Shuffle(enabled))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::models::PlaybackStatus;
    use crate::player::fake::FakePlayer;

    #[derive(Default)]
    struct FakeWindow {
        focused: RefCell<Vec<String>>,
        running: bool,
    }

    impl WindowFocus for FakeWindow {
        fn focus(&self, process: &str) -> Result<()> {
            if !self.running {
                return Err(Error::ProcessNotRunning(process.to_string()));
            }
            self.focused.borrow_mut().push(process.to_string());
            Ok(())
        }
    }

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.control.auto_show_status = false;
        config.control.wait_ms = 0;
        config
    }

    fn run(
        player: &FakePlayer,
        config: &Config,
        name: &str,
        value: Option<&str>,
    ) -> Result<Outcome> {
        let window = FakeWindow::default();
        let session = Session {
            player: Some(player),
            window: &window,
            config,
        };
        let action: Action = name.parse()?;
        Dispatcher::new().dispatch(&session, action, value)
    }

    #[test]
    fn test_action_names() {
        assert_eq!("play/pause".parse::<Action>().unwrap(), Action::Toggle);
        assert_eq!("toggle".parse::<Action>().unwrap(), Action::Toggle);
        assert_eq!("Prev".parse::<Action>().unwrap(), Action::Prev);
        assert_eq!("previous".parse::<Action>().unwrap(), Action::Prev);
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>().unwrap(), action);
        }
        assert!(matches!(
            "rewind".parse::<Action>(),
            Err(Error::InvalidAction(name)) if name == "rewind"
        ));
    }

    #[test]
    fn test_complete() {
        assert_eq!(complete("p"), vec!["play/pause", "play", "pause", "prev"]);
        assert_eq!(complete("SH"), vec!["show", "shuffle"]);
        assert_eq!(complete("").len(), Action::ALL.len());
        assert!(complete("x").is_empty());
    }

    #[test]
    fn test_transport_without_status() {
        let player = FakePlayer::default();
        let config = quiet_config();
        assert_eq!(
            run(&player, &config, "play/pause", None).unwrap(),
            Outcome::Done(true)
        );
        assert_eq!(player.status.get(), PlaybackStatus::Playing);
        run(&player, &config, "next", None).unwrap();
        run(&player, &config, "prev", None).unwrap();
        run(&player, &config, "stop", None).unwrap();
        assert_eq!(
            *player.calls.borrow(),
            vec!["toggle", "next", "previous", "stop"]
        );
    }

    #[test]
    fn test_transport_shows_status() {
        let player = FakePlayer::default();
        let mut config = quiet_config();
        config.control.auto_show_status = true;

        let Outcome::Status(lines) = run(&player, &config, "play", None).unwrap() else {
            panic!("expected status");
        };
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0].trim(), "Song");
        assert!(lines[4].starts_with("►"));
    }

    #[test]
    fn test_status_without_track_after_stop() {
        let player = FakePlayer::default();
        player.metadata.borrow_mut().length = 0;
        let mut config = quiet_config();
        config.control.auto_show_status = true;

        assert_eq!(
            run(&player, &config, "stop", None).unwrap(),
            Outcome::Done(true)
        );
        assert!(matches!(
            run(&player, &config, "status", None),
            Err(Error::NoTrackLoaded)
        ));
    }

    #[test]
    fn test_volume() {
        let player = FakePlayer::default();
        let config = quiet_config();
        assert_eq!(
            run(&player, &config, "volume", None).unwrap(),
            Outcome::Volume(50)
        );
        assert_eq!(
            run(&player, &config, "volume", Some("+20")).unwrap(),
            Outcome::Volume(70)
        );
        assert_eq!(
            run(&player, &config, "volume", Some("-90")).unwrap(),
            Outcome::Volume(0)
        );
        assert_eq!(
            run(&player, &config, "volume", Some("35")).unwrap(),
            Outcome::Volume(35)
        );
        assert!(matches!(
            run(&player, &config, "volume", Some("max")),
            Err(Error::InvalidOptionValue { option: "volume", .. })
        ));
    }

    #[test]
    fn test_time() {
        let player = FakePlayer::default();
        let config = quiet_config();
        assert_eq!(
            run(&player, &config, "time", Some("-10")).unwrap(),
            Outcome::Time(20)
        );
        assert_eq!(
            run(&player, &config, "time", Some("120")).unwrap(),
            Outcome::Time(120)
        );
        assert_eq!(
            run(&player, &config, "time", None).unwrap(),
            Outcome::Time(120)
        );
    }

    #[test]
    fn test_shuffle_values() {
        let player = FakePlayer::default();
        let config = quiet_config();
        assert_eq!(
            run(&player, &config, "shuffle", Some("ON")).unwrap(),
            Outcome::Shuffle(true)
        );
        assert_eq!(
            run(&player, &config, "shuffle", Some("toggle")).unwrap(),
            Outcome::Shuffle(false)
        );
        assert_eq!(
            run(&player, &config, "shuffle", Some("yes")).unwrap(),
            Outcome::Shuffle(true)
        );
        assert_eq!(
            run(&player, &config, "shuffle", None).unwrap(),
            Outcome::Shuffle(true)
        );

        let err = run(&player, &config, "shuffle", Some("maybe")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid shuffle value `maybe`. Valid options are: yes, on, true, no, off, false, toggle"
        );
        assert!(player.shuffle.get());
    }

    #[test]
    fn test_value_ignored_for_plain_actions() {
        let player = FakePlayer::default();
        let config = quiet_config();
        run(&player, &config, "pause", Some("42")).unwrap();
        assert_eq!(*player.calls.borrow(), vec!["pause"]);
    }

    #[test]
    fn test_show_focuses_process() {
        let config = quiet_config();
        let window = FakeWindow {
            running: true,
            ..FakeWindow::default()
        };
        let session = Session {
            player: None,
            window: &window,
            config: &config,
        };
        let outcome = Dispatcher::new()
            .dispatch(&session, Action::Show, None)
            .unwrap();
        assert_eq!(outcome, Outcome::Done(true));
        assert_eq!(*window.focused.borrow(), vec!["spotify"]);

        let stopped = FakeWindow::default();
        let session = Session {
            window: &stopped,
            ..session
        };
        assert!(matches!(
            Dispatcher::new().dispatch(&session, Action::Show, None),
            Err(Error::ProcessNotRunning(name)) if name == "spotify"
        ));
    }

    #[test]
    fn test_missing_player() {
        let config = quiet_config();
        let window = FakeWindow::default();
        let session = Session {
            player: None,
            window: &window,
            config: &config,
        };
        assert!(matches!(
            Dispatcher::new().dispatch(&session, Action::Play, None),
            Err(Error::PlayerNotRunning)
        ));
    }

    #[test]
    fn test_outcome_json() {
        assert_eq!(serde_json::to_string(&Outcome::Done(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Outcome::Volume(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&Outcome::Status(vec!["a".into(), "".into()])).unwrap(),
            r#"["a",""]"#
        );
    }
}
