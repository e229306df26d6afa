//! Spotify over the MPRIS D-Bus interface.

#[cfg(target_os = "linux")]
pub use linux::MprisPlayer;
#[cfg(not(target_os = "linux"))]
pub use unsupported::MprisPlayer;

#[cfg(target_os = "linux")]
mod linux {
    use std::collections::HashMap;

    use tracing::debug;
    use zbus::blocking::fdo::DBusProxy;
    use zbus::blocking::{Connection, Proxy};
    use zbus::names::BusName;
    use zbus::zvariant::{ObjectPath, OwnedValue, Value};

    use crate::error::{Error, Result};
    use crate::models::{PlaybackStatus, TrackMetadata};
    use crate::player::Player;

    const BUS_NAME: &str = "org.mpris.MediaPlayer2.spotify";
    const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
    const PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";
    const MICROS: i64 = 1_000_000;

    pub struct MprisPlayer {
        proxy: Proxy<'static>,
    }

    impl MprisPlayer {
        /// Connect to the session bus and make sure Spotify is on it.
        pub fn connect() -> Result<Self> {
            let connection = Connection::session()?;
            let dbus = DBusProxy::new(&connection)?;
            let name = BusName::try_from(BUS_NAME).map_err(zbus::Error::from)?;
            if !dbus.name_has_owner(name)? {
                debug!("{BUS_NAME} has no owner");
                return Err(Error::PlayerNotRunning);
            }

            let proxy = Proxy::new(&connection, BUS_NAME, OBJECT_PATH, PLAYER_INTERFACE)?;
            Ok(Self { proxy })
        }

        fn call(&self, method: &str) -> Result<()> {
            debug!("Calling {method}");
            self.proxy.call_method(method, &())?;
            Ok(())
        }
    }

    impl Player for MprisPlayer {
        fn play(&self) -> Result<()> {
            self.call("Play")
        }

        fn pause(&self) -> Result<()> {
            self.call("Pause")
        }

        fn toggle(&self) -> Result<()> {
            self.call("PlayPause")
        }

        fn stop(&self) -> Result<()> {
            self.call("Stop")
        }

        fn next(&self) -> Result<()> {
            self.call("Next")
        }

        fn previous(&self) -> Result<()> {
            self.call("Previous")
        }

        fn volume(&self) -> Result<u8> {
            let fraction: f64 = self.proxy.get_property("Volume")?;
            Ok((fraction * 100.0).round().clamp(0.0, 100.0) as u8)
        }

        fn set_volume(&self, volume: u8) -> Result<()> {
            self.proxy
                .set_property("Volume", f64::from(volume) / 100.0)?;
            Ok(())
        }

        fn shuffle(&self) -> Result<bool> {
            Ok(self.proxy.get_property("Shuffle")?)
        }

        fn set_shuffle(&self, enabled: bool) -> Result<()> {
            self.proxy.set_property("Shuffle", enabled)?;
            Ok(())
        }

        fn position(&self) -> Result<u64> {
            let micros: i64 = self.proxy.get_property("Position")?;
            Ok((micros / MICROS).max(0) as u64)
        }

        fn seek(&self, offset: i64) -> Result<()> {
            debug!("Seeking {offset}s");
            self.proxy
                .call_method("Seek", &offset.saturating_mul(MICROS))?;
            Ok(())
        }

        fn set_position(&self, track_id: &str, position: u64) -> Result<()> {
            let track = ObjectPath::try_from(track_id).map_err(zbus::Error::from)?;
            let micros = i64::try_from(position)
                .unwrap_or(i64::MAX)
                .saturating_mul(MICROS);
            debug!("Setting position of {track_id} to {position}s");
            self.proxy.call_method("SetPosition", &(track, micros))?;
            Ok(())
        }

        fn playback_status(&self) -> Result<PlaybackStatus> {
            let status: String = self.proxy.get_property("PlaybackStatus")?;
            Ok(status.parse().unwrap_or_else(|e| {
                debug!("{e}");
                PlaybackStatus::Stopped
            }))
        }

        fn metadata(&self) -> Result<TrackMetadata> {
            let map: HashMap<String, OwnedValue> = self.proxy.get_property("Metadata")?;
            Ok(parse_metadata(&map))
        }
    }

    pub(super) fn parse_metadata(map: &HashMap<String, OwnedValue>) -> TrackMetadata {
        let get = |key: &str| map.get(key).map(|value| &**value);
        let defaults = TrackMetadata::default();

        TrackMetadata {
            id: get("mpris:trackid").and_then(text),
            title: get("xesam:title").and_then(text).unwrap_or(defaults.title),
            artists: get("xesam:artist")
                .and_then(texts)
                .unwrap_or(defaults.artists),
            album: get("xesam:album").and_then(text).unwrap_or(defaults.album),
            album_artists: get("xesam:albumArtist")
                .and_then(texts)
                .unwrap_or(defaults.album_artists),
            length: get("mpris:length")
                .and_then(integer)
                .map(|micros| (micros / MICROS).max(0) as u64)
                .unwrap_or(0),
            url: get("xesam:url").and_then(text),
        }
    }

    fn text(value: &Value<'_>) -> Option<String> {
        match value {
            Value::Str(s) => Some(s.to_string()),
            Value::ObjectPath(path) => Some(path.to_string()),
            Value::Value(inner) => text(inner),
            _ => None,
        }
    }

    fn texts(value: &Value<'_>) -> Option<Vec<String>> {
        match value {
            Value::Array(array) => Some(array.iter().filter_map(text).collect()),
            Value::Value(inner) => texts(inner),
            other => text(other).map(|s| vec![s]),
        }
    }

    fn integer(value: &Value<'_>) -> Option<i64> {
        match value {
            Value::I64(n) => Some(*n),
            Value::U64(n) => i64::try_from(*n).ok(),
            Value::I32(n) => Some(i64::from(*n)),
            Value::U32(n) => Some(i64::from(*n)),
            Value::Value(inner) => integer(inner),
            _ => None,
        }
    }

}

#[cfg(not(target_os = "linux"))]
mod unsupported {
    use crate::error::{Error, Result};
    use crate::models::{PlaybackStatus, TrackMetadata};
    use crate::player::Player;

    /// MPRIS only exists on Linux desktops; no value of this type is ever built.
    pub enum MprisPlayer {}

    impl MprisPlayer {
        pub fn connect() -> Result<Self> {
            Err(Error::PlayerNotRunning)
        }
    }

    impl Player for MprisPlayer {
        fn play(&self) -> Result<()> {
            match *self {}
        }
        fn pause(&self) -> Result<()> {
            match *self {}
        }
        fn toggle(&self) -> Result<()> {
            match *self {}
        }
        fn stop(&self) -> Result<()> {
            match *self {}
        }
        fn next(&self) -> Result<()> {
            match *self {}
        }
        fn previous(&self) -> Result<()> {
            match *self {}
        }
        fn volume(&self) -> Result<u8> {
            match *self {}
        }
        fn set_volume(&self, _volume: u8) -> Result<()> {
            match *self {}
        }
        fn shuffle(&self) -> Result<bool> {
            match *self {}
        }
        fn set_shuffle(&self, _enabled: bool) -> Result<()> {
            match *self {}
        }
        fn position(&self) -> Result<u64> {
            match *self {}
        }
        fn seek(&self, _offset: i64) -> Result<()> {
            match *self {}
        }
        fn set_position(&self, _track_id: &str, _position: u64) -> Result<()> {
            match *self {}
        }
        fn playback_status(&self) -> Result<PlaybackStatus> {
            match *self {}
        }
        fn metadata(&self) -> Result<TrackMetadata> {
            match *self {}
        }
    }
}
