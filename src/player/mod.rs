use crate::error::{Error, Result};
use crate::models::{Adjustment, PlaybackStatus, PlayerSnapshot, TrackMetadata};

mod mpris;

pub use mpris::MprisPlayer;

/// Control and read access to a media player.
pub trait Player {
    fn play(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn toggle(&self) -> Result<()>;
    fn stop(&self) -> Result<()>;
    fn next(&self) -> Result<()>;
    fn previous(&self) -> Result<()>;

    /// Volume on the 0-100 scale.
    fn volume(&self) -> Result<u8>;
    fn set_volume(&self, volume: u8) -> Result<()>;

    fn shuffle(&self) -> Result<bool>;
    fn set_shuffle(&self, enabled: bool) -> Result<()>;

    /// Playback position in seconds.
    fn position(&self) -> Result<u64>;
    /// Move the playback position by `offset` seconds.
    fn seek(&self, offset: i64) -> Result<()>;
    fn set_position(&self, track_id: &str, position: u64) -> Result<()>;

    fn playback_status(&self) -> Result<PlaybackStatus>;
    fn metadata(&self) -> Result<TrackMetadata>;

    /// Apply an absolute or relative volume change, clamped to 0-100, and
    /// return the volume the player reports afterwards.
    fn adjust_volume(&self, adjustment: Adjustment) -> Result<u8> {
        let current = i64::from(self.volume()?);
        let volume = adjustment.apply(current).clamp(0, 100) as u8;
        self.set_volume(volume)?;
        self.volume()
    }

    /// Seek relative to the current position, or jump to an absolute one.
    /// The player reports where it actually ended up, which differs from the
    /// request when seeking past the end of the track.
    fn adjust_time(&self, adjustment: Adjustment) -> Result<u64> {
        match adjustment {
            Adjustment::Relative(offset) => {
                self.seek(offset)?;
            }
            Adjustment::Absolute(position) => {
                let metadata = self.metadata()?;
                let Some(track_id) = metadata.id else {
                    return Err(Error::NoTrackLoaded);
                };
                self.set_position(&track_id, position.max(0) as u64)?;
            }
        }
        self.position()
    }

    fn snapshot(&self) -> Result<PlayerSnapshot> {
        let metadata = self.metadata()?;
        Ok(PlayerSnapshot {
            title: metadata.title,
            artists: metadata.artists,
            album: metadata.album,
            album_artists: metadata.album_artists,
            status: self.playback_status()?,
            shuffle: self.shuffle()?,
            volume: self.volume()?,
            position: self.position()?,
            duration: metadata.length,
        })
    }
}
