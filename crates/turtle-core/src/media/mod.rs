//! Media playback seam.
//!
//! The feed never decodes video itself. A host supplies a [`MediaBackend`]
//! that lists the available clips and opens players for them; the feed only
//! drives play/pause/seek and reads back the latest frame.

pub mod slot;

#[cfg(test)]
pub(crate) mod mock;

use std::path::{Path, PathBuf};

use crate::assets::Texture;

pub use slot::PlaybackSlot;

/// One playable clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    path: PathBuf,
    key: String,
}

impl MediaSource {
    /// The interaction key is the file name, so interactions survive the
    /// media directory moving.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, key }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Handle to one clip being decoded.
pub trait MediaPlayer {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek_to_start(&mut self);
    /// 0.0 (muted) to 1.0
    fn set_volume(&mut self, volume: f32);
    fn is_playing(&self) -> bool;
    /// False once the clip has been fully consumed.
    fn has_source(&self) -> bool;
    /// Advance decoding by `dt` seconds.
    fn update(&mut self, dt: f32);
    /// Most recent decoded frame, if any has been produced yet.
    fn frame(&self) -> Option<&Texture>;
}

/// Playlist provider and player factory.
pub trait MediaBackend {
    type Player: MediaPlayer;

    /// Every clip available to the feed, in a stable order.
    fn catalog(&self) -> Vec<MediaSource>;

    /// Open a player for `source`, or `None` when it cannot be played.
    fn open(&mut self, source: &MediaSource) -> Option<Self::Player>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_key_is_file_name() {
        let source = MediaSource::new("/assets/video/zasora/cat.webm");
        assert_eq!(source.key(), "cat.webm");
        assert_eq!(source.path(), Path::new("/assets/video/zasora/cat.webm"));
    }
}
