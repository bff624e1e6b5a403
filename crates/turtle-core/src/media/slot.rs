//! A reusable holder for one feed player.

use log::debug;

use super::{MediaBackend, MediaPlayer, MediaSource};
use crate::assets::Texture;

/// One of the feed's three playback positions (previous, current, next).
///
/// A slot loaded without autoplay starts its player muted and pauses it at
/// the start as soon as the first frame is available, so a swipe can reveal
/// it without a loading gap.
pub struct PlaybackSlot<P> {
    player: Option<P>,
    playing: bool,
    wants_preload: bool,
}

impl<P> Default for PlaybackSlot<P> {
    fn default() -> Self {
        Self {
            player: None,
            playing: false,
            wants_preload: false,
        }
    }
}

impl<P: MediaPlayer> PlaybackSlot<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever the slot holds with a player for `source`.
    ///
    /// Returns `false` (and leaves the slot empty) when the backend cannot
    /// open the clip.
    pub fn load<B>(&mut self, backend: &mut B, source: &MediaSource, autoplay: bool) -> bool
    where
        B: MediaBackend<Player = P>,
    {
        self.release();
        let Some(mut player) = backend.open(source) else {
            debug!("Could not open {}", source.key());
            return false;
        };
        player.set_volume(if autoplay { 1.0 } else { 0.0 });
        player.play();
        self.player = Some(player);
        self.playing = autoplay;
        self.wants_preload = !autoplay;
        true
    }

    pub fn update(&mut self, dt: f32) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        player.update(dt);
        if self.wants_preload && player.frame().is_some() {
            player.pause();
            player.seek_to_start();
            player.set_volume(1.0);
            self.wants_preload = false;
        }
    }

    pub fn play(&mut self) {
        if let Some(player) = self.player.as_mut()
            && !self.playing
        {
            self.wants_preload = false;
            player.set_volume(1.0);
            player.play();
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        if let Some(player) = self.player.as_mut()
            && self.playing
        {
            player.pause();
            self.playing = false;
        }
    }

    pub fn seek_to_start(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.seek_to_start();
        }
    }

    /// An empty slot counts as finished, as does a player that stopped after
    /// consuming its whole clip.
    pub fn is_finished(&self) -> bool {
        match &self.player {
            None => true,
            Some(player) => !player.is_playing() && !player.has_source(),
        }
    }

    /// Stop playback and drop the player immediately.
    pub fn release(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.pause();
        }
        self.playing = false;
        self.wants_preload = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.player.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn frame(&self) -> Option<&Texture> {
        self.player.as_ref().and_then(|p| p.frame())
    }
}
