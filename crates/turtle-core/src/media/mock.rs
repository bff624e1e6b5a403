//! Scripted media backend for tests.
//!
//! Every player writes its state into a shared [`MockLog`] so tests can
//! inspect playback after the feed has taken ownership of the players.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_graphics::pixelcolor::Rgb565;

use super::{MediaBackend, MediaPlayer, MediaSource};
use crate::assets::Texture;

#[derive(Debug, Clone)]
pub(crate) struct PlayerRecord {
    pub key: String,
    pub alive: bool,
    pub playing: bool,
    pub volume: f32,
    pub position: f32,
    pub has_source: bool,
}

#[derive(Debug, Default)]
pub(crate) struct MockLog {
    pub players: Vec<PlayerRecord>,
}

impl MockLog {
    fn latest(&self, key: &str) -> Option<&PlayerRecord> {
        self.players.iter().rev().find(|p| p.alive && p.key == key)
    }

    pub fn live_players(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    pub fn opened(&self) -> usize {
        self.players.len()
    }

    pub fn is_playing(&self, key: &str) -> bool {
        self.latest(key).is_some_and(|p| p.playing)
    }

    pub fn volume(&self, key: &str) -> Option<f32> {
        self.latest(key).map(|p| p.volume)
    }

    pub fn position(&self, key: &str) -> Option<f32> {
        self.latest(key).map(|p| p.position)
    }

    /// Keys of live players that are currently playing.
    pub fn playing_keys(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| p.alive && p.playing)
            .map(|p| p.key.clone())
            .collect()
    }

    /// Make the newest live player for `key` run out of media.
    pub fn finish(&mut self, key: &str) {
        if let Some(p) = self
            .players
            .iter_mut()
            .rev()
            .find(|p| p.alive && p.key == key)
        {
            p.playing = false;
            p.has_source = false;
        }
    }
}

pub(crate) struct ScriptedBackend {
    sources: Vec<MediaSource>,
    duration: f32,
    log: Rc<RefCell<MockLog>>,
}

impl ScriptedBackend {
    pub fn new(names: &[&str], duration: f32) -> Self {
        Self {
            sources: names
                .iter()
                .map(|name| MediaSource::new(format!("/media/{name}")))
                .collect(),
            duration,
            log: Rc::default(),
        }
    }

    pub fn log(&self) -> Rc<RefCell<MockLog>> {
        Rc::clone(&self.log)
    }
}

impl MediaBackend for ScriptedBackend {
    type Player = ScriptedPlayer;

    fn catalog(&self) -> Vec<MediaSource> {
        self.sources.clone()
    }

    fn open(&mut self, source: &MediaSource) -> Option<ScriptedPlayer> {
        if !self.sources.contains(source) {
            return None;
        }
        let mut log = self.log.borrow_mut();
        log.players.push(PlayerRecord {
            key: source.key().to_string(),
            alive: true,
            playing: false,
            volume: 1.0,
            position: 0.0,
            has_source: true,
        });
        Some(ScriptedPlayer {
            id: log.players.len() - 1,
            duration: self.duration,
            log: Rc::clone(&self.log),
            frame: None,
        })
    }
}

pub(crate) struct ScriptedPlayer {
    id: usize,
    duration: f32,
    log: Rc<RefCell<MockLog>>,
    frame: Option<Texture>,
}

impl ScriptedPlayer {
    fn with_record<R>(&self, f: impl FnOnce(&mut PlayerRecord) -> R) -> R {
        f(&mut self.log.borrow_mut().players[self.id])
    }
}

impl MediaPlayer for ScriptedPlayer {
    fn play(&mut self) {
        self.with_record(|r| {
            if r.has_source {
                r.playing = true;
            }
        });
    }

    fn pause(&mut self) {
        self.with_record(|r| r.playing = false);
    }

    fn seek_to_start(&mut self) {
        self.with_record(|r| r.position = 0.0);
    }

    fn set_volume(&mut self, volume: f32) {
        self.with_record(|r| r.volume = volume);
    }

    fn is_playing(&self) -> bool {
        self.with_record(|r| r.playing)
    }

    fn has_source(&self) -> bool {
        self.with_record(|r| r.has_source)
    }

    fn update(&mut self, dt: f32) {
        let duration = self.duration;
        let decoding = self.with_record(|r| {
            if r.playing {
                r.position += dt;
                if r.position >= duration {
                    r.playing = false;
                    r.has_source = false;
                }
            }
            r.has_source
        });
        if decoding && self.frame.is_none() {
            self.frame = Some(Texture::solid(2, 2, Rgb565::new(0, 0, 31)));
        }
    }

    fn frame(&self) -> Option<&Texture> {
        self.frame.as_ref()
    }
}

impl Drop for ScriptedPlayer {
    fn drop(&mut self) {
        self.with_record(|r| {
            r.alive = false;
            r.playing = false;
        });
    }
}
