//! Synthetic media for the desktop host.
//!
//! Real decoding is out of reach here, so every clip found on disk plays as
//! a moving stripe pattern tinted from its file name for a fixed duration.

use std::fs;
use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use log::{debug, info, warn};
use turtle_core::apps::feed::Captions;
use turtle_core::assets::Texture;
use turtle_core::media::{MediaBackend, MediaPlayer, MediaSource};

/// File extensions picked up as clips.
const EXTENSIONS: [&str; 2] = ["webm", "mp4"];

/// Frame size, matching the feed's 230:375 video area at quarter scale.
const FRAME_WIDTH: u32 = 58;
const FRAME_HEIGHT: u32 = 94;

pub struct SyntheticMedia {
    sources: Vec<MediaSource>,
    clip_seconds: f32,
}

impl SyntheticMedia {
    /// List the clips in `dir`. A missing directory yields an empty catalog.
    pub fn scan(dir: &Path, clip_seconds: f32) -> Self {
        let sources = match fs::read_dir(dir) {
            Ok(entries) => {
                let mut paths: Vec<PathBuf> = entries
                    .filter_map(Result::ok)
                    .map(|entry| entry.path())
                    .filter(|path| is_clip(path))
                    .collect();
                paths.sort();
                paths.into_iter().map(MediaSource::new).collect()
            }
            Err(e) => {
                warn!("No clips in {}: {}", dir.display(), e);
                Vec::new()
            }
        };
        info!("Found {} clips in {}", sources.len(), dir.display());
        Self {
            sources,
            clip_seconds,
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

fn is_clip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

impl MediaBackend for SyntheticMedia {
    type Player = SyntheticPlayer;

    fn catalog(&self) -> Vec<MediaSource> {
        self.sources.clone()
    }

    fn open(&mut self, source: &MediaSource) -> Option<SyntheticPlayer> {
        if !self.sources.contains(source) {
            return None;
        }
        debug!("Opening {}", source.key());
        Some(SyntheticPlayer::new(source.key(), self.clip_seconds))
    }
}

pub struct SyntheticPlayer {
    tint: Rgb565,
    duration: f32,
    position: f32,
    playing: bool,
    has_source: bool,
    volume: f32,
    frame: Option<Texture>,
}

impl SyntheticPlayer {
    fn new(key: &str, duration: f32) -> Self {
        Self {
            tint: tint_for(key),
            duration,
            position: 0.0,
            playing: false,
            has_source: true,
            volume: 1.0,
            frame: None,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    fn render(&mut self) {
        let tint = self.tint;
        let shift = (self.position * 30.0) as u32;
        self.frame = Some(Texture::from_fn(FRAME_WIDTH, FRAME_HEIGHT, |x, y| {
            let band = ((x + y + shift) / 8) % 2 == 0;
            Some(if band { tint } else { darken(tint) })
        }));
    }
}

impl MediaPlayer for SyntheticPlayer {
    fn play(&mut self) {
        if self.has_source {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek_to_start(&mut self) {
        self.position = 0.0;
        if self.has_source {
            self.render();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn has_source(&self) -> bool {
        self.has_source
    }

    fn update(&mut self, dt: f32) {
        if !self.has_source {
            return;
        }
        if self.playing {
            self.position += dt;
            if self.position >= self.duration {
                self.playing = false;
                self.has_source = false;
                return;
            }
            self.render();
        } else if self.frame.is_none() {
            self.render();
        }
    }

    fn frame(&self) -> Option<&Texture> {
        self.frame.as_ref()
    }
}

/// Stable color derived from a clip name.
fn tint_for(key: &str) -> Rgb565 {
    let hash = key
        .bytes()
        .fold(2166136261u32, |h, b| (h ^ u32::from(b)).wrapping_mul(16777619));
    Rgb565::new(
        (hash & 0x1f) as u8 | 0x08,
        ((hash >> 5) & 0x3f) as u8 | 0x10,
        ((hash >> 11) & 0x1f) as u8 | 0x08,
    )
}

fn darken(color: Rgb565) -> Rgb565 {
    Rgb565::new(color.r() / 2, color.g() / 2, color.b() / 2)
}

/// Read the caption map. Missing or malformed files give no captions.
pub fn load_captions(path: &Path) -> Captions {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            debug!("No captions at {}: {}", path.display(), e);
            return Captions::new();
        }
    };
    serde_json::from_str(&text).unwrap_or_else(|e| {
        warn!("Ignoring captions in {}: {}", path.display(), e);
        Captions::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("turtle-sim-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_scan_picks_clip_extensions() {
        let dir = temp_dir("scan");
        for name in ["b.mp4", "a.webm", "notes.txt", "C.WEBM"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        let media = SyntheticMedia::scan(&dir, 1.0);
        let keys: Vec<_> = media
            .catalog()
            .iter()
            .map(|s| s.key().to_string())
            .collect();
        assert_eq!(keys, ["C.WEBM", "a.webm", "b.mp4"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let media = SyntheticMedia::scan(Path::new("/nonexistent/turtle/video"), 1.0);
        assert!(media.is_empty());
    }

    #[test]
    fn test_player_finishes_after_duration() {
        let mut player = SyntheticPlayer::new("a.webm", 1.0);
        player.play();
        player.update(0.5);
        assert!(player.frame().is_some());
        assert!(player.is_playing());
        player.update(0.6);
        assert!(!player.is_playing());
        assert!(!player.has_source());
        player.play();
        assert!(!player.is_playing());
    }

    #[test]
    fn test_paused_player_still_shows_a_frame() {
        let mut player = SyntheticPlayer::new("a.webm", 1.0);
        player.update(0.1);
        assert!(player.frame().is_some());
        assert_eq!(player.position(), 0.0);
    }

    #[test]
    fn test_captions_file() {
        let dir = temp_dir("captions");
        let path = dir.join("phrases.json");
        fs::write(
            &path,
            r#"{"a.webm": {"author": "turtle", "describe": "hello"}, "b.webm": {}}"#,
        )
        .unwrap();
        let captions = load_captions(&path);
        assert_eq!(captions["a.webm"].author, "turtle");
        assert_eq!(captions["b.webm"].describe, "");
        assert!(load_captions(&dir.join("missing.json")).is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }
}
