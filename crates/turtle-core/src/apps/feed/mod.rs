//! Short-video feed ("zasora").
//!
//! Clips play full-height under a header bar. Dragging vertically moves
//! between clips, a tap toggles pause or hits the like/comment column, and a
//! comment sheet can be pulled up over the lower part of the feed.
//!
//! Three [`PlaybackSlot`]s hold the previous, current and next clip so a
//! swipe can reveal a neighbour that is already decoded. Navigation rotates
//! the slots instead of reopening media.

pub mod comments;
pub mod state;

use std::collections::HashMap;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, info};
use serde::Deserialize;

use super::{App, AppId};
use crate::assets::{TextureProvider, names};
use crate::config::PhoneConfig;
use crate::media::{MediaBackend, MediaSource, PlaybackSlot};
use crate::storage::interactions::LOCAL_AUTHOR;
use crate::storage::{Comment, InteractionStore, StorageBackend};
use crate::ui::canvas::Canvas;
use crate::ui::components::text::{Anchor, TextSize, wrap_text};
use crate::ui::core::{InputEvent, MouseButton, Rect, ScreenPoint};
use crate::ui::styling::colors::{BLACK, OVERLAY, WHITE};

pub use comments::{CommentPanel, PanelAction};
pub use state::FeedState;

/// Author and description shown over a clip.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Caption {
    pub author: String,
    pub describe: String,
}

/// Captions keyed by clip file name.
pub type Captions = HashMap<String, Caption>;

/// Inset of the like/comment column from the right edge.
const ACTION_INSET: f32 = 25.0;
/// Hit box edge of a like/comment button.
const ACTION_HIT: f32 = 35.0;
/// Distance from the like button down to the comment button.
const ACTION_SPACING: f32 = 65.0;

pub struct FeedApp<B: MediaBackend, S> {
    media: B,
    state: FeedState,
    store: InteractionStore<S>,
    captions: Captions,
    panel: CommentPanel,
    current: PlaybackSlot<B::Player>,
    next: PlaybackSlot<B::Player>,
    prev: PlaybackSlot<B::Player>,
    running: bool,
    swiping: bool,
    swipe_start_y: f32,
    viewport: Rect,
    scale: f32,
    header_height: f32,
    tap_slop: f32,
    commit_ratio: f32,
}

impl<B: MediaBackend, S: StorageBackend> FeedApp<B, S> {
    /// Build the playlist from the backend's catalog and load persisted
    /// interactions. No media is opened until [`App::start`].
    pub fn new(media: B, storage: S, config: &PhoneConfig, viewport: Rect, scale: f32) -> Self {
        let playlist = media.catalog();
        info!("Feed playlist has {} clips", playlist.len());
        Self {
            state: FeedState::new(playlist, config.shuffle_seed),
            media,
            store: InteractionStore::load(storage),
            captions: Captions::new(),
            panel: CommentPanel::new(config.comment_max_chars),
            current: PlaybackSlot::new(),
            next: PlaybackSlot::new(),
            prev: PlaybackSlot::new(),
            running: false,
            swiping: false,
            swipe_start_y: 0.0,
            viewport,
            scale,
            header_height: config.feed_header_height,
            tap_slop: config.tap_slop,
            commit_ratio: config.swipe_commit_ratio,
        }
    }

    pub fn with_captions(mut self, captions: Captions) -> Self {
        self.captions = captions;
        self
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn store(&self) -> &InteractionStore<S> {
        &self.store
    }

    pub fn panel(&self) -> &CommentPanel {
        &self.panel
    }

    pub fn media(&self) -> &B {
        &self.media
    }

    pub fn is_swiping(&self) -> bool {
        self.swiping
    }

    pub fn current_slot(&self) -> &PlaybackSlot<B::Player> {
        &self.current
    }

    pub fn current_key(&self) -> Option<&str> {
        self.state.current().map(MediaSource::key)
    }

    /// Viewport minus the header bar.
    pub fn video_area(&self) -> Rect {
        let vp = self.viewport;
        Rect::new(vp.x, vp.y, vp.width, vp.height - self.header_height * self.scale)
    }

    pub fn like_center(&self) -> ScreenPoint {
        let video = self.video_area();
        ScreenPoint::new(
            video.right() - ACTION_INSET * self.scale,
            video.y + video.height / 2.0,
        )
    }

    pub fn comment_center(&self) -> ScreenPoint {
        let like = self.like_center();
        ScreenPoint::new(like.x, like.y - ACTION_SPACING * self.scale)
    }

    fn panel_bounds(&self) -> Rect {
        CommentPanel::bounds(self.viewport)
    }

    /// Open the current, next and previous slots for the current position.
    fn load_slots(&mut self) {
        match self.state.current() {
            Some(source) => {
                self.current.load(&mut self.media, source, true);
            }
            None => self.current.release(),
        }
        self.load_next();
        self.load_prev();
    }

    fn load_next(&mut self) {
        match self.state.next_neighbor() {
            Some(source) => {
                self.next.load(&mut self.media, source, false);
            }
            None => self.next.release(),
        }
    }

    fn load_prev(&mut self) {
        match self.state.prev_neighbor() {
            Some(source) => {
                self.prev.load(&mut self.media, source, false);
            }
            None => self.prev.release(),
        }
    }

    /// Play the current slot from its start, reopening it when the promoted
    /// player has already run out of media.
    fn play_current_from_start(&mut self) {
        if self.current.is_finished()
            && let Some(source) = self.state.current()
        {
            self.current.load(&mut self.media, source, true);
        }
        self.current.seek_to_start();
        self.current.play();
    }

    fn log_position(&self) {
        if let Some(key) = self.current_key() {
            info!(
                "Feed at {} ({}/{})",
                key,
                self.state.position() + 1,
                self.state.len()
            );
        }
    }

    /// Move to the next clip: previous ← current ← next ← fresh preload.
    pub fn go_next(&mut self) {
        if self.state.is_empty() {
            return;
        }
        self.state.next();
        self.prev.release();
        core::mem::swap(&mut self.prev, &mut self.current);
        core::mem::swap(&mut self.current, &mut self.next);
        self.prev.pause();
        if self.state.prev_neighbor().is_none() {
            self.prev.release();
        }
        self.load_next();
        self.play_current_from_start();
        self.log_position();
    }

    /// Move to the previous clip. Returns `false` at the first clip.
    pub fn go_prev(&mut self) -> bool {
        if self.state.position() == 0 {
            return false;
        }
        self.state.prev();
        self.next.release();
        core::mem::swap(&mut self.next, &mut self.current);
        core::mem::swap(&mut self.current, &mut self.prev);
        self.next.pause();
        self.load_prev();
        self.play_current_from_start();
        self.log_position();
        true
    }

    /// Resume the current clip unless the user paused it or the comment
    /// sheet covers it.
    fn resume(&mut self) {
        if !self.state.is_paused() && !self.state.comments_open() {
            self.current.play();
        }
    }

    fn finalize_swipe(&mut self) {
        let threshold = self.video_area().height * self.commit_ratio;
        let offset = self.state.take_offset();
        if offset > threshold {
            self.go_next();
            return;
        }
        if offset < -threshold && self.go_prev() {
            return;
        }
        debug!("Swipe of {:.1} sprang back", offset);
        self.resume();
    }

    fn handle_tap(&mut self, point: ScreenPoint) {
        self.state.take_offset();
        self.resume();

        let half = ACTION_HIT * self.scale / 2.0;
        let like = self.like_center();
        let comment = self.comment_center();
        if (point.x - like.x).abs() <= half {
            if (point.y - like.y).abs() <= half {
                self.toggle_like();
                return;
            }
            if (point.y - comment.y).abs() <= half {
                self.open_comments();
                return;
            }
        }

        let paused = !self.state.is_paused();
        self.state.set_paused(paused);
        if paused {
            self.current.pause();
        } else {
            self.current.play();
        }
    }

    pub fn toggle_like(&mut self) {
        if let Some(source) = self.state.current() {
            let liked = self.store.toggle_like(source.key());
            debug!("{} {}", if liked { "Liked" } else { "Unliked" }, source.key());
        }
    }

    pub fn open_comments(&mut self) {
        self.state.set_comments_open(true);
        self.current.pause();
    }

    fn close_comments(&mut self) {
        self.state.set_comments_open(false);
        self.resume();
    }

    fn on_press(&mut self, point: ScreenPoint, button: MouseButton) -> bool {
        if self.state.comments_open() {
            let panel = self.panel_bounds();
            match self.panel.on_press(point, panel, self.scale) {
                PanelAction::Close | PanelAction::Outside => self.close_comments(),
                PanelAction::Consumed => {}
            }
            return true;
        }
        if self.viewport.contains(point) && button == MouseButton::Left {
            self.swiping = true;
            self.swipe_start_y = point.y;
            return true;
        }
        false
    }

    fn on_release(&mut self, point: ScreenPoint, button: MouseButton) -> bool {
        if !self.swiping || button != MouseButton::Left {
            return false;
        }
        self.swiping = false;
        if (self.swipe_start_y - point.y).abs() < self.tap_slop {
            self.handle_tap(point);
        } else {
            self.finalize_swipe();
        }
        true
    }

    fn submit_comment(&mut self, text: String) {
        if let Some(source) = self.state.current() {
            debug!("New comment on {}", source.key());
            self.store
                .add_comment(source.key(), Comment::new(LOCAL_AUTHOR, text));
        }
    }

    fn draw_header<D, A>(&self, canvas: &mut Canvas<'_, D, A>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        let s = self.scale;
        let vp = self.viewport;
        let height = self.header_height * s;
        let bar = Rect::new(vp.x, vp.top() - height, vp.width, height);
        canvas.fill_rect(bar, OVERLAY)?;

        let logo = 40.0 * s;
        let mid = bar.center().y;
        let logo_rect = Rect::new(vp.x + 10.0 * s, mid - logo / 2.0, logo, logo);
        canvas.texture(names::FEED_ICON, logo_rect)?;
        canvas.text(
            "ZASORA",
            ScreenPoint::new(logo_rect.right() + 15.0 * s, mid),
            TextSize::from_points(22.0 * s),
            WHITE,
            Anchor::MIDDLE_LEFT,
        )
    }

    fn draw_caption<D, A>(
        &self,
        canvas: &mut Canvas<'_, D, A>,
        caption: &Caption,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        if caption.author.is_empty() && caption.describe.is_empty() {
            return Ok(());
        }
        let s = self.scale;
        let vp = self.viewport;
        let pad = 10.0 * s;
        let author_pt = 14.0 * s;
        let desc_pt = 12.0 * s;
        let width = vp.width - 70.0 * s;
        let lines = wrap_text(&caption.describe, width, desc_pt);

        let author_h = if caption.author.is_empty() {
            0.0
        } else {
            author_pt * 1.5
        };
        let line_h = desc_pt * 1.3;
        let height = pad * 2.0 + author_h + lines.len() as f32 * line_h;
        let bg = Rect::new(vp.x + 5.0 * s, vp.y + 10.0 * s, width + pad * 2.0, height);
        canvas.dim(bg)?;

        let x = bg.x + pad;
        let mut y = bg.top() - pad;
        if !caption.author.is_empty() {
            canvas.text(
                &format!("@{}", caption.author),
                ScreenPoint::new(x, y),
                TextSize::from_points(author_pt),
                WHITE,
                Anchor::TOP_LEFT,
            )?;
            y -= author_h;
        }
        for line in &lines {
            canvas.text(
                line,
                ScreenPoint::new(x, y),
                TextSize::from_points(desc_pt),
                WHITE,
                Anchor::TOP_LEFT,
            )?;
            y -= line_h;
        }
        Ok(())
    }

    fn draw_actions<D, A>(&self, canvas: &mut Canvas<'_, D, A>, key: &str) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        let s = self.scale;
        let radius = 18.0 * s;
        let like_texture = if self.store.is_liked(key) {
            names::LIKE
        } else {
            names::UNLIKE
        };
        let buttons = [
            (self.like_center(), like_texture, self.store.likes(key)),
            (
                self.comment_center(),
                names::COMMENT,
                self.store.comments(key).len() as i64,
            ),
        ];
        for (center, texture, count) in buttons {
            canvas.fill_circle(center, radius, OVERLAY)?;
            canvas.texture(texture, Rect::centered(center, radius * 1.2, radius * 1.2))?;
            canvas.text(
                &count.to_string(),
                ScreenPoint::new(center.x, center.y - radius - 5.0 * s),
                TextSize::from_points(12.0 * s),
                WHITE,
                Anchor::TOP_CENTER,
            )?;
        }
        Ok(())
    }

    fn draw_paused<D, A>(&self, canvas: &mut Canvas<'_, D, A>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        let s = self.scale;
        let video = self.video_area();
        let c = ScreenPoint::new(video.center().x, video.y + video.height / 2.0);
        canvas.fill_circle(c, 30.0 * s, OVERLAY)?;
        canvas.fill_triangle(
            ScreenPoint::new(c.x - 10.0 * s, c.y + 15.0 * s),
            ScreenPoint::new(c.x - 10.0 * s, c.y - 15.0 * s),
            ScreenPoint::new(c.x + 15.0 * s, c.y),
            WHITE,
        )
    }

    fn draw_contents<D, A>(&self, canvas: &mut Canvas<'_, D, A>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        let vp = self.viewport;
        canvas.fill_rect(vp, BLACK)?;

        let video = self.video_area();
        let offset = self.state.y_offset();
        let shifted = |dy: f32| Rect::new(video.x, video.y + dy, video.width, video.height);
        if offset > 0.0
            && let Some(frame) = self.next.frame()
        {
            canvas.image(frame, shifted(offset - video.height))?;
        }
        if offset < 0.0
            && let Some(frame) = self.prev.frame()
        {
            canvas.image(frame, shifted(offset + video.height))?;
        }
        if let Some(frame) = self.current.frame() {
            canvas.image(frame, shifted(offset))?;
        }

        if self.state.is_paused() && !self.state.comments_open() {
            self.draw_paused(canvas)?;
        }

        if let Some(key) = self.current_key() {
            if let Some(caption) = self.captions.get(key) {
                self.draw_caption(canvas, caption)?;
            }
            self.draw_actions(canvas, key)?;
            if self.state.comments_open() {
                self.panel
                    .draw(canvas, self.panel_bounds(), self.scale, self.store.comments(key))?;
            }
        }

        self.draw_header(canvas)
    }
}

impl<B: MediaBackend, S: StorageBackend> App for FeedApp<B, S> {
    fn id(&self) -> AppId {
        AppId::Feed
    }

    fn title(&self) -> &str {
        "Zasora"
    }

    fn start(&mut self) {
        info!("Feed starting");
        self.running = true;
        self.load_slots();
        self.play_current_from_start();
        self.log_position();
    }

    fn stop(&mut self) {
        info!("Feed stopping");
        self.running = false;
        self.swiping = false;
        self.state.take_offset();
        self.state.set_paused(false);
        self.state.set_comments_open(false);
        self.panel.reset();
        self.current.release();
        self.next.release();
        self.prev.release();
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn resize(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    fn on_event(&mut self, event: &InputEvent) -> bool {
        if !self.running {
            return false;
        }
        match *event {
            InputEvent::Press { point, button } => self.on_press(point, button),
            InputEvent::Release { point, button } => self.on_release(point, button),
            InputEvent::Motion { dy, .. } => {
                if self.swiping && !self.state.comments_open() {
                    self.state.drag(dy);
                    self.current.pause();
                    true
                } else {
                    false
                }
            }
            InputEvent::Key(key) => {
                if !self.state.comments_open() {
                    return false;
                }
                if let Some(text) = self.panel.on_key(key) {
                    self.submit_comment(text);
                }
                true
            }
            InputEvent::Text(c) => {
                if !self.state.comments_open() {
                    return false;
                }
                self.panel.on_text(c);
                true
            }
        }
    }

    fn update(&mut self, dt: f32) {
        self.current.update(dt);
        self.next.update(dt);
        self.prev.update(dt);
        if !self.running {
            return;
        }
        let idle = !self.state.is_paused()
            && !self.swiping
            && self.state.y_offset() == 0.0
            && !self.state.comments_open();
        if idle && self.current.is_loaded() && self.current.is_finished() {
            debug!("Clip finished, advancing");
            self.go_next();
        }
    }

    fn draw<D, A>(&self, canvas: &mut Canvas<'_, D, A>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        if !self.running {
            return Ok(());
        }
        canvas.clipped(self.viewport, |c| self.draw_contents(c))
    }
}
