//! Playlist position and view flags of the feed.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::media::MediaSource;

/// Feed state that does not depend on playback.
///
/// `order` is a permutation of the playlist indices, fixed for the session.
/// `position` indexes `order` and is always valid unless the playlist is
/// empty.
#[derive(Debug, Clone)]
pub struct FeedState {
    playlist: Vec<MediaSource>,
    order: Vec<usize>,
    position: usize,
    videos_played: usize,
    y_offset: f32,
    show_comments: bool,
    paused: bool,
}

impl FeedState {
    /// Shuffle `playlist` once. A `seed` makes the order reproducible.
    pub fn new(playlist: Vec<MediaSource>, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut order: Vec<usize> = (0..playlist.len()).collect();
        order.shuffle(&mut rng);
        Self::with_order(playlist, order)
    }

    /// Use an explicit play order. Anything that is not a permutation of the
    /// playlist indices falls back to the playlist order.
    pub fn with_order(playlist: Vec<MediaSource>, order: Vec<usize>) -> Self {
        let mut sorted = order.clone();
        sorted.sort_unstable();
        let order = if sorted.iter().copied().eq(0..playlist.len()) {
            order
        } else {
            (0..playlist.len()).collect()
        };
        Self {
            playlist,
            order,
            position: 0,
            videos_played: 0,
            y_offset: 0.0,
            show_comments: false,
            paused: false,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn videos_played(&self) -> usize {
        self.videos_played
    }

    pub fn current(&self) -> Option<&MediaSource> {
        self.at(self.position)
    }

    fn at(&self, position: usize) -> Option<&MediaSource> {
        self.order
            .get(position)
            .and_then(|&index| self.playlist.get(index))
    }

    /// Clip the next navigation forward would show. Wraps to the first clip.
    pub fn next_neighbor(&self) -> Option<&MediaSource> {
        if self.is_empty() {
            return None;
        }
        self.at((self.position + 1) % self.len())
    }

    /// Clip before the current one; none at the first position.
    pub fn prev_neighbor(&self) -> Option<&MediaSource> {
        self.position.checked_sub(1).and_then(|p| self.at(p))
    }

    /// Step forward, wrapping to the start (and resetting the play counter)
    /// past the end.
    pub fn next(&mut self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.videos_played += 1;
        self.position += 1;
        if self.position >= self.len() {
            self.position = 0;
            self.videos_played = 0;
        }
        self.show_comments = false;
        self.paused = false;
        self.position
    }

    /// Step back; a no-op at the first position.
    pub fn prev(&mut self) -> usize {
        if self.position > 0 {
            self.position -= 1;
            self.videos_played = self.videos_played.saturating_sub(1);
            self.show_comments = false;
            self.paused = false;
        }
        self.position
    }

    pub fn y_offset(&self) -> f32 {
        self.y_offset
    }

    pub(crate) fn drag(&mut self, dy: f32) {
        self.y_offset += dy;
    }

    /// Take the accumulated drag and reset it to zero.
    pub(crate) fn take_offset(&mut self) -> f32 {
        core::mem::take(&mut self.y_offset)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn comments_open(&self) -> bool {
        self.show_comments
    }

    pub(crate) fn set_comments_open(&mut self, open: bool) {
        self.show_comments = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(n: usize) -> Vec<MediaSource> {
        (0..n)
            .map(|i| MediaSource::new(format!("clip{i}.webm")))
            .collect()
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let state = FeedState::new(playlist(10), Some(42));
        let mut sorted = state.order().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());

        let again = FeedState::new(playlist(10), Some(42));
        assert_eq!(state.order(), again.order());
    }

    #[test]
    fn test_next_wraps_and_resets_counter() {
        let mut state = FeedState::new(playlist(4), Some(1));
        let start = state.position();
        for _ in 0..3 {
            state.next();
        }
        assert_eq!(state.videos_played(), 3);
        state.next();
        assert_eq!(state.position(), start);
        assert_eq!(state.videos_played(), 0);
    }

    #[test]
    fn test_prev_floors_at_zero() {
        let mut state = FeedState::new(playlist(3), Some(1));
        state.set_paused(true);
        assert_eq!(state.prev(), 0);
        assert!(state.is_paused());

        state.next();
        state.set_comments_open(true);
        assert_eq!(state.prev(), 0);
        assert!(!state.comments_open());
        assert_eq!(state.videos_played(), 0);
    }

    #[test]
    fn test_neighbors_follow_order() {
        let state = FeedState::with_order(playlist(3), vec![2, 0, 1]);
        assert_eq!(state.current().unwrap().key(), "clip2.webm");
        assert_eq!(state.next_neighbor().unwrap().key(), "clip0.webm");
        assert!(state.prev_neighbor().is_none());

        let mut last = state.clone();
        last.next();
        last.next();
        assert_eq!(last.next_neighbor().unwrap().key(), "clip2.webm");
        assert_eq!(last.prev_neighbor().unwrap().key(), "clip0.webm");
    }

    #[test]
    fn test_invalid_order_falls_back() {
        let state = FeedState::with_order(playlist(3), vec![0, 0, 1]);
        assert_eq!(state.order(), [0, 1, 2]);
    }

    #[test]
    fn test_empty_playlist_navigation_is_noop() {
        let mut state = FeedState::new(Vec::new(), None);
        assert_eq!(state.next(), 0);
        assert_eq!(state.prev(), 0);
        assert!(state.current().is_none());
        assert!(state.next_neighbor().is_none());
    }

    #[test]
    fn test_take_offset_resets() {
        let mut state = FeedState::new(playlist(2), Some(3));
        state.drag(12.5);
        state.drag(-2.5);
        assert_eq!(state.take_offset(), 10.0);
        assert_eq!(state.y_offset(), 0.0);
    }
}
