//! Likes and comments attached to feed clips.
//!
//! Interactions are keyed by the clip's file name rather than its full path,
//! so moving the asset directory keeps them.

use std::collections::BTreeMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{StorageBackend, StorageError, decode, encode};

/// Author recorded for comments typed on the phone.
pub const LOCAL_AUTHOR: &str = "Player";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub text: String,
}

fn default_author() -> String {
    LOCAL_AUTHOR.to_string()
}

impl Comment {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct VideoInteraction {
    pub likes: i64,
    pub is_liked: bool,
    /// Newest first
    pub comments: Vec<Comment>,
}

pub type Interactions = BTreeMap<String, VideoInteraction>;

/// Serialize `interactions` into the framed on-disk form.
pub fn encode_interactions(interactions: &Interactions) -> Result<String, StorageError> {
    let json = serde_json::to_string(interactions)?;
    Ok(encode(&json))
}

/// Parse the framed on-disk form.
pub fn decode_interactions(blob: &str) -> Result<Interactions, StorageError> {
    let json = decode(blob)?;
    Ok(serde_json::from_str(&json)?)
}

/// In-memory interaction map backed by a [`StorageBackend`].
///
/// Every mutation writes the whole map back. Load and save failures are
/// logged and otherwise ignored: a broken store behaves as an empty one and
/// playback carries on.
pub struct InteractionStore<S> {
    storage: S,
    interactions: Interactions,
}

impl<S: StorageBackend> InteractionStore<S> {
    pub fn load(storage: S) -> Self {
        let interactions = match Self::read(&storage) {
            Ok(interactions) => {
                info!("Loaded interactions for {} clips", interactions.len());
                interactions
            }
            Err(e) => {
                warn!("Ignoring unreadable interaction store: {}", e);
                Interactions::new()
            }
        };
        Self {
            storage,
            interactions,
        }
    }

    fn read(storage: &S) -> Result<Interactions, StorageError> {
        match storage.read()? {
            Some(blob) => decode_interactions(&blob),
            None => Ok(Interactions::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&VideoInteraction> {
        self.interactions.get(key)
    }

    pub fn likes(&self, key: &str) -> i64 {
        self.get(key).map_or(0, |i| i.likes)
    }

    pub fn is_liked(&self, key: &str) -> bool {
        self.get(key).is_some_and(|i| i.is_liked)
    }

    pub fn comments(&self, key: &str) -> &[Comment] {
        self.get(key)
            .map(|i| i.comments.as_slice())
            .unwrap_or_default()
    }

    pub fn all(&self) -> &Interactions {
        &self.interactions
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Flip the like flag for `key`, adjust the count to match and persist.
    /// Returns the new flag.
    pub fn toggle_like(&mut self, key: &str) -> bool {
        let entry = self.interactions.entry(key.to_string()).or_default();
        entry.is_liked = !entry.is_liked;
        entry.likes = if entry.is_liked {
            entry.likes.saturating_add(1)
        } else {
            entry.likes.saturating_sub(1)
        };
        let liked = entry.is_liked;
        self.persist();
        liked
    }

    /// Insert `comment` as the newest comment on `key` and persist.
    pub fn add_comment(&mut self, key: &str, comment: Comment) {
        self.interactions
            .entry(key.to_string())
            .or_default()
            .comments
            .insert(0, comment);
        self.persist();
    }

    pub fn save(&mut self) -> Result<(), StorageError> {
        let blob = encode_interactions(&self.interactions)?;
        self.storage.write(&blob)
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!("Failed to save interactions: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::io;

    struct BrokenStorage;

    impl StorageBackend for BrokenStorage {
        fn read(&self) -> Result<Option<String>, StorageError> {
            Err(io::Error::other("unplugged").into())
        }

        fn write(&mut self, _contents: &str) -> Result<(), StorageError> {
            Err(io::Error::other("read-only").into())
        }
    }

    #[test]
    fn test_round_trip_preserves_order_and_flags() {
        let mut store = InteractionStore::load(MemoryStorage::new());
        store.toggle_like("a.webm");
        store.add_comment("a.webm", Comment::new("Player", "first"));
        store.add_comment("a.webm", Comment::new("Player", "second"));
        store.add_comment("b.mp4", Comment::new("Ann", "hi"));

        let saved = store.storage().contents().unwrap().to_string();
        let reloaded = InteractionStore::load(MemoryStorage::with_contents(saved));

        assert_eq!(reloaded.all(), store.all());
        let texts: Vec<_> = reloaded
            .comments("a.webm")
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(texts, ["second", "first"]);
        assert!(reloaded.is_liked("a.webm"));
        assert_eq!(reloaded.likes("a.webm"), 1);
    }

    #[test]
    fn test_toggle_like_twice_restores_state() {
        let blob = encode(r#"{"a.webm":{"likes":41,"is_liked":false,"comments":[]}}"#);
        let mut store = InteractionStore::load(MemoryStorage::with_contents(blob));

        assert!(store.toggle_like("a.webm"));
        assert_eq!(store.likes("a.webm"), 42);
        assert!(!store.toggle_like("a.webm"));
        assert_eq!(store.likes("a.webm"), 41);
        assert!(!store.is_liked("a.webm"));
    }

    #[test]
    fn test_like_count_saturates_at_extremes() {
        let blob = encode(&format!(
            r#"{{"max.webm":{{"likes":{},"is_liked":false}},"min.webm":{{"likes":{},"is_liked":true}}}}"#,
            i64::MAX,
            i64::MIN
        ));
        let mut store = InteractionStore::load(MemoryStorage::with_contents(blob));
        assert!(store.toggle_like("max.webm"));
        assert_eq!(store.likes("max.webm"), i64::MAX);
        assert!(!store.toggle_like("min.webm"));
        assert_eq!(store.likes("min.webm"), i64::MIN);
    }

    #[test]
    fn test_corrupt_blob_loads_empty() {
        let store = InteractionStore::load(MemoryStorage::with_contents("%%%"));
        assert!(store.all().is_empty());

        let store = InteractionStore::load(MemoryStorage::with_contents(encode("[1, 2")));
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let blob = encode(r#"{"a.webm":{"comments":[{"text":"yo"}]}}"#);
        let store = InteractionStore::load(MemoryStorage::with_contents(blob));
        assert_eq!(store.likes("a.webm"), 0);
        assert_eq!(store.comments("a.webm")[0].author, LOCAL_AUTHOR);
    }

    #[test]
    fn test_broken_storage_is_not_fatal() {
        let mut store = InteractionStore::load(BrokenStorage);
        assert!(store.all().is_empty());
        assert!(store.toggle_like("a.webm"));
        store.add_comment("a.webm", Comment::new("Player", "still works"));
        assert_eq!(store.comments("a.webm").len(), 1);
        assert!(store.save().is_err());
    }
}
