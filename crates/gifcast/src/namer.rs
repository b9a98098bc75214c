//! Display-name collaborator.
//!
//! Name lookup is two-phase: an asynchronous [`PlayerNamer::preload`] for
//! the game's user ids must complete before the synchronous
//! [`PlayerNamer::display`] calls are made while shaping the payload. The
//! two phases are deliberately separate calls; the client awaits the first
//! before invoking the second.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::GifError;
use crate::types::{Player, UserId};

/// Source of player display strings.
#[async_trait]
pub trait PlayerNamer: Send + Sync {
    /// Load display data for the given user ids. Must be awaited before
    /// calling [`display`](Self::display) for players carrying those ids.
    async fn preload(&self, ids: &[UserId]) -> Result<(), GifError>;

    /// Format a player for display. Synchronous; only names preloaded in
    /// this request's preload phase are guaranteed to resolve.
    fn display(&self, player: &Player) -> String;
}

/// In-memory [`PlayerNamer`] over a fixed id-to-name table.
///
/// `display` only resolves names whose ids went through `preload`,
/// mirroring the preload-then-format contract of a remote name source; an
/// id that was never preloaded falls back to the raw id.
#[derive(Debug, Default)]
pub struct MemoryNamer {
    known: HashMap<UserId, String>,
    loaded: RwLock<HashSet<UserId>>,
}

impl MemoryNamer {
    pub fn new(names: impl IntoIterator<Item = (UserId, String)>) -> Self {
        Self {
            known: names.into_iter().collect(),
            loaded: RwLock::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl PlayerNamer for MemoryNamer {
    async fn preload(&self, ids: &[UserId]) -> Result<(), GifError> {
        self.loaded.write().extend(ids.iter().cloned());
        Ok(())
    }

    fn display(&self, player: &Player) -> String {
        let base = match &player.user_id {
            Some(id) => {
                if self.loaded.read().contains(id) {
                    self.known.get(id).cloned().unwrap_or_else(|| id.to_string())
                } else {
                    id.to_string()
                }
            }
            None => return player.name.clone().unwrap_or_else(|| "Anonymous".to_string()),
        };
        match player.rating {
            Some(rating) => format!("{base} ({rating})"),
            None => base,
        }
    }
}
