//! # Surface Session
//!
//! One surface's editing state: the working collection plus the
//! serialization that was last persisted. Dirty means the two differ.

use crate::{BlockCollection, BlockMutation, MutationError};
use potatopay_schema::Surface;

#[derive(Debug, Clone)]
pub struct SurfaceSession {
    surface: Surface,
    collection: BlockCollection,

    /// Serialization of the last loaded or saved collection
    saved: String,

    /// Bumped on every change to the working collection
    version: u64,
}

impl SurfaceSession {
    /// Start from a freshly loaded collection (clean)
    pub fn new(surface: Surface, collection: BlockCollection) -> Self {
        let saved = collection.serialize();
        Self {
            surface,
            collection,
            saved,
            version: 0,
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn collection(&self) -> &BlockCollection {
        &self.collection
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.collection.serialize() != self.saved
    }

    pub fn apply(&mut self, mutation: &BlockMutation) -> Result<(), MutationError> {
        let next = mutation.apply(&self.collection)?;
        self.replace(next);
        Ok(())
    }

    pub fn replace(&mut self, collection: BlockCollection) {
        self.collection = collection;
        self.version += 1;
    }

    /// Working collection and its serialization, as a save would send them
    pub fn snapshot(&self) -> (BlockCollection, String) {
        (self.collection.clone(), self.collection.serialize())
    }

    /// Record `serialized` as persisted
    pub fn mark_saved(&mut self, serialized: String) {
        self.saved = serialized;
    }
}
