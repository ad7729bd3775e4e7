//! # Block Collections
//!
//! The ordered list of blocks making up one surface. Collections are values:
//! every edit produces a new collection and leaves the input untouched, which
//! is what lets the autosave controller diff against a saved snapshot.

use crate::EditorError;
use potatopay_schema::{Block, BlockType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockCollection(Vec<Block>);

impl BlockCollection {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// First block of `block_type`
    pub fn find(&self, block_type: BlockType) -> Option<&Block> {
        self.0.iter().find(|b| b.block_type() == block_type)
    }

    /// New collection with the first block of `block_type` swapped for `block`.
    ///
    /// Returns an unchanged copy when no block of that type exists.
    pub fn replace_by_type(&self, block_type: BlockType, block: Block) -> BlockCollection {
        let mut blocks = self.0.clone();
        match blocks.iter().position(|b| b.block_type() == block_type) {
            Some(index) => blocks[index] = block,
            None => tracing::debug!(%block_type, "No block to replace"),
        }
        BlockCollection(blocks)
    }

    /// Canonical JSON used for dirty tracking
    pub fn serialize(&self) -> String {
        match serde_json::to_string(&self.0) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize block collection: {}", e);
                String::new()
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.0
    }

    /// Block types in collection order
    pub fn types(&self) -> Vec<BlockType> {
        self.0.iter().map(Block::block_type).collect()
    }

    /// Types that occur more than once; only the first of each is editable
    pub fn duplicate_types(&self) -> Vec<BlockType> {
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for block_type in self.types() {
            if !seen.insert(block_type) {
                duplicates.insert(block_type);
            }
        }
        duplicates.into_iter().collect()
    }
}

impl From<Vec<Block>> for BlockCollection {
    fn from(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }
}

impl<'a> IntoIterator for &'a BlockCollection {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// `{ "blocks": [...] }`, the body of surface GET data and PUT requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfacePayload {
    pub blocks: BlockCollection,
}
