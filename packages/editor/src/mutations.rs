//! # Block Mutations
//!
//! Editor actions on a [`BlockCollection`]. Every mutation targets the first
//! block of a type, builds an edited copy of it, and swaps it in with
//! [`BlockCollection::replace_by_type`].
//!
//! ### SetData
//! - Sets one key of the root or a sub-block's `data`
//! - Root data is re-validated against the block's typed shape
//!
//! ### SelectPreset
//! - Swaps the root and sub-block templates for a named preset
//! - Data, style and class names are kept

use crate::BlockCollection;
use potatopay_schema::{Block, BlockPart, BlockType, SchemaError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BlockMutation {
    SetData {
        block_type: BlockType,
        part: BlockPart,
        key: String,
        value: Value,
    },

    SetStyle {
        block_type: BlockType,
        part: BlockPart,
        property: String,
        value: String,
    },

    RemoveStyle {
        block_type: BlockType,
        part: BlockPart,
        property: String,
    },

    SetClassName {
        block_type: BlockType,
        part: BlockPart,
        class_name: Option<String>,
    },

    SetTemplate {
        block_type: BlockType,
        part: BlockPart,
        template: String,
    },

    SelectPreset {
        block_type: BlockType,
        name: String,
    },

    /// Swap in a whole block (first block of the same type)
    ReplaceBlock {
        block: Block,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("No {0} block in collection")]
    BlockNotFound(BlockType),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl BlockMutation {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockMutation::SetData { block_type, .. }
            | BlockMutation::SetStyle { block_type, .. }
            | BlockMutation::RemoveStyle { block_type, .. }
            | BlockMutation::SetClassName { block_type, .. }
            | BlockMutation::SetTemplate { block_type, .. }
            | BlockMutation::SelectPreset { block_type, .. } => *block_type,
            BlockMutation::ReplaceBlock { block } => block.block_type(),
        }
    }

    /// Apply to `collection`, returning the edited copy
    pub fn apply(&self, collection: &BlockCollection) -> Result<BlockCollection, MutationError> {
        let block_type = self.block_type();
        let current = collection
            .find(block_type)
            .ok_or(MutationError::BlockNotFound(block_type))?;

        let edited = match self {
            BlockMutation::SetData { part, key, value, .. } => current.with_data_field(*part, key, value.clone())?,
            BlockMutation::SetStyle { part, property, value, .. } => current.with_style(*part, property, value)?,
            BlockMutation::RemoveStyle { part, property, .. } => current.without_style(*part, property)?,
            BlockMutation::SetClassName { part, class_name, .. } => {
                current.with_class_name(*part, class_name.clone())?
            }
            BlockMutation::SetTemplate { part, template, .. } => current.with_template(*part, template)?,
            BlockMutation::SelectPreset { name, .. } => current.with_preset(name)?,
            BlockMutation::ReplaceBlock { block } => block.clone(),
        };

        Ok(collection.replace_by_type(block_type, edited))
    }
}
