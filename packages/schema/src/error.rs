//! Error types for the block schema

use crate::{BlockPart, BlockType};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Unknown surface: {0}")]
    UnknownSurface(String),

    #[error("Block '{block_type}' has no {part} part")]
    UnknownPart { block_type: BlockType, part: BlockPart },

    #[error("Invalid value for data.{key}: {reason}")]
    InvalidData { key: String, reason: String },

    #[error("Unknown preset '{name}' for block type '{block_type}'")]
    UnknownPreset { block_type: BlockType, name: String },
}
