//! # PotatoPay Block Schema
//!
//! Typed data model for the customizable HTML snippets creators place on
//! their overlays, tip pages and link trees.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: JSON block documents ↔ typed Block  │
//! │  - one struct per block type                │
//! │  - canonical defaults + template presets    │
//! │  - immutable field edits                    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: Block + context → HTML fragment   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use potatopay_schema::{Block, BlockPart, BlockType};
//!
//! let tip = Block::new_default(BlockType::Tip);
//! let red = tip
//!     .with_data_field(BlockPart::Root, "primary_color", "#FF0000".into())
//!     .unwrap();
//!
//! assert_eq!(red.data_value()["primary_color"], "#FF0000");
//! ```

mod block;
mod data;
mod error;
pub mod presets;
mod profile;
mod style;
mod surface;

pub use block::{
    Block, BlockPart, BlockType, RazorpayBlock, SubBlock, TemplateBlock, TipsBlock, UserFormBlock,
    UserFormField,
};
pub use data::{BlockData, DataMap, LeaderboardData, QrCodeData, SocialsData, TipData};
pub use error::SchemaError;
pub use presets::Preset;
pub use profile::{CreatorProfile, SocialLink};
pub use style::StyleMap;
pub use surface::Surface;
