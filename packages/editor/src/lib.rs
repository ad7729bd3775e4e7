//! # PotatoPay Editor
//!
//! Editing engine for a surface's block collection.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ DocumentApi: fetch / store collections      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: BlockCollection + mutations         │
//! │  - Replace-by-type edits (new values)       │
//! │  - Dirty tracking against saved snapshot    │
//! │  - Debounced autosave + manual save         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: blocks → HTML preview             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use potatopay_editor::{AutosaveConfig, AutosaveController, BlockMutation, InMemoryApi};
//!
//! let controller = AutosaveController::load(api, Surface::Overlay, AutosaveConfig::default())
//!     .await
//!     .expect("surface failed to load");
//!
//! controller.apply(&BlockMutation::SetData {
//!     block_type: BlockType::Tip,
//!     part: BlockPart::Root,
//!     key: "primary_color".to_string(),
//!     value: "#FF0000".into(),
//! })?;
//!
//! // Saved ~2s later unless more edits arrive; or right away:
//! controller.save_now().await?;
//! ```

mod autosave;
mod collection;
mod errors;
mod mutations;
mod session;
mod store;

pub use autosave::{AutosaveConfig, AutosaveController, Notice, SaveStatus, DEFAULT_DEBOUNCE};
pub use collection::{BlockCollection, SurfacePayload};
pub use errors::EditorError;
pub use mutations::{BlockMutation, MutationError};
pub use session::SurfaceSession;
pub use store::{ApiError, BlockCollectionStore, DocumentApi, InMemoryApi};
