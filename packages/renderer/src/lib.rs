//! # PotatoPay Renderer
//!
//! Binds a render context (visitor, transaction, creator profile, block
//! data) into a block's Liquid template and wraps the result in a styled
//! container.
//!
//! ```text
//! Block + RenderContext
//!         ↓
//! context: per-type context object
//!         ↓
//! engine: Liquid template → inner HTML
//!         ↓
//! renderer: container with className + inline style
//!         ↓
//! overlay: full transparent HTML document (overlay surface only)
//! ```
//!
//! Rendered HTML is not sanitized. Templates are authored by the creator who
//! owns the page, so the output is trusted the same way their own page is.

pub mod context;
pub mod engine;
mod html;
pub mod overlay;
pub mod renderer;


pub use context::{RankTier, Ranker, RenderContext, Transaction, Visitor};
pub use engine::{TemplateEngine, TemplateError};
pub use overlay::{render_overlay, render_page, OverlayOptions};
pub use renderer::{error_fragment, BlockRenderer, HtmlFragment, RenderError};
