//! # Block Renderer
//!
//! Per-type rendering strategy:
//!
//! 1. Dispatch on the block type
//! 2. `leaderboard` gets the leaderboard context (rankers, data, username);
//!    everything else gets the general context with the block data under `data`
//! 3. Compound blocks render their sub-blocks first and hand the resulting
//!    HTML to the root template under the sub-block key (`button`, `tip_btn`,
//!    `tip_card`); an empty root template just concatenates them
//! 4. The template output is wrapped in a container carrying the block's
//!    `className` and flattened inline `style`

use crate::context::RenderContext;
use crate::engine::{TemplateEngine, TemplateError};
use crate::html::{container, escape_html};
use potatopay_schema::presets::part_data_defaults;
use potatopay_schema::{Block, BlockPart, BlockType, DataMap, SubBlock};
use serde_json::{json, Value};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("{part}: {source}")]
    Part { part: BlockPart, source: TemplateError },
}

/// Rendered HTML.
///
/// Holds creator-authored markup verbatim; only container attributes are
/// escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlFragment(String);

impl HtmlFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HtmlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<HtmlFragment> for String {
    fn from(fragment: HtmlFragment) -> Self {
        fragment.0
    }
}

/// Red, visible replacement for a block whose template failed
pub fn error_fragment(message: &str) -> HtmlFragment {
    HtmlFragment(format!(
        "<div class=\"block-error\" style=\"color: red;\">Error rendering block: {}</div>",
        escape_html(message)
    ))
}

pub struct BlockRenderer {
    engine: TemplateEngine,
}

impl BlockRenderer {
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self::with_engine(TemplateEngine::new()?))
    }

    pub fn with_engine(engine: TemplateEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    /// Render a block, degrading to an empty container if its template fails
    pub fn render_block(&self, block: &Block, context: &RenderContext) -> HtmlFragment {
        let inner = match self.render_inner(block, context) {
            Ok(inner) => inner,
            Err(e) => {
                tracing::warn!(block_type = %block.block_type(), name = block.name(), "Block render failed: {}", e);
                String::new()
            }
        };
        HtmlFragment(container(block.class_name(), block.style(), &inner))
    }

    /// Render a block, surfacing template failures
    pub fn try_render_block(&self, block: &Block, context: &RenderContext) -> Result<HtmlFragment, RenderError> {
        let inner = self.render_inner(block, context)?;
        Ok(HtmlFragment(container(block.class_name(), block.style(), &inner)))
    }

    /// Parse every template of a block (root and sub-blocks)
    pub fn check_block(&self, block: &Block) -> Result<(), RenderError> {
        self.engine.check(block.template())?;
        for part in &block.block_type().parts()[1..] {
            if let Some(sub) = block.part(*part) {
                self.engine
                    .check(&sub.template)
                    .map_err(|source| RenderError::Part { part: *part, source })?;
            }
        }
        Ok(())
    }

    fn render_inner(&self, block: &Block, context: &RenderContext) -> Result<String, RenderError> {
        tracing::debug!(block_type = %block.block_type(), name = block.name(), "Rendering block");

        match block {
            Block::Leaderboard(leaderboard) => {
                let values = context.leaderboard_value(&leaderboard.data);
                Ok(self.engine.render(&leaderboard.template, &Value::Object(values))?)
            }

            Block::Razorpay(razorpay) => {
                let button = self.render_part(&razorpay.button, BlockPart::Button, context)?;
                self.render_compound(block, context, vec![(BlockPart::Button, button)])
            }

            Block::Tips(tips) => {
                let card = self.render_part(&tips.tip_card, BlockPart::TipCard, context)?;
                let button = self.render_part(&tips.tip_btn, BlockPart::TipButton, context)?;
                self.render_compound(
                    block,
                    context,
                    vec![(BlockPart::TipCard, card), (BlockPart::TipButton, button)],
                )
            }

            Block::UserForm(form) => {
                let mut values = context.to_value(block.data_value());
                values.insert("fields".to_string(), json!(BlockType::user_form_fields()));
                values.insert(
                    "input".to_string(),
                    json!({
                        "class_name": form.input.class_name.clone().unwrap_or_default(),
                        "style": form.input.style.to_inline(),
                    }),
                );
                Ok(self.engine.render(&form.root.template, &Value::Object(values))?)
            }

            Block::Tip(_) | Block::QrCode(_) | Block::Socials(_) | Block::Generic(_) => {
                let values = context.to_value(block.data_value());
                Ok(self.engine.render(block.template(), &Value::Object(values))?)
            }
        }
    }

    /// Root template of a compound block with rendered parts in scope
    fn render_compound(
        &self,
        block: &Block,
        context: &RenderContext,
        parts: Vec<(BlockPart, String)>,
    ) -> Result<String, RenderError> {
        if block.template().trim().is_empty() {
            return Ok(parts.into_iter().map(|(_, html)| html).collect());
        }

        let mut values = context.to_value(block.data_value());
        for (part, html) in parts {
            values.insert(part.key().to_string(), Value::String(html));
        }
        Ok(self.engine.render(block.template(), &Value::Object(values))?)
    }

    fn render_part(&self, sub: &SubBlock, part: BlockPart, context: &RenderContext) -> Result<String, RenderError> {
        if sub.template.trim().is_empty() {
            return Ok(String::new());
        }

        let mut data: DataMap = part_data_defaults(part);
        data.extend(sub.data.clone());

        let values = context.to_value(Value::Object(data));
        let inner = self
            .engine
            .render(&sub.template, &Value::Object(values))
            .map_err(|source| RenderError::Part { part, source })?;

        Ok(container(sub.class_name.as_deref(), &sub.style, &inner))
    }
}
