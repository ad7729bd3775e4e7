//! # Overlay documents
//!
//! Standalone HTML for the overlay surface. Streaming software loads it as a
//! browser source, so the page background is transparent and every block
//! wrapper carries `data-key="{type}"` for DOM targeting.

use crate::context::RenderContext;
use crate::html::container_with;
use crate::renderer::{error_fragment, BlockRenderer};
use potatopay_schema::{Block, StyleMap};

/// Options for overlay document assembly
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    pub title: String,
    /// Script URL of the CSS utility framework the block templates use
    pub framework_src: String,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            title: "PotatoPay Overlay".to_string(),
            framework_src: "https://cdn.tailwindcss.com".to_string(),
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context<'a> {
    options: &'a OverlayOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a OverlayOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Assemble the full overlay document.
///
/// A block whose template fails is replaced by a red error fragment; the
/// other blocks render unaffected.
pub fn render_overlay(
    renderer: &BlockRenderer,
    blocks: &[Block],
    context: &RenderContext,
    options: &OverlayOptions,
) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(&mut ctx);

    ctx.add_line("<body>");
    ctx.indent();

    if blocks.is_empty() {
        ctx.add_line("<p class=\"overlay-empty\">No blocks to display</p>");
    }

    for block in blocks {
        let fragment = match renderer.try_render_block(block, context) {
            Ok(fragment) => fragment,
            Err(e) => {
                tracing::warn!(block_type = %block.block_type(), "Overlay block failed: {}", e);
                error_fragment(&e.to_string())
            }
        };

        let wrapper = container_with(
            &[("data-key", block.block_type().as_str())],
            None,
            &StyleMap::new(),
            fragment.as_str(),
        );
        ctx.add_line(&wrapper);
    }

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn compile_head(ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = format!("<title>{}</title>", crate::html::escape_html(&ctx.options.title));
    ctx.add_line(&title);

    if !ctx.options.framework_src.is_empty() {
        let script = format!(
            "<script src=\"{}\"></script>",
            crate::html::escape_html(&ctx.options.framework_src)
        );
        ctx.add_line(&script);
    }

    ctx.add_line("<style>");
    ctx.indent();
    ctx.add_line("html, body { background: transparent; margin: 0; }");
    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

/// Concatenated fragments for the tip page and link tree surfaces.
///
/// Failing blocks render as empty containers.
pub fn render_page(renderer: &BlockRenderer, blocks: &[Block], context: &RenderContext) -> String {
    blocks
        .iter()
        .map(|block| renderer.render_block(block, context).into_string())
        .collect::<Vec<_>>()
        .join("\n")
}
