use super::{read_blocks, write_output};
use crate::config::Config;
use crate::watcher::FileWatcher;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use potatopay_renderer::{render_overlay, render_page, BlockRenderer, RenderContext};
use potatopay_schema::Surface;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Block collection JSON file
    pub file: PathBuf,

    /// Surface to render (overlay, tip-page, link-tree)
    #[arg(short, long, default_value = "overlay")]
    pub surface: Surface,

    /// Render context JSON (visitor, transaction, creator, rankers)
    #[arg(short, long)]
    pub context: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Re-render whenever the block file changes
    #[arg(short, long)]
    pub watch: bool,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let renderer = BlockRenderer::new()?;
    let context = load_context(args.context.as_deref())?;

    render_once(&args, &config, &renderer, &context)?;

    if !args.watch {
        return Ok(());
    }

    let watcher = FileWatcher::new(&args.file)?;
    eprintln!("{}", "👀 Watching for changes...".bright_blue());

    while watcher.next_change().is_some() {
        if let Err(e) = render_once(&args, &config, &renderer, &context) {
            eprintln!("  {} {}", "✗".red(), e.to_string().red());
        }
    }

    Ok(())
}

fn render_once(args: &RenderArgs, config: &Config, renderer: &BlockRenderer, context: &RenderContext) -> Result<()> {
    let blocks = read_blocks(&args.file)?;
    let html = render_surface(args.surface, blocks.blocks(), config, renderer, context);

    write_output(args.out.as_deref(), &html)?;

    if let Some(out) = &args.out {
        eprintln!(
            "  {} {} → {}",
            "✓".green(),
            args.file.display(),
            out.display()
        );
    }
    Ok(())
}

/// Overlays become standalone documents; other surfaces are fragments
fn render_surface(
    surface: Surface,
    blocks: &[potatopay_schema::Block],
    config: &Config,
    renderer: &BlockRenderer,
    context: &RenderContext,
) -> String {
    match surface {
        Surface::Overlay => render_overlay(renderer, blocks, context, &config.overlay_options()),
        Surface::TipPage | Surface::LinkTree => render_page(renderer, blocks, context),
    }
}

fn load_context(path: Option<&Path>) -> Result<RenderContext> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
            serde_json::from_str(&source).with_context(|| format!("Invalid render context in {}", path.display()))
        }
        None => Ok(RenderContext::preview(Default::default())),
    }
}
