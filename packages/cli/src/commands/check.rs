use super::read_blocks;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use potatopay_renderer::BlockRenderer;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Block collection JSON file
    pub file: PathBuf,
}

/// Parse every template of every block; fails if any does not parse
pub fn check(args: CheckArgs) -> Result<()> {
    let blocks = read_blocks(&args.file)?;
    let renderer = BlockRenderer::new()?;

    println!("{}", "🔎 Checking block templates...".bright_blue().bold());

    for duplicate in blocks.duplicate_types() {
        println!(
            "  {} more than one {} block; only the first is editable",
            "⚠️".yellow(),
            duplicate
        );
    }

    let mut error_count = 0;
    for (index, block) in blocks.iter().enumerate() {
        let label = format!("#{} {} ({})", index, block.block_type(), block.name());
        match renderer.check_block(block) {
            Ok(()) => println!("  {} {}", "✓".green(), label),
            Err(e) => {
                error_count += 1;
                eprintln!("  {} {} - {}", "✗".red(), label, e.to_string().red());
            }
        }
    }

    println!();
    if error_count == 0 {
        println!("{} {} blocks OK", "✅".green(), blocks.len());
        Ok(())
    } else {
        Err(anyhow!("{} of {} blocks failed to parse", error_count, blocks.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use potatopay_schema::{Block, BlockPart, BlockType};
    use std::fs;

    #[test]
    fn test_check_passes_defaults_and_fails_broken_part() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("good.json");
        let blocks: Vec<Block> = BlockType::ALL.into_iter().map(Block::new_default).collect();
        fs::write(&good, serde_json::to_string(&blocks).unwrap()).unwrap();
        assert!(check(CheckArgs { file: good }).is_ok());

        let bad = dir.path().join("bad.json");
        let broken = Block::new_default(BlockType::Tips)
            .with_template(BlockPart::TipCard, "{% if %}")
            .unwrap();
        fs::write(&bad, serde_json::to_string(&vec![broken]).unwrap()).unwrap();
        assert!(check(CheckArgs { file: bad }).is_err());
    }
}
