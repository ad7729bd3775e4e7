use anyhow::{anyhow, Result};
use clap::Args;
use potatopay_schema::{presets, Block, BlockType};

#[derive(Debug, Args)]
pub struct DefaultsArgs {
    /// Block type (tip, qr_code, leaderboard, socials, razorpay, user_form, tips, generic)
    pub block_type: BlockType,

    /// Preset name (defaults to the first preset of the type)
    #[arg(short, long)]
    pub preset: Option<String>,
}

pub fn defaults(args: DefaultsArgs) -> Result<()> {
    println!("{}", default_block_json(args.block_type, args.preset.as_deref())?);
    Ok(())
}

fn default_block_json(block_type: BlockType, preset: Option<&str>) -> Result<String> {
    let block = match preset {
        Some(name) => {
            let preset = presets::find(block_type, name).ok_or_else(|| {
                let available: Vec<&str> = presets::for_type(block_type).iter().map(|p| p.name).collect();
                anyhow!(
                    "Unknown preset '{}' for {}. Available: {}",
                    name,
                    block_type,
                    available.join(", ")
                )
            })?;
            Block::from_preset(block_type, preset)
        }
        None => Block::new_default(block_type),
    };

    Ok(serde_json::to_string_pretty(&block)?)
}
