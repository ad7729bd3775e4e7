use super::{read_blocks, write_output};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use potatopay_client::{AuthSession, HttpDocumentApi};
use potatopay_editor::{AutosaveConfig, AutosaveController, BlockCollectionStore, DocumentApi, Notice};
use potatopay_schema::Surface;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PullArgs {
    /// Surface to download (overlay, tip-page, link-tree)
    pub surface: Surface,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PushArgs {
    /// Surface to upload (overlay, tip-page, link-tree)
    pub surface: Surface,

    /// Block collection JSON file
    pub file: PathBuf,
}

fn connect(config: &Config) -> Result<HttpDocumentApi> {
    let session = AuthSession::from_env(&config.token_env)
        .ok_or_else(|| anyhow!("No API token; set the {} environment variable", config.token_env))?;
    Ok(HttpDocumentApi::new(config.api_base_url.clone(), session)?)
}

pub async fn pull(args: PullArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let api = connect(&config)?;

    let blocks = api.fetch(args.surface).await.map_err(|e| anyhow!(e.user_message()))?;
    let json = serde_json::to_string_pretty(&blocks)?;
    write_output(args.out.as_deref(), &json)?;

    if let Some(out) = &args.out {
        eprintln!(
            "  {} {} ({} blocks) → {}",
            "✓".green(),
            args.surface,
            blocks.len(),
            out.display()
        );
    }
    Ok(())
}

pub async fn push(args: PushArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let blocks = read_blocks(&args.file)?;
    let api = connect(&config)?;

    let autosave = AutosaveConfig {
        enabled: false,
        ..config.autosave_config()
    };

    // Diff against the remote copy when it loads; otherwise upload blindly
    let controller = match AutosaveController::load(api.clone(), args.surface, autosave).await {
        Some(controller) => controller,
        None => {
            eprintln!("  {} could not fetch remote {}, uploading anyway", "⚠️".yellow(), args.surface);
            BlockCollectionStore::new(api)
                .save(args.surface, &blocks)
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            println!("{} Pushed {} blocks to {}", "✅".green(), blocks.len(), args.surface);
            return Ok(());
        }
    };

    controller.replace(blocks);
    if !controller.is_dirty() {
        println!("{} {} is already up to date", "✓".green(), args.surface);
        return Ok(());
    }

    let mut notices = controller.subscribe_notices();
    let result = controller.save_now().await;

    while let Ok(notice) = notices.try_recv() {
        match notice {
            Notice::ManualSaveStarted => eprintln!("  {}", format!("Saving {}...", args.surface).dimmed()),
            Notice::ManualSaveSucceeded => {
                println!("{} Pushed {} blocks to {}", "✅".green(), controller.collection().len(), args.surface)
            }
            Notice::ManualSaveFailed { message } => eprintln!("  {} {}", "✗".red(), message.red()),
        }
    }

    result.map_err(|e| anyhow!(e.user_message()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_requires_token() {
        let config = Config {
            token_env: "POTATOPAY_TOKEN_FOR_A_TEST_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        let error = connect(&config).unwrap_err();
        assert!(error.to_string().contains("POTATOPAY_TOKEN_FOR_A_TEST_THAT_IS_NEVER_SET"));
    }
}
