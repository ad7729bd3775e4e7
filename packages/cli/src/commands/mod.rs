pub mod check;
pub mod defaults;
pub mod remote;
pub mod render;

pub use check::{check, CheckArgs};
pub use defaults::{defaults, DefaultsArgs};
pub use remote::{pull, push, PullArgs, PushArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use potatopay_editor::{BlockCollection, SurfacePayload};
use std::fs;
use std::path::Path;

/// Read a block file: either a bare array or a `{ "blocks": [...] }` payload
pub fn read_blocks(path: &Path) -> Result<BlockCollection> {
    let source = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;

    let value: serde_json::Value =
        serde_json::from_str(&source).with_context(|| format!("{} is not valid JSON", path.display()))?;

    let collection = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        serde_json::from_value::<SurfacePayload>(value)?.blocks
    };
    Ok(collection)
}

/// Write `contents` to `out`, or stdout when absent
pub fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, contents).with_context(|| format!("Cannot write {}", path.display()))?;
        }
        None => println!("{}", contents),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use potatopay_schema::{Block, BlockType};

    #[test]
    fn test_read_blocks_accepts_both_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let blocks = BlockCollection::new(vec![Block::new_default(BlockType::Tip)]);

        let bare = dir.path().join("bare.json");
        fs::write(&bare, serde_json::to_string(&blocks).unwrap()).unwrap();

        let wrapped = dir.path().join("wrapped.json");
        let payload = SurfacePayload { blocks: blocks.clone() };
        fs::write(&wrapped, serde_json::to_string(&payload).unwrap()).unwrap();

        assert_eq!(read_blocks(&bare).unwrap(), blocks);
        assert_eq!(read_blocks(&wrapped).unwrap(), blocks);
    }

    #[test]
    fn test_read_blocks_reports_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        fs::write(&file, r#"[{ "type": "banner", "template": "" }]"#).unwrap();

        assert!(read_blocks(&file).is_err());
    }

    #[test]
    fn test_write_output_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out.html");

        write_output(Some(&out), "<p></p>").unwrap();

        assert_eq!(fs::read_to_string(out).unwrap(), "<p></p>");
    }
}
