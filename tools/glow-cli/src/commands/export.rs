//! Export stored products as JSON.

use std::fs;

use anyhow::{Context as _, Result};
use glow_commerce::catalog::{export_file_name, Category, ALL_EXPORT_FILE_NAME};

use super::ExportArgs;
use crate::context::Context;

/// Run the export command.
pub async fn run(args: ExportArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    ctx.require_admin(&store)?;
    let catalog = ctx.catalog(&store);

    let (bytes, file_name) = match &args.category {
        Some(name) => {
            let category: Category = name.parse()?;
            (catalog.export_category(category)?, export_file_name(category))
        }
        None => (catalog.export_all()?, ALL_EXPORT_FILE_NAME.to_string()),
    };

    if args.stdout {
        println!("{}", String::from_utf8_lossy(&bytes));
        return Ok(());
    }

    let dir = ctx.resolve_path(&args.output);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    let path = dir.join(&file_name);
    fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write export: {}", path.display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "path": path,
            "bytes": bytes.len(),
        }));
    } else {
        ctx.output
            .success(&format!("Exported products to {}", path.display()));
    }

    Ok(())
}
