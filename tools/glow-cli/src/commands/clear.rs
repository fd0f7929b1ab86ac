//! Remove every stored product.

use anyhow::Result;
use dialoguer::Confirm;
use glow_commerce::catalog::Category;

use super::ClearArgs;
use crate::context::Context;

/// Run the clear command.
pub async fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    ctx.require_admin(&store)?;

    if !args.yes {
        ctx.output.warn("This will remove every stored product from:");
        for category in Category::STOREFRONT {
            ctx.output.list_item(category.as_str());
        }

        let confirmed = Confirm::new()
            .with_prompt("Clear all products?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    ctx.catalog(&store).clear_all()?;
    ctx.output.success("All products cleared");

    Ok(())
}
