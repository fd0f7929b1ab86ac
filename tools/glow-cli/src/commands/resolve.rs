//! Detect the category for a URL and title.

use anyhow::Result;
use glow_commerce::resolver;

use super::ResolveArgs;
use crate::context::Context;

/// Run the resolve command.
pub async fn run(args: ResolveArgs, ctx: &Context) -> Result<()> {
    let category = resolver::resolve(&args.url, &args.title);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "url": args.url,
            "title": args.title,
            "category": category,
        }));
    } else {
        println!("{}", category);
    }

    Ok(())
}
