//! Guess product details from a product URL.

use anyhow::{anyhow, Result};
use glow_commerce::admin::{ExtractError, ExtractedProduct, ExtractionTask, ProductExtractor};

use super::ExtractArgs;
use crate::context::Context;
use crate::output::stars;

/// Run the extract command.
pub async fn run(args: ExtractArgs, ctx: &Context) -> Result<()> {
    let product = extract(&args.url, ctx).await?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.success(&product.summary());
    ctx.output.kv("title", &product.title);
    ctx.output.kv("category", product.category.as_str());
    ctx.output.kv("price", &format!("${:.2}", product.price));
    ctx.output.kv(
        "rating",
        &format!("{} {:.1}", stars(product.rating), product.rating),
    );
    ctx.output.kv("reviews", &product.reviews.to_string());
    ctx.output.kv("review", &product.review_snippet);
    ctx.output.kv("link", &product.affiliate_link);
    ctx.output
        .info("Add images before saving: glow add --from-url <url> --image <image-url>");

    Ok(())
}

/// Extract `url` with a spinner; Ctrl-C cancels.
pub async fn extract(url: &str, ctx: &Context) -> Result<ExtractedProduct> {
    let extractor = ProductExtractor::new(ctx.config.catalog.extract_delay());
    let mut task = ExtractionTask::spawn(extractor, url);
    let spinner = ctx.output.spinner("Fetching product details...");

    let result = tokio::select! {
        result = &mut task => result,
        _ = tokio::signal::ctrl_c() => {
            task.cancel();
            task.await
        }
    };
    spinner.finish_and_clear();

    result.map_err(|e| match e {
        ExtractError::Cancelled => anyhow!("Extraction cancelled"),
        other => anyhow!(other),
    })
}
