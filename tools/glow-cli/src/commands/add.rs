//! Add a product to the catalog.

use anyhow::{Context as _, Result};
use glow_commerce::catalog::{Category, ProductDraft};
use glow_commerce::resolver;

use super::AddArgs;
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    ctx.require_admin(&store)?;

    let mut draft = match &args.from_url {
        Some(url) => {
            let extracted = super::extract::extract(url, ctx).await?;
            ctx.output.info(&extracted.summary());
            ProductDraft::from(extracted)
        }
        None => ProductDraft::default(),
    };
    let category = args.category.clone();
    let extracted = args.from_url.is_some();
    apply_flags(&mut draft, args);

    draft.category = match category {
        Some(name) => name
            .parse::<Category>()
            .with_context(|| format!("Invalid --category '{}'", name))?,
        None if extracted => draft.category,
        None => {
            let detected = resolver::resolve(&draft.affiliate_link, &draft.title);
            ctx.output
                .debug(&format!("Detected category {} from link and title", detected));
            detected
        }
    };

    let catalog = ctx.catalog(&store);
    let record = catalog.create(&draft)?;

    if ctx.output.is_json() {
        ctx.output.json(&record);
        return Ok(());
    }

    ctx.output
        .success("Product added successfully! It will appear on the website immediately.");
    ctx.output.kv("id", &record.id.to_string());
    ctx.output.kv("category", draft.category.as_str());
    ctx.output.kv("images", &record.images.len().to_string());

    Ok(())
}

/// Overlay command line flags onto `draft`.
fn apply_flags(draft: &mut ProductDraft, args: AddArgs) {
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(image) = args.image {
        draft.image = image;
    }
    if !args.extra_images.is_empty() {
        draft.additional_images = args.extra_images.join("\n");
    }
    if args.price.is_some() {
        draft.price = args.price;
    }
    if args.rating.is_some() {
        draft.rating = args.rating;
    }
    if args.reviews.is_some() {
        draft.reviews = args.reviews;
    }
    if let Some(snippet) = args.snippet {
        draft.review_snippet = snippet;
    }
    if let Some(link) = args.link {
        draft.affiliate_link = link;
    }
}
