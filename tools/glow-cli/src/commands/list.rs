//! List products in a category.

use anyhow::Result;
use glow_commerce::catalog::CategorySelector;
use glow_commerce::search::{FilterState, PriceFilter, SortOption};
use glow_commerce::storefront::StorefrontQuery;

use super::ListArgs;
use crate::context::Context;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let selector = match &args.query {
        Some(query) => StorefrontQuery::parse(query)?.category(),
        None => args.category.parse::<CategorySelector>()?,
    };

    let mut price: PriceFilter = args.price.parse()?;
    if let PriceFilter::Custom { .. } = price {
        price = PriceFilter::custom(args.min, args.max);
    }
    let sort: SortOption = args.sort.parse()?;

    let store = ctx.open_store()?;
    let catalog = ctx.catalog(&store);
    let listing = catalog.list_by_category(selector)?;
    let records = FilterState::new()
        .with_search(args.search.as_str())
        .with_price(price)
        .with_sort(sort)
        .apply(&listing);

    if ctx.output.is_json() {
        ctx.output.json(&records);
        return Ok(());
    }

    ctx.output.header(&selector.title());
    ctx.output.info(selector.description());
    ctx.output.kv("price", price.display_name());
    ctx.output.kv("sort", sort.display_name());

    if records.is_empty() {
        ctx.output.warn("No products found matching your criteria.");
        return Ok(());
    }

    println!();
    ctx.output.products(&records);
    println!();
    ctx.output.info(&format!(
        "Showing {} of {} products",
        records.len(),
        listing.len()
    ));

    Ok(())
}
