//! Follow a category listing as it changes.

use std::time::Duration;

use anyhow::Result;
use glow_commerce::catalog::CategorySelector;
use glow_commerce::notify::CatalogView;
use glow_commerce::search::{FilterState, SortOption};
use glow_commerce::storefront::StorefrontQuery;

use super::WatchArgs;
use crate::context::Context;

/// Run the watch command.
pub async fn run(args: WatchArgs, ctx: &Context) -> Result<()> {
    let query = args
        .query
        .as_deref()
        .map(StorefrontQuery::parse)
        .transpose()?;
    let selector = match &query {
        Some(query) => query.category(),
        None => args.category.parse::<CategorySelector>()?,
    };
    let sort: SortOption = args.sort.parse()?;
    let state = FilterState::new().with_search(args.search).with_sort(sort);
    let interval = args
        .interval
        .map(Duration::from_millis)
        .unwrap_or_else(|| ctx.config.catalog.poll_interval());

    let store = ctx.open_store()?;
    let catalog = ctx.catalog(&store);
    let mut view = CatalogView::spawn(catalog, selector, interval)?;

    ctx.output.header(&format!("Watching {}", selector.title()));
    if let Some(query) = query.filter(StorefrontQuery::refresh_requested) {
        view.refresh();
        ctx.output.kv("query", &query.without_refresh().to_query_string());
    }
    ctx.output.info("Press Ctrl-C to stop");
    print_listing(&view, &state, ctx);

    loop {
        tokio::select! {
            changed = view.changed() => {
                if !changed {
                    break;
                }
                print_listing(&view, &state, ctx);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    view.close().await;
    Ok(())
}

fn print_listing(view: &CatalogView, state: &FilterState, ctx: &Context) {
    let records = view.filtered(state);

    if ctx.output.is_json() {
        ctx.output.json(&records);
        return;
    }

    println!();
    ctx.output.products(&records);
    ctx.output.info(&format!("{} products", records.len()));
}
