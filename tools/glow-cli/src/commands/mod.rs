//! CLI command implementations.

pub mod add;
pub mod auth;
pub mod clear;
pub mod config;
pub mod export;
pub mod extract;
pub mod list;
pub mod resolve;
pub mod watch;

use clap::{Args, Subcommand};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Category to list, or `all`.
    #[arg(default_value = "all")]
    pub category: String,

    /// Storefront query string, e.g. `category=men&refresh=1`.
    #[arg(long, conflicts_with = "category")]
    pub query: Option<String>,

    /// Only titles containing this text.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Price range: all, under25, 25to50, 50to100, 100to200, 200to500, over500, custom.
    #[arg(short, long, default_value = "all")]
    pub price: String,

    /// Lower bound for a custom price range.
    #[arg(long)]
    pub min: Option<f64>,

    /// Upper bound for a custom price range.
    #[arg(long)]
    pub max: Option<f64>,

    /// Sort: default, price-asc, price-desc, rating, reviews, newest.
    #[arg(long, default_value = "default")]
    pub sort: String,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Prefill fields from a product URL before applying the flags below.
    #[arg(long)]
    pub from_url: Option<String>,

    /// Product title.
    #[arg(short, long)]
    pub title: Option<String>,

    /// Main image URL.
    #[arg(short, long)]
    pub image: Option<String>,

    /// Additional image URL (repeatable).
    #[arg(long = "extra-image")]
    pub extra_images: Vec<String>,

    /// Price in dollars.
    #[arg(short, long)]
    pub price: Option<f64>,

    /// Rating between 0 and 5.
    #[arg(short, long)]
    pub rating: Option<f64>,

    /// Number of reviews.
    #[arg(long)]
    pub reviews: Option<u64>,

    /// Short review quote.
    #[arg(long)]
    pub snippet: Option<String>,

    /// Affiliate link.
    #[arg(short, long)]
    pub link: Option<String>,

    /// Category. Detected from the link and title when omitted.
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Product page URL.
    pub url: String,
}

/// Arguments for the resolve command.
#[derive(Args)]
pub struct ResolveArgs {
    /// Product page URL.
    pub url: String,

    /// Product title.
    #[arg(default_value = "")]
    pub title: String,
}

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Category to export. Exports every storefront category when omitted.
    pub category: Option<String>,

    /// Output directory.
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// Print to stdout instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Admin password. Prompted for when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Category to follow, or `all`.
    #[arg(default_value = "all")]
    pub category: String,

    /// Storefront query string, e.g. `category=men&refresh=1`.
    #[arg(long, conflicts_with = "category")]
    pub query: Option<String>,

    /// Only titles containing this text.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Sort: default, price-asc, price-desc, rating, reviews, newest.
    #[arg(long, default_value = "default")]
    pub sort: String,

    /// Poll interval in milliseconds, overriding the config.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// File format: toml or json.
        #[arg(long, default_value = "toml")]
        format: String,
    },
}
