//! Glow CLI - Command line admin tool for the GlowBeauty catalog.
//!
//! Commands:
//! - `glow list` - List products in a category
//! - `glow add` - Add a product (admin)
//! - `glow extract` - Guess product details from a URL
//! - `glow resolve` - Detect the category for a URL and title
//! - `glow export` - Export products as JSON (admin)
//! - `glow clear` - Remove every stored product (admin)
//! - `glow login` / `glow logout` - Admin session
//! - `glow watch` - Follow a category as it changes
//! - `glow config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::{
    AddArgs, ClearArgs, ConfigArgs, ExportArgs, ExtractArgs, ListArgs, LoginArgs, ResolveArgs,
    WatchArgs,
};

/// Glow CLI - Manage the GlowBeauty product catalog
#[derive(Parser)]
#[command(name = "glow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in a category
    List(ListArgs),

    /// Add a product to the catalog
    Add(AddArgs),

    /// Guess product details from a product URL
    Extract(ExtractArgs),

    /// Detect the category for a product URL and title
    Resolve(ResolveArgs),

    /// Export stored products as JSON
    Export(ExportArgs),

    /// Remove every stored product
    Clear(ClearArgs),

    /// Log in as admin
    Login(LoginArgs),

    /// Log out of the admin session
    Logout,

    /// Follow a category listing as it changes
    Watch(WatchArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Extract(args) => commands::extract::run(args, &ctx).await,
        Commands::Resolve(args) => commands::resolve::run(args, &ctx).await,
        Commands::Export(args) => commands::export::run(args, &ctx).await,
        Commands::Clear(args) => commands::clear::run(args, &ctx).await,
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Watch(args) => commands::watch::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr, `RUST_LOG` first, then `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "glow_commerce=debug,glow_store=debug,glow_cli=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
