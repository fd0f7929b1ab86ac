//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, GlowConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force, format } => init_config(force, &format, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.kv("data_dir", &ctx.data_dir().display().to_string());
    ctx.output.kv(
        "quota_bytes",
        &ctx.config
            .quota_bytes
            .map_or_else(|| "unlimited".to_string(), |q| q.to_string()),
    );

    let catalog = &ctx.config.catalog;
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("all_limit", &catalog.all_limit.to_string());
    ctx.output.kv("poll_interval_ms", &catalog.poll_interval_ms.to_string());
    ctx.output.kv("extract_delay_ms", &catalog.extract_delay_ms.to_string());
    ctx.output.kv("admin_password", &"*".repeat(catalog.admin_password.len()));

    Ok(())
}

async fn init_config(force: bool, format: &str, ctx: &Context) -> Result<()> {
    let file_name = match format {
        "toml" => "glow.toml",
        "json" => "glow.json",
        other => bail!("Unknown config format '{}'. Use toml or json.", other),
    };
    let config_path = ctx.cwd.join(file_name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if format == "json" {
        GlowConfig::default().save(&config_path.to_string_lossy())?;
    } else {
        std::fs::write(&config_path, generate_default_config())?;
    }
    ctx.output
        .success(&format!("Created {}", config_path.display()));

    Ok(())
}
