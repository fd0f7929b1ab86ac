//! Admin login and logout.

use anyhow::Result;
use dialoguer::Password;

use super::LoginArgs;
use crate::context::Context;

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => Password::new().with_prompt("Admin password").interact()?,
    };

    let store = ctx.open_store()?;
    ctx.admin_gate(&store).login(&password)?;
    ctx.output.success("Logged in as admin");

    Ok(())
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    ctx.admin_gate(&store).logout()?;
    ctx.output.success("Logged out");

    Ok(())
}
