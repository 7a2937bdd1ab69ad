use crate::commands::{print_json, print_user, Context};
use crate::error::not_found;
use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use lantern_core::{find_user_by_email, EmailKey};
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum RecoveryCommand {
    /// Find the account a recovery request refers to
    Lookup(LookupArgs),
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    pub email: String,
}

pub fn lookup(ctx: &Context<'_>, args: LookupArgs) -> Result<()> {
    let users = ctx.store.users();
    let found = find_user_by_email(&users, &args.email)
        .with_context(|| format!("look up {}", args.email))?;

    let Some(user) = found else {
        let key = EmailKey::new(&args.email);
        debug!(email = %key, "no account for recovery request");
        return Err(not_found(format!("no account for {}", key)));
    };
    debug!(id = %user.id, "recovery account resolved");

    if ctx.json {
        return print_json(&user);
    }
    println!("{} account", ctx.config.site.app_name());
    print_user(&user);
    Ok(())
}
