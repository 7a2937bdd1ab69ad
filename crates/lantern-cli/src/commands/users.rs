use crate::commands::{print_json, print_user, Context};
use crate::util::now_utc;
use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use lantern_store::repo::UserNew;
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a user in the local store
    Add(AddUserArgs),
}

#[derive(Debug, Args)]
pub struct AddUserArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub name: Option<String>,
}

pub fn add_user(ctx: &Context<'_>, args: AddUserArgs) -> Result<()> {
    let user = ctx
        .store
        .users()
        .create(
            now_utc(),
            UserNew {
                email: args.email,
                display_name: args.name,
            },
        )
        .with_context(|| "create user")?;
    debug!(id = %user.id, email = %user.email, "user created");

    if ctx.json {
        return print_json(&user);
    }
    print_user(&user);
    Ok(())
}
