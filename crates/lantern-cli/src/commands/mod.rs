use anyhow::Result;
use lantern_config::AppConfig;
use lantern_core::User;
use lantern_store::Store;
use serde::Serialize;
use std::io::{self, Write};

use crate::util::format_timestamp_datetime;

pub mod completions;
pub mod recovery;
pub mod site;
pub mod users;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub(crate) fn print_user(user: &User) {
    println!("id: {}", user.id);
    println!("email: {}", user.email);
    if let Some(name) = user.display_name.as_deref() {
        println!("name: {}", name);
    }
    println!("created: {}", format_timestamp_datetime(user.created_at));
}
