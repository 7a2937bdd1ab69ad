use crate::commands::print_json;
use anyhow::Result;
use clap::Args;
use lantern_config::AppConfig;
use lantern_core::{ConsentBanner, RenderContext};
use serde_json::json;

#[derive(Debug, Args)]
pub struct SiteArgs {}

#[derive(Debug, Args)]
pub struct ConsentBannerArgs {
    /// Where the page is being rendered: browser or server
    #[arg(long, default_value = "browser")]
    pub context: RenderContext,
}

pub fn show_site(config: &AppConfig, json: bool, _args: SiteArgs) -> Result<()> {
    let site = &config.site;
    if json {
        return print_json(site);
    }
    println!("name: {}", site.app_name());
    println!("url: {}", site.public_url());
    println!("description: {}", site.description());
    Ok(())
}

pub fn show_consent_banner(config: &AppConfig, json: bool, args: ConsentBannerArgs) -> Result<()> {
    let banner = ConsentBanner::mount(args.context, &config.consent);

    if json {
        return print_json(&json!({
            "context": args.context,
            "banner": banner,
        }));
    }

    match banner {
        Some(banner) => {
            println!("{}", banner.message);
            if let Some(url) = banner.policy_url.as_ref() {
                println!("policy: {}", url);
            }
            println!("[{}]", banner.accept_label);
        }
        None => println!("no consent banner in {} context", args.context),
    }
    Ok(())
}
