use crate::error::CoreError;
use serde::Serialize;
use url::Url;

pub const DEFAULT_APP_NAME: &str = "Lantern";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";
pub const DEFAULT_DESCRIPTION: &str = "Sign in, recover your account and manage your profile.";

/// Public identity of the site, consumed by page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteMetadata {
    app_name: String,
    public_url: Url,
    description: String,
}

impl SiteMetadata {
    pub fn new(app_name: &str, public_url: &str, description: &str) -> Result<Self, CoreError> {
        let app_name = app_name.trim();
        if app_name.is_empty() {
            return Err(CoreError::EmptyAppName);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::EmptyDescription);
        }
        let public_url = parse_public_url(public_url)?;

        Ok(Self {
            app_name: app_name.to_string(),
            public_url,
            description: description.to_string(),
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn public_url(&self) -> &Url {
        &self.public_url
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            public_url: Url::parse(DEFAULT_PUBLIC_URL).expect("default public url"),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

pub(crate) fn parse_public_url(raw: &str) -> Result<Url, CoreError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| CoreError::InvalidPublicUrl(trimmed.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(CoreError::InvalidPublicUrl(trimmed.to_string())),
    }
}
