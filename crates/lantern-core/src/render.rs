//! Gating for UI elements that only exist in a browser.
//!
//! The consent banner is never constructed while rendering on the server. A
//! caller asks for it with the context it is rendering in and gets `None`
//! when there is nowhere to show it.

use crate::error::CoreError;
use crate::site::parse_public_url;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

pub const DEFAULT_BANNER_MESSAGE: &str =
    "We use cookies to keep you signed in and to understand how the site is used.";
pub const DEFAULT_ACCEPT_LABEL: &str = "Accept";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderContext {
    Server,
    Browser,
}

impl RenderContext {
    pub fn has_browser(self) -> bool {
        matches!(self, RenderContext::Browser)
    }
}

impl fmt::Display for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderContext::Server => f.write_str("server"),
            RenderContext::Browser => f.write_str("browser"),
        }
    }
}

impl FromStr for RenderContext {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(RenderContext::Server),
            "browser" => Ok(RenderContext::Browser),
            _ => Err(CoreError::InvalidRenderContext(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentSettings {
    pub enabled: bool,
    message: String,
    policy_url: Option<Url>,
    accept_label: String,
}

impl ConsentSettings {
    pub fn new(
        enabled: bool,
        message: &str,
        policy_url: Option<&str>,
        accept_label: &str,
    ) -> Result<Self, CoreError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CoreError::EmptyBannerMessage);
        }
        let accept_label = accept_label.trim();
        if accept_label.is_empty() {
            return Err(CoreError::EmptyBannerLabel);
        }
        let policy_url = policy_url.map(parse_public_url).transpose()?;

        Ok(Self {
            enabled,
            message: message.to_string(),
            policy_url,
            accept_label: accept_label.to_string(),
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn policy_url(&self) -> Option<&Url> {
        self.policy_url.as_ref()
    }

    pub fn accept_label(&self) -> &str {
        &self.accept_label
    }
}

impl Default for ConsentSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            message: DEFAULT_BANNER_MESSAGE.to_string(),
            policy_url: None,
            accept_label: DEFAULT_ACCEPT_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsentBanner {
    pub message: String,
    pub policy_url: Option<Url>,
    pub accept_label: String,
}

impl ConsentBanner {
    pub fn mount(context: RenderContext, settings: &ConsentSettings) -> Option<Self> {
        if !context.has_browser() || !settings.enabled {
            return None;
        }
        Some(Self {
            message: settings.message.clone(),
            policy_url: settings.policy_url.clone(),
            accept_label: settings.accept_label.clone(),
        })
    }
}
