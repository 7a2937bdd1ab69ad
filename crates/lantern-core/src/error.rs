use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("app name is required")]
    EmptyAppName,
    #[error("site description is required")]
    EmptyDescription,
    #[error("invalid public url: {0}")]
    InvalidPublicUrl(String),
    #[error("consent banner message is required")]
    EmptyBannerMessage,
    #[error("consent banner accept label is required")]
    EmptyBannerLabel,
    #[error("invalid render context: {0}")]
    InvalidRenderContext(String),
}
