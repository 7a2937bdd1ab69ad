pub mod domain;
pub mod error;
pub mod lookup;
pub mod render;
pub mod site;

pub use domain::*;
pub use error::CoreError;
pub use lookup::{find_user_by_email, LookupError, UserDirectory};
pub use render::{ConsentBanner, ConsentSettings, RenderContext};
pub use site::SiteMetadata;
