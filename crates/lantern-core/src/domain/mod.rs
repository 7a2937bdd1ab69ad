pub mod email;
pub mod ids;
pub mod user;

pub use email::EmailKey;
pub use ids::UserId;
pub use user::User;
