//! Identity provider client

mod http;
mod user;

pub use http::HttpIdentityProvider;
pub use user::IdentityUser;
