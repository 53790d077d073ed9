//! Data models for the portfolio server.
//!
//! Field names serialize in camelCase to match the browser client.

mod contact;
mod post;
mod user;

pub use contact::*;
pub use post::*;
pub use user::*;
