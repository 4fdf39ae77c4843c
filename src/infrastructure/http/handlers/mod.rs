//! HTTP Handlers

mod blog;
mod ping;

pub use blog::*;
pub use ping::*;
