//! Command Handlers 实现

mod generate_blog_handler;

pub use generate_blog_handler::*;
