//! 应用层 - 命令（写操作）
//!
//! 每次触发对应一条 GenerateBlogCommand

mod generate_commands;

pub mod handlers;

pub use generate_commands::*;
