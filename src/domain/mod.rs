//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Blog Context: 生成请求、文章与归档 key
//! - Pipeline Context: 分阶段流水线的阶段定义与 prompt

pub mod blog;
pub mod pipeline;
