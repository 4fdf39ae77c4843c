//! Blog Context - 博客生成限界上下文
//!
//! 职责:
//! - 生成请求（主题与营销参数）
//! - 生成结果文章
//! - 归档对象 key

mod archive_key;
mod article;
mod errors;
mod request;

pub use archive_key::ArchiveKey;
pub use article::GeneratedArticle;
pub use errors::BlogError;
pub use request::{GenerationRequest, DEFAULT_TARGET_WORD_COUNT};
