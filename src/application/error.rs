//! 应用层错误定义
//!
//! 生成与归档都不会失败，只有输入解析会中止一次调用

use thiserror::Error;

use crate::domain::blog::BlogError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<BlogError> for ApplicationError {
    fn from(err: BlogError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
