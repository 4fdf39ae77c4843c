//! Object Store Port - 出站端口
//!
//! 只有写路径：生成的文章写入后不再读取

use async_trait::async_trait;
use thiserror::Error;

/// 对象存储错误
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Rejected by store: {0}")]
    Rejected(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

/// Object Store Port
#[async_trait]
pub trait ObjectStorePort: Send + Sync {
    /// 写入对象，已存在则覆盖
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectStoreError>;

    /// 后端名称（用于日志）
    fn backend(&self) -> &'static str;
}
