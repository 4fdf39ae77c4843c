//! File Object Store - 以本地目录模拟对象存储
//!
//! 实现 ObjectStorePort trait，对象写到 `{root}/{bucket}/{key}`

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ObjectStoreError, ObjectStorePort};

/// 文件系统对象存储
pub struct FileObjectStore {
    /// 存储根目录
    root_dir: PathBuf,
}

impl FileObjectStore {
    /// 创建新的文件存储
    pub async fn new(root_dir: impl AsRef<Path>) -> Result<Self, ObjectStoreError> {
        let root_dir = root_dir.as_ref().to_path_buf();

        fs::create_dir_all(&root_dir)
            .await
            .map_err(|e| ObjectStoreError::IoError(e.to_string()))?;

        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// 计算对象路径；拒绝跳出根目录的 bucket/key
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, ObjectStoreError> {
        let relative = Path::new(bucket).join(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if bucket.is_empty() || key.is_empty() || escapes {
            return Err(ObjectStoreError::InvalidKey(format!("{}/{}", bucket, key)));
        }
        Ok(self.root_dir.join(relative))
    }
}

#[async_trait]
impl ObjectStorePort for FileObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectStoreError> {
        let path = self.object_path(bucket, key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ObjectStoreError::IoError(e.to_string()))?;
        }

        let size = body.len();
        fs::write(&path, body)
            .await
            .map_err(|e| ObjectStoreError::IoError(e.to_string()))?;

        tracing::debug!(
            "Saved object: bucket={}, key={}, size={} bytes",
            bucket,
            key,
            size
        );

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
