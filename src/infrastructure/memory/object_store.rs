//! In-Memory Object Store Implementation

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::ports::{ObjectStoreError, ObjectStorePort};

/// 内存对象存储
///
/// 可以切换为拒绝所有写入，用于验证写入失败路径。
/// 对象在进程存活期间一直保留，只用于本地运行和测试，不适合长期运行的部署
pub struct InMemoryObjectStore {
    objects: DashMap<(String, String), Vec<u8>>,
    reject_writes: AtomicBool,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: DashMap::new(),
            reject_writes: AtomicBool::new(false),
        }
    }

    /// 所有写入都返回错误
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_reject_writes(true);
        store
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|entry| entry.value().clone())
    }

    /// 某 bucket 下的全部 key（已排序）
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .iter()
            .filter(|entry| entry.key().0 == bucket)
            .map(|entry| entry.key().1.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStorePort for InMemoryObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectStoreError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(ObjectStoreError::Rejected(format!(
                "writes disabled for {}/{}",
                bucket, key
            )));
        }
        if bucket.is_empty() || key.is_empty() {
            return Err(ObjectStoreError::InvalidKey(format!("{}/{}", bucket, key)));
        }

        self.objects
            .insert((bucket.to_string(), key.to_string()), body);
        tracing::debug!(bucket = %bucket, key = %key, "Object stored in memory");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
