//! Article Archiver - 把生成的文章写入对象存储
//!
//! 写入失败只记录日志，通过 PersistOutcome 向内部报告

use chrono::{Local, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::application::ports::ObjectStorePort;
use crate::config::TimestampClock;
use crate::domain::blog::{ArchiveKey, GeneratedArticle};

/// 写入结果（不对外暴露）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PersistOutcome {
    Saved { key: String },
    /// 没有内容可写
    Skipped,
    Failed { key: String, error: String },
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved { .. })
    }
}

pub struct ArticleArchiver {
    store: Arc<dyn ObjectStorePort>,
    bucket: String,
    key_prefix: String,
    clock: TimestampClock,
}

impl ArticleArchiver {
    pub fn new(
        store: Arc<dyn ObjectStorePort>,
        bucket: impl Into<String>,
        key_prefix: impl Into<String>,
        clock: TimestampClock,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            key_prefix: key_prefix.into(),
            clock,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// 当前时间对应的 key
    pub fn next_key(&self) -> ArchiveKey {
        match self.clock {
            TimestampClock::Utc => ArchiveKey::at(&self.key_prefix, &Utc::now()),
            TimestampClock::Local => ArchiveKey::at(&self.key_prefix, &Local::now()),
        }
    }

    /// 写入文章；空文章不写
    pub async fn archive(&self, article: &GeneratedArticle) -> PersistOutcome {
        if article.is_empty() {
            tracing::warn!("No blog was generated");
            return PersistOutcome::Skipped;
        }

        let key = self.next_key();
        let body = article.as_str().as_bytes().to_vec();

        match self.store.put_object(&self.bucket, key.as_str(), body).await {
            Ok(()) => {
                tracing::info!(
                    backend = self.store.backend(),
                    bucket = %self.bucket,
                    key = %key,
                    "Content saved to object store"
                );
                PersistOutcome::Saved {
                    key: key.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(
                    backend = self.store.backend(),
                    bucket = %self.bucket,
                    key = %key,
                    error = %e,
                    "Error when saving the content to object store"
                );
                PersistOutcome::Failed {
                    key: key.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }
}
