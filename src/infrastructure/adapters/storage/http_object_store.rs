//! HTTP Object Store - S3 兼容的 path-style PUT
//!
//! PUT {endpoint}/{bucket}/{key}
//! Body: 文章原文（text/plain; charset=utf-8）

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{ObjectStoreError, ObjectStorePort};

/// HTTP 对象存储配置
#[derive(Debug, Clone)]
pub struct HttpObjectStoreConfig {
    pub endpoint: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl HttpObjectStoreConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout_secs: 60,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

/// HTTP 对象存储
pub struct HttpObjectStore {
    client: Client,
    config: HttpObjectStoreConfig,
}

impl HttpObjectStore {
    pub fn new(config: HttpObjectStoreConfig) -> Result<Self, ObjectStoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ObjectStoreError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            bucket,
            key.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ObjectStorePort for HttpObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectStoreError> {
        if bucket.is_empty() || key.is_empty() {
            return Err(ObjectStoreError::InvalidKey(format!("{}/{}", bucket, key)));
        }

        let url = self.object_url(bucket, key);
        let size = body.len();

        let mut request = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ObjectStoreError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ObjectStoreError::Rejected(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        tracing::debug!(url = %url, size = size, "Object uploaded");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}
