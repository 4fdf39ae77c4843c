//! Inference Engine Port - 文本生成模型抽象
//!
//! 定义模型推理的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 推理错误
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    /// 限流或 5xx
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl InferenceError {
    /// 是否属于可重试的传输层错误
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            InferenceError::NetworkError(_) | InferenceError::Timeout | InferenceError::Unavailable(_)
        )
    }
}

/// 采样参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// 生成长度上限（token）
    pub max_tokens: u32,
    pub temperature: f32,
    /// nucleus sampling，None 表示使用服务端默认
    pub top_p: Option<f32>,
}

/// 推理请求
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub params: GenerationParams,
}

/// 推理响应
#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    /// 生成的文本
    pub text: String,
    pub prompt_tokens: Option<u32>,
    pub generation_tokens: Option<u32>,
    pub stop_reason: Option<String>,
}

/// Inference Engine Port
///
/// 外部文本生成服务的抽象接口
#[async_trait]
pub trait InferenceEnginePort: Send + Sync {
    /// 执行一次推理
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, InferenceError>;

    /// 适配器名称（用于日志）
    fn name(&self) -> &'static str;
}
