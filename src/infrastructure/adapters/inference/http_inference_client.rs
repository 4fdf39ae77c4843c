//! HTTP Inference Client - 调用托管的文本生成服务
//!
//! 实现 InferenceEnginePort trait
//!
//! 外部推理 API:
//! POST {endpoint}/model/{model_id}/invoke
//! Request: {"prompt": "...", "max_gen_len": 512, "temperature": 0.5, "top_p": 0.9}
//! Response: {"generation": "...", "prompt_token_count": 12, "generation_token_count": 300, "stop_reason": "stop"}

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    CompletionRequest, CompletionResponse, InferenceEnginePort, InferenceError,
};

/// 推理请求体 (JSON)
#[derive(Debug, Serialize)]
struct InvokeModelBody<'a> {
    prompt: &'a str,
    max_gen_len: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

/// 推理响应体 (JSON)
#[derive(Debug, Deserialize)]
struct InvokeModelReply {
    generation: Option<String>,
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    generation_token_count: Option<u32>,
    #[serde(default)]
    stop_reason: Option<String>,
}

/// HTTP 推理客户端配置
#[derive(Debug, Clone)]
pub struct HttpInferenceClientConfig {
    /// 区域化的服务 endpoint
    pub endpoint: String,
    pub model_id: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// 读超时（秒）
    pub timeout_secs: u64,
    /// 连接超时（秒）
    pub connect_timeout_secs: u64,
    /// 传输层重试次数（不含首次）
    pub max_retries: u32,
}

impl Default for HttpInferenceClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://bedrock-runtime.us-east-1.amazonaws.com".to_string(),
            model_id: "meta.llama2-13b-chat-v1".to_string(),
            api_key: None,
            timeout_secs: 300,
            connect_timeout_secs: 60,
            max_retries: 3,
        }
    }
}

impl HttpInferenceClientConfig {
    pub fn new(endpoint: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model_id: model_id.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

/// HTTP 推理客户端
pub struct HttpInferenceClient {
    client: Client,
    config: HttpInferenceClientConfig,
}

impl HttpInferenceClient {
    /// 创建新的 HTTP 推理客户端
    pub fn new(config: HttpInferenceClientConfig) -> Result<Self, InferenceError> {
        if config.model_id.is_empty() {
            return Err(InferenceError::ServiceError("model id is empty".to_string()));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InferenceError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取推理 URL
    fn invoke_url(&self) -> String {
        format!(
            "{}/model/{}/invoke",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model_id.replace(':', "%3A")
        )
    }

    /// 单次请求，不重试
    async fn invoke_once(&self, body: &InvokeModelBody<'_>) -> Result<CompletionResponse, InferenceError> {
        let mut request = self.client.post(self.invoke_url()).json(body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout
            } else if e.is_connect() {
                InferenceError::NetworkError(format!("Cannot connect to inference service: {}", e))
            } else {
                InferenceError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = format!("HTTP {}: {}", status, error_text);
            return Err(if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                InferenceError::Unavailable(message)
            } else {
                InferenceError::ServiceError(message)
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout
            } else {
                InferenceError::InvalidResponse(format!("Failed to read body: {}", e))
            }
        })?;

        parse_reply(&bytes)
    }
}

/// 解析响应体；缺少 generation 字段视为无效响应
fn parse_reply(bytes: &[u8]) -> Result<CompletionResponse, InferenceError> {
    let reply: InvokeModelReply = serde_json::from_slice(bytes)
        .map_err(|e| InferenceError::InvalidResponse(format!("Malformed JSON: {}", e)))?;

    let text = reply
        .generation
        .ok_or_else(|| InferenceError::InvalidResponse("missing field `generation`".to_string()))?;

    Ok(CompletionResponse {
        text,
        prompt_tokens: reply.prompt_token_count,
        generation_tokens: reply.generation_token_count,
        stop_reason: reply.stop_reason,
    })
}

/// 第 n 次重试前的等待时间
fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(250 * 2u64.pow(attempt.saturating_sub(1).min(4)))
}

#[async_trait]
impl InferenceEnginePort for HttpInferenceClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, InferenceError> {
        let body = InvokeModelBody {
            prompt: &request.prompt,
            max_gen_len: request.params.max_tokens,
            temperature: request.params.temperature,
            top_p: request.params.top_p,
        };

        tracing::debug!(
            url = %self.invoke_url(),
            prompt_len = request.prompt.len(),
            max_gen_len = body.max_gen_len,
            "Sending inference request"
        );

        let mut retries = 0;
        loop {
            match self.invoke_once(&body).await {
                Ok(response) => {
                    tracing::info!(
                        model_id = %self.config.model_id,
                        retries = retries,
                        prompt_tokens = ?response.prompt_tokens,
                        generation_tokens = ?response.generation_tokens,
                        stop_reason = ?response.stop_reason,
                        "Inference completed"
                    );
                    return Ok(response);
                }
                Err(e) if e.is_transient() && retries < self.config.max_retries => {
                    retries += 1;
                    let delay = retry_delay(retries);
                    tracing::warn!(
                        retry = retries,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Inference attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
