//! Fake Inference Client - 不调用远程服务的推理客户端
//!
//! 按脚本依次返回预设回复；脚本耗尽后返回固定的占位文本

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::application::ports::{
    CompletionRequest, CompletionResponse, InferenceEnginePort, InferenceError,
};
use crate::domain::pipeline::StageKind;

/// 预设回复
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// 正常返回文本
    Text(String),
    /// 服务端报错
    Fail(String),
    /// 响应缺少 generation 字段
    Malformed,
}

/// Fake Inference Client 配置
#[derive(Debug, Clone, Default)]
pub struct FakeInferenceConfig {
    /// 模拟推理延迟（毫秒）
    pub latency_ms: u64,
    /// 保留收到的请求；服务进程内运行时应关闭
    pub record_requests: bool,
}

/// Fake Inference Client
pub struct FakeInferenceClient {
    config: FakeInferenceConfig,
    script: Mutex<VecDeque<FakeReply>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeInferenceClient {
    pub fn new(config: FakeInferenceConfig) -> Self {
        tracing::info!(
            latency_ms = config.latency_ms,
            record_requests = config.record_requests,
            "FakeInferenceClient initialized"
        );
        Self {
            config,
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeInferenceConfig::default())
    }

    /// 以脚本创建，并记录收到的请求
    pub fn scripted(replies: impl IntoIterator<Item = FakeReply>) -> Self {
        Self::new(FakeInferenceConfig {
            record_requests: true,
            ..Default::default()
        })
        .with_script(replies)
    }

    pub fn with_script(self, replies: impl IntoIterator<Item = FakeReply>) -> Self {
        lock(&self.script).extend(replies);
        self
    }

    /// 已记录的请求；未开启记录时为空
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 脚本耗尽后的占位回复；编辑阶段附带 meta description 与 CTA
fn canned_reply(prompt: &str, call_index: usize) -> String {
    if prompt.contains(StageKind::Edit.definition().role) {
        format!(
            "Placeholder article #{}.\n\nMeta Description: Placeholder summary.\n\nCTA: Contact us to learn more.",
            call_index
        )
    } else {
        format!("Placeholder response #{}.", call_index)
    }
}

#[async_trait]
impl InferenceEnginePort for FakeInferenceClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, InferenceError> {
        let call_index = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.config.record_requests {
            lock(&self.requests).push(request.clone());
        }

        tracing::debug!(
            call_index = call_index,
            prompt_len = request.prompt.len(),
            max_tokens = request.params.max_tokens,
            "FakeInferenceClient: replying"
        );

        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        let reply = lock(&self.script).pop_front();
        match reply {
            Some(FakeReply::Text(text)) => Ok(CompletionResponse {
                text,
                ..Default::default()
            }),
            Some(FakeReply::Fail(message)) => Err(InferenceError::ServiceError(message)),
            Some(FakeReply::Malformed) => Err(InferenceError::InvalidResponse(
                "missing field `generation`".to_string(),
            )),
            None => Ok(CompletionResponse {
                text: canned_reply(&request.prompt, call_index),
                ..Default::default()
            }),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
