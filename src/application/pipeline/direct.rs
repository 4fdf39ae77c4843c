//! Direct Generation - 单次推理生成短文
//!
//! 兜底路径：不依赖分阶段流水线，任何错误都转换为空字符串

use std::sync::Arc;

use crate::application::ports::{CompletionRequest, GenerationParams, InferenceEnginePort};
use crate::domain::pipeline::direct_prompt;

/// 直接生成的采样参数
pub const DIRECT_PARAMS: GenerationParams = GenerationParams {
    max_tokens: 512,
    temperature: 0.5,
    top_p: Some(0.9),
};

pub struct DirectGenerator {
    engine: Arc<dyn InferenceEnginePort>,
    params: GenerationParams,
}

impl DirectGenerator {
    pub fn new(engine: Arc<dyn InferenceEnginePort>, params: GenerationParams) -> Self {
        Self { engine, params }
    }

    pub fn with_default_params(engine: Arc<dyn InferenceEnginePort>) -> Self {
        Self::new(engine, DIRECT_PARAMS)
    }

    /// 生成短文；失败时记录日志并返回空字符串
    pub async fn generate(&self, topic: &str) -> String {
        let request = CompletionRequest {
            prompt: direct_prompt(topic),
            params: self.params,
        };

        match self.engine.complete(request).await {
            Ok(response) => {
                tracing::info!(
                    engine = self.engine.name(),
                    chars = response.text.chars().count(),
                    "Direct generation completed"
                );
                response.text
            }
            Err(e) => {
                tracing::error!(
                    engine = self.engine.name(),
                    error = %e,
                    "Error generating the blog"
                );
                String::new()
            }
        }
    }
}
