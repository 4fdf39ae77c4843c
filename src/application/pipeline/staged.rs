//! Staged Generation - 调研 → 大纲 → 撰写 → 编辑
//!
//! 四个阶段严格顺序执行，每个阶段只看到它声明的上游输出

use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{
    CompletionRequest, GenerationParams, InferenceEnginePort, InferenceError,
};
use crate::domain::blog::GenerationRequest;
use crate::domain::pipeline::{stage_prompt, PipelineRun, StageKind, StageResult};

/// 分阶段生成的采样参数
pub const STAGED_PARAMS: GenerationParams = GenerationParams {
    max_tokens: 2048,
    temperature: 0.5,
    top_p: None,
};

/// 分阶段流水线错误
#[derive(Debug, Error)]
pub enum StagedPipelineError {
    #[error("Stage {stage} failed: {source}")]
    StageFailed {
        stage: StageKind,
        #[source]
        source: InferenceError,
    },

    #[error("Stage {0} completed out of order")]
    OutOfOrder(StageKind),
}

pub struct StagedPipeline {
    engine: Arc<dyn InferenceEnginePort>,
    params: GenerationParams,
}

impl StagedPipeline {
    pub fn new(engine: Arc<dyn InferenceEnginePort>, params: GenerationParams) -> Self {
        Self { engine, params }
    }

    pub fn with_default_params(engine: Arc<dyn InferenceEnginePort>) -> Self {
        Self::new(engine, STAGED_PARAMS)
    }

    /// 执行四个阶段，返回全部阶段输出
    ///
    /// 任一阶段失败即中止，不再执行后续阶段
    pub async fn run(&self, request: &GenerationRequest) -> Result<PipelineRun, StagedPipelineError> {
        let mut run = PipelineRun::new();

        for stage in StageKind::ORDER {
            let prompt = stage_prompt(stage, request, &run.upstream_of(stage));

            tracing::debug!(
                stage = %stage,
                prompt_len = prompt.len(),
                "Running pipeline stage"
            );

            let response = self
                .engine
                .complete(CompletionRequest {
                    prompt,
                    params: self.params,
                })
                .await
                .map_err(|source| StagedPipelineError::StageFailed { stage, source })?;

            tracing::info!(
                stage = %stage,
                chars = response.text.chars().count(),
                "Pipeline stage completed"
            );

            run.push(StageResult::new(stage, response.text))
                .map_err(StagedPipelineError::OutOfOrder)?;
        }

        Ok(run)
    }

    /// 执行流水线并提取最终文本
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, StagedPipelineError> {
        let run = self.run(request).await?;
        Ok(run.final_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{FakeInferenceClient, FakeReply};

    fn scripted(replies: [&str; 4]) -> Arc<FakeInferenceClient> {
        Arc::new(FakeInferenceClient::scripted(
            replies.map(|r| FakeReply::Text(r.to_string())),
        ))
    }

    #[tokio::test]
    async fn test_context_never_leaks_forward() {
        let engine = scripted(["RESEARCH-OUT", "OUTLINE-OUT", "WRITE-OUT", "EDIT-OUT"]);
        let pipeline = StagedPipeline::with_default_params(engine.clone());

        pipeline
            .run(&GenerationRequest::new("cloud cost optimization"))
            .await
            .unwrap();

        let prompts: Vec<String> = engine.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts.len(), 4);

        let outputs = ["RESEARCH-OUT", "OUTLINE-OUT", "WRITE-OUT", "EDIT-OUT"];
        for (position, prompt) in prompts.iter().enumerate() {
            for (producer, output) in outputs.iter().enumerate() {
                assert_eq!(
                    prompt.contains(output),
                    producer < position,
                    "stage #{} prompt vs output of stage #{}",
                    position,
                    producer
                );
            }
        }
    }

    #[tokio::test]
    async fn test_stage_params_are_used() {
        let engine = scripted(["r", "o", "w", "e"]);
        let pipeline = StagedPipeline::with_default_params(engine.clone());
        pipeline.run(&GenerationRequest::new("t")).await.unwrap();

        assert!(engine
            .requests()
            .iter()
            .all(|r| r.params == STAGED_PARAMS));
    }

    #[tokio::test]
    async fn test_edit_output_is_result() {
        let engine = scripted(["r", "o", "draft", "\n Final article.\nMeta Description: m\nCTA: c \n"]);
        let pipeline = StagedPipeline::with_default_params(engine);
        let text = pipeline.generate(&GenerationRequest::new("t")).await.unwrap();
        assert_eq!(text, "Final article.\nMeta Description: m\nCTA: c");
    }

    #[tokio::test]
    async fn test_blank_edit_uses_aggregate() {
        let engine = scripted(["r", "o", "draft article", "   "]);
        let pipeline = StagedPipeline::with_default_params(engine);
        let text = pipeline.generate(&GenerationRequest::new("t")).await.unwrap();
        assert_eq!(text, "draft article");
    }

    #[tokio::test]
    async fn test_failure_stops_pipeline() {
        let engine = Arc::new(FakeInferenceClient::scripted([
            FakeReply::Text("r".to_string()),
            FakeReply::Fail("boom".to_string()),
        ]));
        let pipeline = StagedPipeline::with_default_params(engine.clone());

        let err = pipeline.run(&GenerationRequest::new("t")).await.unwrap_err();
        assert!(matches!(
            err,
            StagedPipelineError::StageFailed {
                stage: StageKind::Outline,
                ..
            }
        ));
        assert_eq!(engine.call_count(), 2);
    }
}
