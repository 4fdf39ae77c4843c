//! Content Pipeline - 分阶段优先，失败或不可用时退回直接生成

use serde::Serialize;

use super::direct::DirectGenerator;
use super::staged::StagedPipeline;
use crate::domain::blog::{GeneratedArticle, GenerationRequest};

/// 分阶段流水线能力，启动时确定一次
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum StagedCapability {
    Available,
    Unavailable { reason: String },
}

impl StagedCapability {
    pub fn is_available(&self) -> bool {
        matches!(self, StagedCapability::Available)
    }
}

/// 实际使用的生成路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPath {
    /// 分阶段流水线成功
    Staged,
    /// 分阶段不可用，直接生成
    Direct,
    /// 分阶段中途失败，退回直接生成
    DirectAfterStageFailure,
}

impl GenerationPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationPath::Staged => "staged",
            GenerationPath::Direct => "direct",
            GenerationPath::DirectAfterStageFailure => "direct_after_stage_failure",
        }
    }
}

/// 一次生成的结果
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub article: GeneratedArticle,
    pub path: GenerationPath,
}

pub struct ContentPipeline {
    direct: DirectGenerator,
    staged: Option<StagedPipeline>,
    capability: StagedCapability,
}

impl ContentPipeline {
    /// `staged` 为 Err 时记录原因，此后所有调用都走直接生成
    pub fn new(direct: DirectGenerator, staged: Result<StagedPipeline, String>) -> Self {
        let (staged, capability) = match staged {
            Ok(pipeline) => (Some(pipeline), StagedCapability::Available),
            Err(reason) => (None, StagedCapability::Unavailable { reason }),
        };

        Self {
            direct,
            staged,
            capability,
        }
    }

    /// 只有直接生成
    pub fn direct_only(direct: DirectGenerator, reason: impl Into<String>) -> Self {
        Self::new(direct, Err(reason.into()))
    }

    pub fn capability(&self) -> &StagedCapability {
        &self.capability
    }

    /// 生成文章，永不返回错误；什么都没生成时文章为空
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        let Some(staged) = &self.staged else {
            tracing::info!(
                capability = ?self.capability,
                "Staged pipeline not available; falling back to direct generation"
            );
            return GenerationOutcome {
                article: GeneratedArticle::new(self.direct.generate(request.topic()).await),
                path: GenerationPath::Direct,
            };
        };

        match staged.generate(request).await {
            Ok(text) => GenerationOutcome {
                article: GeneratedArticle::new(text),
                path: GenerationPath::Staged,
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Staged pipeline failed; falling back to direct generation"
                );
                GenerationOutcome {
                    article: GeneratedArticle::new(self.direct.generate(request.topic()).await),
                    path: GenerationPath::DirectAfterStageFailure,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{FakeInferenceClient, FakeReply};
    use std::sync::Arc;

    fn text(s: &str) -> FakeReply {
        FakeReply::Text(s.to_string())
    }

    #[tokio::test]
    async fn test_unavailable_equals_direct_output() {
        let request = GenerationRequest::new("cloud cost optimization");

        let reference_engine = Arc::new(FakeInferenceClient::scripted([text("direct blog")]));
        let expected = DirectGenerator::with_default_params(reference_engine.clone())
            .generate(request.topic())
            .await;

        let engine = Arc::new(FakeInferenceClient::scripted([text("direct blog")]));
        let pipeline = ContentPipeline::direct_only(
            DirectGenerator::with_default_params(engine.clone()),
            "disabled",
        );

        let outcome = pipeline.generate(&request).await;
        assert_eq!(outcome.article.as_str(), expected);
        assert_eq!(outcome.path, GenerationPath::Direct);
        assert_eq!(engine.requests()[0].prompt, reference_engine.requests()[0].prompt);
        assert!(!pipeline.capability().is_available());
    }

    #[tokio::test]
    async fn test_staged_success() {
        let direct_engine = Arc::new(FakeInferenceClient::with_defaults());
        let staged_engine = Arc::new(FakeInferenceClient::scripted([
            text("r"),
            text("o"),
            text("w"),
            text("edited"),
        ]));
        let pipeline = ContentPipeline::new(
            DirectGenerator::with_default_params(direct_engine.clone()),
            Ok(StagedPipeline::with_default_params(staged_engine)),
        );

        let outcome = pipeline.generate(&GenerationRequest::new("t")).await;
        assert_eq!(outcome.article.as_str(), "edited");
        assert_eq!(outcome.path, GenerationPath::Staged);
        assert_eq!(direct_engine.call_count(), 0);
        assert!(pipeline.capability().is_available());
    }

    #[tokio::test]
    async fn test_stage_failure_degrades_to_direct() {
        let direct_engine = Arc::new(FakeInferenceClient::scripted([text("short draft")]));
        let staged_engine = Arc::new(FakeInferenceClient::scripted([
            text("r"),
            text("o"),
            FakeReply::Fail("timeout".to_string()),
        ]));
        let pipeline = ContentPipeline::new(
            DirectGenerator::with_default_params(direct_engine.clone()),
            Ok(StagedPipeline::with_default_params(staged_engine.clone())),
        );

        let outcome = pipeline.generate(&GenerationRequest::new("t")).await;
        assert_eq!(outcome.article.as_str(), "short draft");
        assert_eq!(outcome.path, GenerationPath::DirectAfterStageFailure);
        assert_eq!(staged_engine.call_count(), 3);
        assert_eq!(direct_engine.call_count(), 1);
    }

    #[tokio::test]
    async fn test_everything_fails_yields_empty_article() {
        let direct_engine = Arc::new(FakeInferenceClient::scripted([FakeReply::Malformed]));
        let pipeline = ContentPipeline::direct_only(
            DirectGenerator::with_default_params(direct_engine),
            "disabled",
        );
        let outcome = pipeline.generate(&GenerationRequest::new("t")).await;
        assert!(outcome.article.is_empty());
    }
}
