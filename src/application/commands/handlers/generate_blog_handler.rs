//! Generate Blog Handler
//!
//! 生成 → 归档，两步都不向调用方抛错

use std::sync::Arc;
use tracing::Instrument;

use crate::application::archiver::ArticleArchiver;
use crate::application::commands::generate_commands::*;
use crate::application::pipeline::ContentPipeline;

/// GenerateBlog Handler - 生成并归档一篇博客
pub struct GenerateBlogHandler {
    pipeline: Arc<ContentPipeline>,
    archiver: Arc<ArticleArchiver>,
}

impl GenerateBlogHandler {
    pub fn new(pipeline: Arc<ContentPipeline>, archiver: Arc<ArticleArchiver>) -> Self {
        Self { pipeline, archiver }
    }

    pub async fn handle(&self, cmd: GenerateBlogCommand) -> GenerateBlogResponse {
        let span = tracing::info_span!(
            "invocation",
            invocation_id = %cmd.invocation_id,
            topic = %cmd.request.topic()
        );

        async move {
            tracing::info!(
                word_count = cmd.request.target_word_count(),
                has_keywords = cmd.request.seo_keywords().is_some(),
                "Blog generation started"
            );

            let outcome = self.pipeline.generate(&cmd.request).await;
            let persist = self.archiver.archive(&outcome.article).await;

            let response = GenerateBlogResponse {
                invocation_id: cmd.invocation_id,
                path: outcome.path,
                article_chars: outcome.article.char_count(),
                has_meta_description: outcome.article.meta_description().is_some(),
                has_call_to_action: outcome.article.call_to_action().is_some(),
                persist,
            };

            tracing::info!(
                path = response.path.as_str(),
                article_chars = response.article_chars,
                has_meta_description = response.has_meta_description,
                has_call_to_action = response.has_call_to_action,
                persist = ?response.persist,
                "Blog generation finished"
            );

            response
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::archiver::PersistOutcome;
    use crate::application::pipeline::{DirectGenerator, GenerationPath, StagedPipeline};
    use crate::config::TimestampClock;
    use crate::domain::blog::GenerationRequest;
    use crate::infrastructure::adapters::{FakeInferenceClient, FakeReply};
    use crate::infrastructure::memory::InMemoryObjectStore;

    fn handler(
        staged_replies: Vec<FakeReply>,
        store: Arc<InMemoryObjectStore>,
    ) -> GenerateBlogHandler {
        let direct = DirectGenerator::with_default_params(Arc::new(FakeInferenceClient::scripted([
            FakeReply::Text("direct".to_string()),
        ])));
        let staged = StagedPipeline::with_default_params(Arc::new(FakeInferenceClient::scripted(
            staged_replies,
        )));
        GenerateBlogHandler::new(
            Arc::new(ContentPipeline::new(direct, Ok(staged))),
            Arc::new(ArticleArchiver::new(
                store,
                "bucket",
                "blog-output",
                TimestampClock::Utc,
            )),
        )
    }

    #[tokio::test]
    async fn test_staged_article_is_archived() {
        let store = InMemoryObjectStore::new().arc();
        let edited = "Article.\n\nMeta Description: Short.\n\nCTA: Act now.";
        let replies = ["r", "o", "w", edited]
            .map(|r| FakeReply::Text(r.to_string()))
            .to_vec();

        let response = handler(replies, store.clone())
            .handle(GenerateBlogCommand::new(GenerationRequest::new("t")))
            .await;

        assert_eq!(response.path, GenerationPath::Staged);
        assert!(response.has_meta_description);
        assert!(response.has_call_to_action);
        let PersistOutcome::Saved { key } = &response.persist else {
            panic!("expected saved outcome");
        };
        assert_eq!(store.get("bucket", key), Some(edited.as_bytes().to_vec()));
    }

    #[tokio::test]
    async fn test_storage_failure_is_contained() {
        let store = InMemoryObjectStore::failing().arc();
        let replies = ["r", "o", "w", "e"]
            .map(|r| FakeReply::Text(r.to_string()))
            .to_vec();

        let response = handler(replies, store)
            .handle(GenerateBlogCommand::new(GenerationRequest::new("t")))
            .await;

        assert!(matches!(response.persist, PersistOutcome::Failed { .. }));
        assert_eq!(response.article_chars, 1);
    }
}
