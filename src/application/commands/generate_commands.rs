//! Generate Commands - 博客生成命令

use uuid::Uuid;

use crate::application::archiver::PersistOutcome;
use crate::application::pipeline::GenerationPath;
use crate::domain::blog::GenerationRequest;

/// 生成博客命令
#[derive(Debug, Clone)]
pub struct GenerateBlogCommand {
    pub invocation_id: Uuid,
    pub request: GenerationRequest,
}

impl GenerateBlogCommand {
    pub fn new(request: GenerationRequest) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            request,
        }
    }
}

/// 生成博客结果（内部观测用）
#[derive(Debug, Clone)]
pub struct GenerateBlogResponse {
    pub invocation_id: Uuid,
    pub path: GenerationPath,
    pub article_chars: usize,
    pub has_meta_description: bool,
    pub has_call_to_action: bool,
    pub persist: PersistOutcome,
}
