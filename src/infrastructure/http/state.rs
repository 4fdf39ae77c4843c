//! Application State
//!
//! 所有 handler 共享，构建后只读

use std::sync::Arc;

use crate::application::{ArticleArchiver, ContentPipeline, GenerateBlogHandler, StagedCapability};

/// 应用状态
pub struct AppState {
    /// 启动时确定的分阶段流水线能力
    pub staged_capability: StagedCapability,

    // ========== Command Handlers ==========
    pub generate_blog_handler: Arc<GenerateBlogHandler>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(pipeline: Arc<ContentPipeline>, archiver: Arc<ArticleArchiver>) -> Self {
        Self {
            staged_capability: pipeline.capability().clone(),
            generate_blog_handler: Arc::new(GenerateBlogHandler::new(pipeline, archiver)),
        }
    }
}
