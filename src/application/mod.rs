//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（InferenceEngine、ObjectStore）
//! - pipeline: 直接生成、分阶段生成与降级
//! - archiver: 文章归档
//! - commands: 命令及处理器
//! - error: 应用层错误定义

pub mod archiver;
pub mod commands;
pub mod error;
pub mod pipeline;
pub mod ports;

// Re-exports
pub use archiver::{ArticleArchiver, PersistOutcome};

pub use commands::{handlers::GenerateBlogHandler, GenerateBlogCommand, GenerateBlogResponse};

pub use error::ApplicationError;

pub use pipeline::{
    ContentPipeline, DirectGenerator, GenerationOutcome, GenerationPath, StagedCapability,
    StagedPipeline, StagedPipelineError, DIRECT_PARAMS, STAGED_PARAMS,
};

pub use ports::{
    CompletionRequest, CompletionResponse, GenerationParams, InferenceEnginePort, InferenceError,
    ObjectStoreError, ObjectStorePort,
};
