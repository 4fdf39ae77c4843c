//! 应用层 - 内容生成路径
//!
//! - direct: 单次推理兜底
//! - staged: 四阶段流水线
//! - content: 能力判断与降级

mod content;
mod direct;
mod staged;

pub use content::{ContentPipeline, GenerationOutcome, GenerationPath, StagedCapability};
pub use direct::{DirectGenerator, DIRECT_PARAMS};
pub use staged::{StagedPipeline, StagedPipelineError, STAGED_PARAMS};
