//! Pipeline Context - 分阶段内容流水线
//!
//! 职责:
//! - 四个固定阶段的角色定义与上游依赖
//! - 阶段输出与运行记录
//! - Prompt 构造

mod prompts;
mod stage;

pub use prompts::{direct_prompt, stage_prompt, task_description, CONTEXT_DIVIDER};
pub use stage::{PipelineRun, PipelineStage, StageKind, StageResult};
