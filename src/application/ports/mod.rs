//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod inference_engine;
mod object_store;

pub use inference_engine::{
    CompletionRequest, CompletionResponse, GenerationParams, InferenceEnginePort, InferenceError,
};
pub use object_store::{ObjectStoreError, ObjectStorePort};
