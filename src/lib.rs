//! Blogforge - 博客内容生成服务
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Blog Context: 生成请求、文章、归档 key
//! - Pipeline Context: 四阶段流水线定义与 prompt
//!
//! 应用层 (application/):
//! - Ports: 端口定义（InferenceEngine, ObjectStore）
//! - Pipeline: 直接生成、分阶段生成、降级策略
//! - Commands: 生成命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 触发入口
//! - Adapters: 推理客户端、对象存储
//! - Memory: 进程内对象存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
