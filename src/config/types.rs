//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 推理服务配置
    #[serde(default)]
    pub inference: InferenceConfig,

    /// 直接生成参数
    #[serde(default)]
    pub direct: DirectConfig,

    /// 分阶段生成参数
    #[serde(default)]
    pub staged: StagedConfig,

    /// 对象存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// 推理客户端模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferenceMode {
    /// 调用远程 HTTP 推理服务
    #[default]
    Http,
    /// 本地假客户端（离线调试用）
    Fake,
}

/// 推理服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    #[serde(default)]
    pub mode: InferenceMode,

    /// 服务区域，用于拼接默认 endpoint
    #[serde(default = "default_region")]
    pub region: String,

    /// 显式指定的 endpoint（优先于 region）
    #[serde(default)]
    pub endpoint: Option<String>,

    /// 模型 ID
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// 读超时（秒）
    #[serde(default = "default_inference_timeout")]
    pub timeout_secs: u64,

    /// 传输层重试次数（不含首次），总调用数最多为 1 + max_retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_model_id() -> String {
    "meta.llama2-13b-chat-v1".to_string()
}

fn default_inference_timeout() -> u64 {
    300
}

fn default_max_retries() -> u32 {
    3
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            mode: InferenceMode::default(),
            region: default_region(),
            endpoint: None,
            model_id: default_model_id(),
            api_key: None,
            timeout_secs: default_inference_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl InferenceConfig {
    /// 实际使用的 endpoint
    pub fn resolved_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }
}

/// 直接生成参数
#[derive(Debug, Clone, Deserialize)]
pub struct DirectConfig {
    #[serde(default = "default_direct_max_gen_len")]
    pub max_gen_len: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_direct_max_gen_len() -> u32 {
    512
}

fn default_temperature() -> f32 {
    0.5
}

fn default_top_p() -> f32 {
    0.9
}

impl Default for DirectConfig {
    fn default() -> Self {
        Self {
            max_gen_len: default_direct_max_gen_len(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

/// 分阶段生成参数
#[derive(Debug, Clone, Deserialize)]
pub struct StagedConfig {
    /// 是否启用分阶段流水线
    #[serde(default = "default_staged_enabled")]
    pub enabled: bool,

    #[serde(default = "default_staged_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 每次阶段调用的超时（秒）
    #[serde(default = "default_inference_timeout")]
    pub timeout_secs: u64,
}

fn default_staged_enabled() -> bool {
    true
}

fn default_staged_max_tokens() -> u32 {
    2048
}

impl Default for StagedConfig {
    fn default() -> Self {
        Self {
            enabled: default_staged_enabled(),
            max_tokens: default_staged_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_inference_timeout(),
        }
    }
}

/// 对象存储后端
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// 本地目录
    #[default]
    File,
    /// S3 兼容的 HTTP PUT
    Http,
    /// 进程内存
    Memory,
}

/// 对象 key 时间戳使用的时钟
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampClock {
    #[default]
    Utc,
    Local,
}

/// 对象存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// 目标 bucket
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// 对象 key 前缀
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// file 后端的根目录
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// http 后端的 endpoint
    #[serde(default)]
    pub endpoint: Option<String>,

    /// http 后端的 Bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub timestamp_clock: TimestampClock,
}

fn default_bucket() -> String {
    "aws_bedrock_course1".to_string()
}

fn default_key_prefix() -> String {
    "blog-output".to_string()
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("data/objects")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: default_bucket(),
            key_prefix: default_key_prefix(),
            root_dir: default_root_dir(),
            endpoint: None,
            api_key: None,
            timestamp_clock: TimestampClock::default(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
