//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, InferenceMode, StorageBackend};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 推理重试次数上限
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `BLOGFORGE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `BLOGFORGE_SERVER__PORT=8080`
/// - `BLOGFORGE_INFERENCE__REGION=eu-west-1`
/// - `BLOGFORGE_INFERENCE__API_KEY=...`
/// - `BLOGFORGE_STORAGE__BACKEND=http`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("inference.mode", "http")?
        .set_default("inference.region", "us-east-1")?
        .set_default("inference.model_id", "meta.llama2-13b-chat-v1")?
        .set_default("inference.timeout_secs", 300)?
        .set_default("inference.max_retries", 3)?
        .set_default("direct.max_gen_len", 512)?
        .set_default("direct.temperature", 0.5)?
        .set_default("direct.top_p", 0.9)?
        .set_default("staged.enabled", true)?
        .set_default("staged.max_tokens", 2048)?
        .set_default("staged.temperature", 0.5)?
        .set_default("staged.timeout_secs", 300)?
        .set_default("storage.backend", "file")?
        .set_default("storage.bucket", "aws_bedrock_course1")?
        .set_default("storage.key_prefix", "blog-output")?
        .set_default("storage.root_dir", "data/objects")?
        .set_default("storage.timestamp_clock", "utc")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: BLOGFORGE_STORAGE__BUCKET=my-bucket
    builder = builder.add_source(
        Environment::with_prefix("BLOGFORGE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.inference.mode == InferenceMode::Http && config.inference.model_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "Inference model id cannot be empty".to_string(),
        ));
    }

    if config.inference.max_retries > MAX_RETRIES_LIMIT {
        return Err(ConfigError::ValidationError(format!(
            "Inference max_retries cannot exceed {}",
            MAX_RETRIES_LIMIT
        )));
    }

    for (name, temperature) in [
        ("direct", config.direct.temperature),
        ("staged", config.staged.temperature),
    ] {
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ConfigError::ValidationError(format!(
                "{} temperature must be within [0, 1], got {}",
                name, temperature
            )));
        }
    }

    if !(config.direct.top_p > 0.0 && config.direct.top_p <= 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "direct top_p must be within (0, 1], got {}",
            config.direct.top_p
        )));
    }

    if config.storage.bucket.is_empty() {
        return Err(ConfigError::ValidationError(
            "Storage bucket cannot be empty".to_string(),
        ));
    }

    if config.storage.key_prefix.trim_matches('/').is_empty() {
        return Err(ConfigError::ValidationError(
            "Storage key prefix cannot be empty".to_string(),
        ));
    }

    if config.storage.backend == StorageBackend::Http && config.storage.endpoint.is_none() {
        return Err(ConfigError::ValidationError(
            "Storage endpoint is required for the http backend".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Inference Mode: {:?}", config.inference.mode);
    tracing::info!("Inference Endpoint: {}", config.inference.resolved_endpoint());
    tracing::info!("Inference Model: {}", config.inference.model_id);
    tracing::info!(
        "Inference API Key: {}",
        if config.inference.api_key.is_some() { "<set>" } else { "<none>" }
    );
    tracing::info!("Inference Timeout: {}s", config.inference.timeout_secs);
    tracing::info!("Inference Max Retries: {}", config.inference.max_retries);
    tracing::info!(
        "Direct: max_gen_len={}, temperature={}, top_p={}",
        config.direct.max_gen_len,
        config.direct.temperature,
        config.direct.top_p
    );
    tracing::info!("Staged Enabled: {}", config.staged.enabled);
    if config.staged.enabled {
        tracing::info!(
            "Staged: max_tokens={}, temperature={}, timeout={}s",
            config.staged.max_tokens,
            config.staged.temperature,
            config.staged.timeout_secs
        );
    }
    tracing::info!("Storage Backend: {:?}", config.storage.backend);
    tracing::info!(
        "Storage Target: {}/{}",
        config.storage.bucket,
        config.storage.key_prefix
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_model_id() {
        let mut config = AppConfig::default();
        config.inference.model_id = String::new();
        assert!(validate_config(&config).is_err());

        // fake 模式不需要模型 ID
        config.inference.mode = InferenceMode::Fake;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_of_retry_budget() {
        let mut config = AppConfig::default();
        config.inference.max_retries = 0;
        assert!(validate_config(&config).is_ok());

        config.inference.max_retries = MAX_RETRIES_LIMIT + 1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_out_of_range_sampling() {
        let mut config = AppConfig::default();
        config.staged.temperature = 1.5;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.direct.top_p = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_http_storage_without_endpoint() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Http;
        assert!(validate_config(&config).is_err());

        config.storage.endpoint = Some("http://localhost:9000".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_prefix() {
        let mut config = AppConfig::default();
        config.storage.key_prefix = "/".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blogforge.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[staged]
enabled = false

[storage]
backend = "memory"
bucket = "marketing-drafts"
timestamp_clock = "local"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert!(!config.staged.enabled);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.bucket, "marketing-drafts");
        assert_eq!(config.storage.key_prefix, "blog-output");
        assert_eq!(config.direct.max_gen_len, 512);
    }
}
