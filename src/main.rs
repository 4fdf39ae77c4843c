//! Blogforge - 博客内容生成服务
//!
//! 每个 HTTP 触发即一次调用：
//! 解析请求 → 分阶段生成（不可用或失败时直接生成）→ 归档 → 固定信封

use std::sync::Arc;

use blogforge::application::{
    ArticleArchiver, ContentPipeline, DirectGenerator, GenerationParams, InferenceEnginePort,
    InferenceError, ObjectStorePort, StagedPipeline,
};
use blogforge::config::{
    load_config, print_config, AppConfig, InferenceConfig, InferenceMode, StorageBackend,
};
use blogforge::infrastructure::adapters::{
    FakeInferenceClient, FileObjectStore, HttpInferenceClient, HttpInferenceClientConfig,
    HttpObjectStore, HttpObjectStoreConfig,
};
use blogforge::infrastructure::http::{AppState, HttpServer, ServerConfig};
use blogforge::infrastructure::memory::InMemoryObjectStore;

/// 按配置创建推理客户端
fn build_engine(
    config: &InferenceConfig,
    timeout_secs: u64,
) -> Result<Arc<dyn InferenceEnginePort>, InferenceError> {
    match config.mode {
        InferenceMode::Fake => Ok(Arc::new(FakeInferenceClient::with_defaults())),
        InferenceMode::Http => {
            let client_config =
                HttpInferenceClientConfig::new(config.resolved_endpoint(), config.model_id.clone())
                    .with_timeout(timeout_secs)
                    .with_max_retries(config.max_retries)
                    .with_api_key(config.api_key.clone());
            Ok(Arc::new(HttpInferenceClient::new(client_config)?))
        }
    }
}

/// 分阶段流水线；返回 Err 表示本进程内不可用
fn build_staged_pipeline(config: &AppConfig) -> Result<StagedPipeline, String> {
    if !config.staged.enabled {
        return Err("disabled by configuration".to_string());
    }

    let engine = build_engine(&config.inference, config.staged.timeout_secs)
        .map_err(|e| format!("inference client failed to initialize: {}", e))?;

    Ok(StagedPipeline::new(
        engine,
        GenerationParams {
            max_tokens: config.staged.max_tokens,
            temperature: config.staged.temperature,
            top_p: None,
        },
    ))
}

/// 按配置创建对象存储
async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ObjectStorePort>> {
    let storage = &config.storage;
    let store: Arc<dyn ObjectStorePort> = match storage.backend {
        StorageBackend::File => Arc::new(FileObjectStore::new(&storage.root_dir).await?),
        StorageBackend::Http => {
            let endpoint = storage
                .endpoint
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage.endpoint is required for the http backend"))?;
            Arc::new(HttpObjectStore::new(
                HttpObjectStoreConfig::new(endpoint).with_api_key(storage.api_key.clone()),
            )?)
        }
        StorageBackend::Memory => Arc::new(InMemoryObjectStore::new()),
    };
    Ok(store)
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},blogforge={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Blogforge - 博客内容生成服务");
    print_config(&config);

    // 直接生成是兜底路径，初始化失败即无法服务
    let direct_engine = build_engine(&config.inference, config.inference.timeout_secs)?;
    let direct = DirectGenerator::new(
        direct_engine,
        GenerationParams {
            max_tokens: config.direct.max_gen_len,
            temperature: config.direct.temperature,
            top_p: Some(config.direct.top_p),
        },
    );

    // 分阶段能力只在启动时确定一次
    let staged = build_staged_pipeline(&config);
    match &staged {
        Ok(_) => tracing::info!("Staged pipeline available"),
        Err(reason) => tracing::warn!(reason = %reason, "Staged pipeline unavailable; direct generation only"),
    }
    let pipeline = Arc::new(ContentPipeline::new(direct, staged));

    let store = build_store(&config).await?;
    let archiver = Arc::new(ArticleArchiver::new(
        store,
        config.storage.bucket.clone(),
        config.storage.key_prefix.clone(),
        config.storage.timestamp_clock,
    ));

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, AppState::new(pipeline, archiver));

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
