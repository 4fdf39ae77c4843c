//! Data Transfer Objects
//!
//! 触发事件的解析与固定响应信封

use serde::{Deserialize, Serialize};

use crate::domain::blog::{BlogError, GenerationRequest, DEFAULT_TARGET_WORD_COUNT};

/// 固定的完成信息
pub const COMPLETION_MESSAGE: &str = "Blog generation is completed";

// ============================================================================
// 触发事件
// ============================================================================

/// API 网关风格的事件：`{"body": "<json text>"}`
#[derive(Debug, Deserialize)]
pub struct TriggerEvent {
    #[serde(default)]
    pub body: Option<String>,
}

impl TriggerEvent {
    /// 解析事件外壳，取出 body 文本
    pub fn parse(raw: &str) -> Result<String, BlogError> {
        let event: TriggerEvent =
            serde_json::from_str(raw).map_err(|e| BlogError::MalformedBody(e.to_string()))?;
        event
            .body
            .ok_or_else(|| BlogError::MalformedBody("event has no body".to_string()))
    }
}

/// 请求体字段
#[derive(Debug, Deserialize)]
pub struct BlogRequestBody {
    #[serde(default)]
    pub blog_topic: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub seo_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub target_word_count: Option<u32>,
}

impl BlogRequestBody {
    /// 解析 JSON 请求体；只校验 blog_topic 是否存在
    pub fn parse(raw: &str) -> Result<GenerationRequest, BlogError> {
        let body: BlogRequestBody =
            serde_json::from_str(raw).map_err(|e| BlogError::MalformedBody(e.to_string()))?;
        body.into_request()
    }

    pub fn into_request(self) -> Result<GenerationRequest, BlogError> {
        let topic = self.blog_topic.ok_or(BlogError::MissingTopic)?;

        Ok(GenerationRequest::new(topic)
            .with_brand_name(self.brand_name)
            .with_target_audience(self.target_audience)
            .with_tone(self.tone)
            .with_seo_keywords(self.seo_keywords)
            .with_target_word_count(
                self.target_word_count
                    .unwrap_or(DEFAULT_TARGET_WORD_COUNT),
            ))
    }
}

// ============================================================================
// 响应
// ============================================================================

/// 调用结果信封，与生成/归档是否成功无关
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn completed() -> Self {
        Self {
            status_code: 200,
            body: COMPLETION_MESSAGE.to_string(),
        }
    }
}
