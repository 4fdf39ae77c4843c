//! Blog Context - GenerationRequest

use serde::{Deserialize, Serialize};

/// 默认目标字数
pub const DEFAULT_TARGET_WORD_COUNT: u32 = 700;

const DEFAULT_AUDIENCE: &str = "a general business audience";
const DEFAULT_TONE: &str = "helpful, expert, and approachable";
const DEFAULT_BRAND: &str = "our brand";

/// 一次博客生成任务
///
/// 每次调用创建一次，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    topic: String,
    brand_name: Option<String>,
    target_audience: Option<String>,
    tone: Option<String>,
    seo_keywords: Option<Vec<String>>,
    target_word_count: u32,
}

impl GenerationRequest {
    /// 只带主题的请求，其余字段取默认值
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            brand_name: None,
            target_audience: None,
            tone: None,
            seo_keywords: None,
            target_word_count: DEFAULT_TARGET_WORD_COUNT,
        }
    }

    pub fn with_brand_name(mut self, brand_name: Option<String>) -> Self {
        self.brand_name = brand_name;
        self
    }

    pub fn with_target_audience(mut self, target_audience: Option<String>) -> Self {
        self.target_audience = target_audience;
        self
    }

    pub fn with_tone(mut self, tone: Option<String>) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_seo_keywords(mut self, seo_keywords: Option<Vec<String>>) -> Self {
        self.seo_keywords = seo_keywords;
        self
    }

    pub fn with_target_word_count(mut self, target_word_count: u32) -> Self {
        self.target_word_count = target_word_count;
        self
    }

    // Getters
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn brand_name(&self) -> Option<&str> {
        self.brand_name.as_deref()
    }

    pub fn target_audience(&self) -> Option<&str> {
        self.target_audience.as_deref()
    }

    pub fn tone(&self) -> Option<&str> {
        self.tone.as_deref()
    }

    pub fn seo_keywords(&self) -> Option<&[String]> {
        self.seo_keywords.as_deref()
    }

    pub fn target_word_count(&self) -> u32 {
        self.target_word_count
    }

    /// 受众描述，未提供时使用通用商业受众
    pub fn audience_or_default(&self) -> &str {
        non_empty(self.target_audience.as_deref()).unwrap_or(DEFAULT_AUDIENCE)
    }

    /// 语气描述
    pub fn tone_or_default(&self) -> &str {
        non_empty(self.tone.as_deref()).unwrap_or(DEFAULT_TONE)
    }

    /// 品牌名
    pub fn brand_or_default(&self) -> &str {
        non_empty(self.brand_name.as_deref()).unwrap_or(DEFAULT_BRAND)
    }

    /// 以逗号连接的 SEO 关键词；没有关键词时返回 None
    pub fn joined_keywords(&self) -> Option<String> {
        self.seo_keywords
            .as_ref()
            .filter(|keywords| !keywords.is_empty())
            .map(|keywords| keywords.join(", "))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = GenerationRequest::new("cloud cost optimization");
        assert_eq!(request.topic(), "cloud cost optimization");
        assert_eq!(request.target_word_count(), 700);
        assert_eq!(request.audience_or_default(), "a general business audience");
        assert_eq!(request.tone_or_default(), "helpful, expert, and approachable");
        assert_eq!(request.brand_or_default(), "our brand");
        assert_eq!(request.joined_keywords(), None);
    }

    #[test]
    fn test_supplied_fields_win() {
        let request = GenerationRequest::new("rust adoption")
            .with_brand_name(Some("Ferris Labs".to_string()))
            .with_target_audience(Some("CTOs".to_string()))
            .with_tone(Some("candid".to_string()))
            .with_seo_keywords(Some(vec!["rust".to_string(), "memory safety".to_string()]))
            .with_target_word_count(1200);

        assert_eq!(request.brand_or_default(), "Ferris Labs");
        assert_eq!(request.audience_or_default(), "CTOs");
        assert_eq!(request.tone_or_default(), "candid");
        assert_eq!(request.joined_keywords().as_deref(), Some("rust, memory safety"));
        assert_eq!(request.target_word_count(), 1200);
    }

    #[test]
    fn test_empty_values_fall_back() {
        let request = GenerationRequest::new("t")
            .with_tone(Some(String::new()))
            .with_seo_keywords(Some(Vec::new()));
        assert_eq!(request.tone_or_default(), "helpful, expert, and approachable");
        assert_eq!(request.joined_keywords(), None);
    }
}
