//! Blog Context - GeneratedArticle

use serde::{Deserialize, Serialize};

const META_DESCRIPTION_LABEL: &str = "Meta Description:";
const CTA_LABEL: &str = "CTA:";

/// 最终生成的文章文本
///
/// 正文、meta description 与 CTA 都在同一段文本里，原样写入存储
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArticle(String);

impl GeneratedArticle {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 没有生成任何内容（空白也算空）
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// `Meta Description:` 段落内容
    pub fn meta_description(&self) -> Option<&str> {
        self.section(META_DESCRIPTION_LABEL)
    }

    /// `CTA:` 段落内容
    pub fn call_to_action(&self) -> Option<&str> {
        self.section(CTA_LABEL)
    }

    /// 取最后一次出现的标签之后、下一个标签之前的文本
    fn section(&self, label: &str) -> Option<&str> {
        let start = self.0.rfind(label)? + label.len();
        let rest = &self.0[start..];
        let end = [META_DESCRIPTION_LABEL, CTA_LABEL]
            .iter()
            .filter(|other| **other != label)
            .filter_map(|other| rest.find(other))
            .min()
            .unwrap_or(rest.len());

        let value = rest[..end].trim().trim_matches('*').trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

impl std::fmt::Display for GeneratedArticle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDITED: &str = "# Cutting Cloud Costs\n\nBody text.\n\n\
        Meta Description: Practical ways to trim your cloud bill.\n\n\
        CTA: Book a free cost review today.";

    #[test]
    fn test_sections_are_extracted() {
        let article = GeneratedArticle::new(EDITED);
        assert_eq!(
            article.meta_description(),
            Some("Practical ways to trim your cloud bill.")
        );
        assert_eq!(article.call_to_action(), Some("Book a free cost review today."));
    }

    #[test]
    fn test_missing_sections() {
        let article = GeneratedArticle::new("Just a short draft.");
        assert_eq!(article.meta_description(), None);
        assert_eq!(article.call_to_action(), None);
    }

    #[test]
    fn test_blank_is_empty() {
        assert!(GeneratedArticle::empty().is_empty());
        assert!(GeneratedArticle::new("  \n\t").is_empty());
        assert!(!GeneratedArticle::new("x").is_empty());
    }
}
