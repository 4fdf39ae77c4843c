//! Blog Context - ArchiveKey

use chrono::{DateTime, TimeZone};

/// 时间戳格式: YYYYMMDD-HHMMSS
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// 文章在对象存储中的 key
///
/// 形如 `blog-output/20240131-235959.txt`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveKey(String);

impl ArchiveKey {
    /// 以给定时间生成 key，时区由调用方决定
    pub fn at<Tz>(prefix: &str, time: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let prefix = prefix.trim_matches('/');
        Self(format!("{}/{}.txt", prefix, time.format(TIMESTAMP_FORMAT)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArchiveKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
