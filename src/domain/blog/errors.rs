//! Blog Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Missing required field: blog_topic")]
    MissingTopic,

    #[error("Malformed event body: {0}")]
    MalformedBody(String),
}
