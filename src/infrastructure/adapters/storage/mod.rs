//! Storage Adapter - 对象存储实现

mod file_object_store;
mod http_object_store;

pub use file_object_store::FileObjectStore;
pub use http_object_store::{HttpObjectStore, HttpObjectStoreConfig};
