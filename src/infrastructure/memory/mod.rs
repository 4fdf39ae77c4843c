//! Memory Layer - In-Memory Adapters
//!
//! 进程内对象存储，用于本地运行和测试

mod object_store;

pub use object_store::InMemoryObjectStore;
