pub mod config_service;
pub mod dto;
pub mod history_repository;
pub mod logging;
pub mod memory_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::history_repository::ChatHistoryRepository;
pub use crate::logging::{LogTarget, init_logging};
pub use crate::memory_repository::UserMemoryRepository;
pub use crate::paths::DevconPaths;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
