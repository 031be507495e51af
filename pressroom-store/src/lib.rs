pub mod app_config;
pub mod redis_repo;
pub mod memory;

pub use app_config::Config;
pub use redis_repo::RedisClient;
pub use memory::InMemoryStore;
