pub mod postgres;
pub mod redis;
pub mod seed;

pub use self::postgres::{create_pool, run_migrations};
pub use self::redis::{create_redis_client, Cache, CacheKey, CacheWriterHandle};
pub use self::seed::{seed_database, seed_drinks};
