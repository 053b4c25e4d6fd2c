pub mod sqlite;

pub use sqlite::{create_pool, is_unique_violation, migrate_local, migrate_server};
