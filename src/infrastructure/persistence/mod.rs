//! Registry implementations.
//!
//! - [`MemoryUrlRegistry`] - in-process store, used when no database is configured
//! - [`PgUrlRegistry`] - PostgreSQL store with embedded migrations

pub mod memory_registry;
pub mod pg_registry;

pub use memory_registry::MemoryUrlRegistry;
pub use pg_registry::PgUrlRegistry;

/// Migrations embedded from `./migrations`, applied at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
