//! # memorial-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! Embedded values (owner and adopter snapshots, comments) live in JSONB
//! columns; image filenames in a `TEXT[]`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use memorial_db::{create_pool, run_migrations, DatabaseConfig, PgMemorialRepository};
//!
//! async fn example(url: String) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig { url, ..Default::default() }).await?;
//!     run_migrations(&pool).await?;
//!     let records = PgMemorialRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgMemorialRepository, PgUserRepository};
