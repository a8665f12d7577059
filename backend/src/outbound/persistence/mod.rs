//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain store ports, backed by PostgreSQL
//! via `diesel-async` with `bb8` connection pooling.
//!
//! The adapters stay thin: they translate between Diesel row models and
//! domain types and map driver failures onto [`StoreError`]
//! (`crate::domain::ports::StoreError`); no business logic lives here. Row
//! structs (`models.rs`) and the `diesel::table!` definitions (`schema.rs`)
//! are internal implementation details, never exposed to the domain layer.

mod diesel_core_food_store;
mod diesel_member_store;
mod diesel_pr_store;
mod diesel_weekly_log_store;
mod diesel_workout_store;
mod diesel_xp_store;
mod errors;
mod models;
mod pool;
mod schema;

pub use diesel_core_food_store::DieselCoreFoodStore;
pub use diesel_member_store::DieselMemberStore;
pub use diesel_pr_store::DieselPrStore;
pub use diesel_weekly_log_store::DieselWeeklyLogStore;
pub use diesel_workout_store::DieselWorkoutStore;
pub use diesel_xp_store::DieselXpStore;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply any pending migrations over a short-lived synchronous connection.
///
/// Diesel's migration harness is synchronous; callers on an async runtime
/// should wrap this in `spawn_blocking`.
pub fn run_pending_migrations(database_url: &str) -> Result<(), PoolError> {
    let mut conn =
        PgConnection::establish(database_url).map_err(|e| PoolError::build(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PoolError::build(e.to_string()))?;
    Ok(())
}
