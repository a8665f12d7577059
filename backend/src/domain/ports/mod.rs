//! Store ports for the persistence boundary.
//!
//! Each aggregate gets one `async_trait` port; outbound adapters implement
//! them against PostgreSQL, while service tests substitute `mockall` mocks.
//! All ports share [`StoreError`] so adapters map driver failures once.

mod core_food_store;
mod member_store;
mod pr_store;
mod weekly_log_store;
mod workout_store;
mod xp_store;

pub use core_food_store::CoreFoodStore;
#[cfg(test)]
pub use core_food_store::MockCoreFoodStore;
pub use member_store::MemberStore;
#[cfg(test)]
pub use member_store::MockMemberStore;
pub use pr_store::PrStore;
#[cfg(test)]
pub use pr_store::MockPrStore;
pub use weekly_log_store::WeeklyLogStore;
#[cfg(test)]
pub use weekly_log_store::MockWeeklyLogStore;
pub use workout_store::WorkoutStore;
#[cfg(test)]
pub use workout_store::MockWorkoutStore;
pub use xp_store::XpStore;
#[cfg(test)]
pub use xp_store::MockXpStore;

/// Persistence failures surfaced by store adapters.
///
/// `Conflict` is reserved for unique-constraint violations the domain wants
/// to react to (duplicate check-ins, access-code collisions); everything
/// else is a connection or query failure the caller reports as a server
/// error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store connection could not be established or was lost.
    #[error("store connection failed: {message}")]
    Connection {
        /// Driver-provided failure description.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("store query failed: {message}")]
    Query {
        /// Driver-provided failure description.
        message: String,
    },
    /// A unique constraint rejected the write.
    #[error("store rejected a duplicate: {message}")]
    Conflict {
        /// Constraint or row description.
        message: String,
    },
}

impl StoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a conflict error with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

impl From<StoreError> for crate::domain::Error {
    fn from(value: StoreError) -> Self {
        crate::domain::Error::internal(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_accept_str() {
        assert_eq!(
            StoreError::connection("refused").to_string(),
            "store connection failed: refused"
        );
        assert_eq!(
            StoreError::query("syntax").to_string(),
            "store query failed: syntax"
        );
        assert_eq!(
            StoreError::conflict("duplicate key").to_string(),
            "store rejected a duplicate: duplicate key"
        );
    }

    #[test]
    fn store_errors_surface_as_internal_domain_errors() {
        let err: crate::domain::Error = StoreError::query("boom").into();
        assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);
    }
}
