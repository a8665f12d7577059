//! Port abstraction for dashboard member persistence.

use async_trait::async_trait;

use crate::domain::members::{Member, NewMember};

use super::StoreError;

/// Store of dashboard members and their unique access codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Insert a new member.
    ///
    /// Returns [`StoreError::Conflict`] when the access code collides with
    /// an existing one, so the caller can regenerate and retry.
    async fn insert(&self, member: NewMember) -> Result<Member, StoreError>;

    /// Look up a member by internal user id.
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Member>, StoreError>;

    /// Resolve an externally presented access code.
    async fn find_by_code(&self, access_code: &str) -> Result<Option<Member>, StoreError>;
}
