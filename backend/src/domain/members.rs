//! Dashboard members and access-code issuance.
//!
//! An access code is the only credential a member presents: an opaque
//! URL-safe token mapping to the internal user id. Codes are immutable once
//! issued. Uniqueness is enforced by the store's unique index; generation
//! draws from a large enough space that a collision retry is a rarity, not
//! a loop.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use mockable::Clock;
use rand::RngCore;
use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::ports::{MemberStore, StoreError};

/// Random bytes backing one access code (22 characters once encoded).
const ACCESS_CODE_BYTES: usize = 16;

/// Attempts before giving up on a colliding access code.
const CODE_RETRY_LIMIT: u32 = 3;

/// A dashboard member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Internal user identifier.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Unique opaque access code.
    pub access_code: String,
    /// When the member was enrolled.
    pub created_at: DateTime<Utc>,
}

/// A member awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    /// Internal user identifier.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Freshly generated access code.
    pub access_code: String,
    /// Enrollment timestamp.
    pub created_at: DateTime<Utc>,
}

/// Generate a fresh access code from 16 random bytes, URL-safe base64
/// encoded without padding.
#[must_use]
pub fn generate_access_code() -> String {
    let mut bytes = [0u8; ACCESS_CODE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Domain service for enrolling and resolving dashboard members.
#[derive(Clone)]
pub struct MemberService {
    members: Arc<dyn MemberStore>,
    clock: Arc<dyn Clock>,
}

impl MemberService {
    /// Create a new service.
    pub fn new(members: Arc<dyn MemberStore>, clock: Arc<dyn Clock>) -> Self {
        Self { members, clock }
    }

    /// Enroll a user as a dashboard member, issuing an access code.
    ///
    /// Enrolling an already-enrolled user returns the existing member
    /// unchanged; codes are never reissued.
    pub async fn enroll(&self, user_id: &str, username: &str) -> Result<Member, Error> {
        if let Some(existing) = self.members.find_by_user(user_id).await? {
            return Ok(existing);
        }

        for attempt in 0..CODE_RETRY_LIMIT {
            let candidate = NewMember {
                user_id: user_id.to_owned(),
                username: username.to_owned(),
                access_code: generate_access_code(),
                created_at: self.clock.utc(),
            };
            match self.members.insert(candidate).await {
                Ok(member) => {
                    info!(user_id, "enrolled dashboard member");
                    return Ok(member);
                }
                Err(StoreError::Conflict { .. }) => {
                    // Either the code collided or a concurrent enroll won;
                    // re-check the user before drawing a new code.
                    if let Some(existing) = self.members.find_by_user(user_id).await? {
                        return Ok(existing);
                    }
                    warn!(user_id, attempt, "access code collision, regenerating");
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(Error::internal("could not issue a unique access code"))
    }

    /// Resolve an access code to its member.
    pub async fn resolve(&self, access_code: &str) -> Result<Member, Error> {
        self.members
            .find_by_code(access_code)
            .await?
            .ok_or_else(|| Error::not_found("unknown dashboard code"))
    }

    /// Look up a member by internal user id.
    pub async fn find_by_user(&self, user_id: &str) -> Result<Option<Member>, Error> {
        Ok(self.members.find_by_user(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockMemberStore;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn fixed_clock() -> Arc<mockable::MockClock> {
        let mut clock = mockable::MockClock::new();
        clock
            .expect_utc()
            .returning(|| Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap());
        Arc::new(clock)
    }

    fn member_from(new: &NewMember) -> Member {
        Member {
            user_id: new.user_id.clone(),
            username: new.username.clone(),
            access_code: new.access_code.clone(),
            created_at: new.created_at,
        }
    }

    #[test]
    fn generated_codes_are_distinct_and_url_safe() {
        let mut seen = HashSet::new();
        for _ in 0..64 {
            let code = generate_access_code();
            assert_eq!(code.len(), 22);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            );
            assert!(seen.insert(code));
        }
    }

    #[actix_rt::test]
    async fn enroll_issues_a_code_once() {
        let mut members = MockMemberStore::new();
        members.expect_find_by_user().returning(|_| Ok(None));
        members.expect_insert().returning(|new| Ok(member_from(&new)));

        let service = MemberService::new(Arc::new(members), fixed_clock());
        let member = service.enroll("u1", "ada").await.unwrap();
        assert_eq!(member.user_id, "u1");
        assert_eq!(member.access_code.len(), 22);
    }

    #[actix_rt::test]
    async fn enroll_is_idempotent_per_user() {
        let existing = Member {
            user_id: "u1".to_owned(),
            username: "ada".to_owned(),
            access_code: "existing-code".to_owned(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        };
        let mut members = MockMemberStore::new();
        let found = existing.clone();
        members
            .expect_find_by_user()
            .returning(move |_| Ok(Some(found.clone())));
        members.expect_insert().times(0);

        let service = MemberService::new(Arc::new(members), fixed_clock());
        let member = service.enroll("u1", "ada").await.unwrap();
        assert_eq!(member.access_code, "existing-code");
    }

    #[actix_rt::test]
    async fn enroll_retries_on_code_collision() {
        let mut members = MockMemberStore::new();
        members.expect_find_by_user().returning(|_| Ok(None));
        let mut calls = 0;
        members.expect_insert().times(2).returning(move |new| {
            calls += 1;
            if calls == 1 {
                Err(StoreError::conflict("access_code"))
            } else {
                Ok(member_from(&new))
            }
        });

        let service = MemberService::new(Arc::new(members), fixed_clock());
        let member = service.enroll("u1", "ada").await.unwrap();
        assert_eq!(member.user_id, "u1");
    }

    #[actix_rt::test]
    async fn unknown_code_is_not_found() {
        let mut members = MockMemberStore::new();
        members.expect_find_by_code().returning(|_| Ok(None));

        let service = MemberService::new(Arc::new(members), fixed_clock());
        let err = service.resolve("nope").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
