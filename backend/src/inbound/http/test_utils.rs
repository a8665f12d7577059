//! Helpers for handler tests: mock stores wired into a real `HttpState`.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockable::MockClock;

use crate::domain::ports::{
    MockCoreFoodStore, MockMemberStore, MockPrStore, MockWeeklyLogStore, MockWorkoutStore,
    MockXpStore,
};

use super::state::{HttpState, StateStores};

/// Mock stores with no expectations; configure the ones a test exercises.
#[derive(Default)]
pub(crate) struct TestStores {
    pub prs: MockPrStore,
    pub workouts: MockWorkoutStore,
    pub xp: MockXpStore,
    pub weekly_logs: MockWeeklyLogStore,
    pub core_foods: MockCoreFoodStore,
    pub members: MockMemberStore,
}

/// The instant every handler test runs at.
pub(crate) fn test_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
}

/// Build handler state over the given mocks with a pinned clock.
pub(crate) fn http_state(stores: TestStores) -> HttpState {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(test_now);
    HttpState::new(
        StateStores {
            prs: Arc::new(stores.prs),
            workouts: Arc::new(stores.workouts),
            xp: Arc::new(stores.xp),
            weekly_logs: Arc::new(stores.weekly_logs),
            core_foods: Arc::new(stores.core_foods),
            members: Arc::new(stores.members),
        },
        Arc::new(clock),
        true,
    )
}
