//! Workout plan and completion orchestration.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::Error;
use crate::domain::game::{GameService, XP_WORKOUT_COMPLETE};
use crate::domain::ports::{MemberStore, WorkoutStore};

use super::{
    CompletionOutcome, DeloadStatus, PlanExercise, PlannedWorkout, is_stale, needs_deload,
};

/// Username recorded on XP accounts created by a completion before the user
/// was enrolled as a dashboard member.
const UNKNOWN_USERNAME: &str = "unknown";

/// Domain service for workout plans and the deload counter.
///
/// Staleness is evaluated lazily at completion time by comparing the stored
/// last-completion timestamp with the injected clock; there are no timers or
/// background tasks.
#[derive(Clone)]
pub struct WorkoutService {
    workouts: Arc<dyn WorkoutStore>,
    members: Arc<dyn MemberStore>,
    game: GameService,
    clock: Arc<dyn Clock>,
}

impl WorkoutService {
    /// Create a new service.
    pub fn new(
        workouts: Arc<dyn WorkoutStore>,
        members: Arc<dyn MemberStore>,
        game: GameService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            workouts,
            members,
            game,
            clock,
        }
    }

    /// Replace the plan for (user, letter).
    pub async fn save_plan(
        &self,
        user_id: &str,
        workout_letter: &str,
        exercises: Vec<PlanExercise>,
    ) -> Result<(), Error> {
        self.workouts
            .replace_plan(user_id, workout_letter, exercises)
            .await?;
        info!(user_id, workout_letter, "replaced workout plan");
        Ok(())
    }

    /// Ordered plan for one letter; not-found when no plan exists.
    pub async fn plan(
        &self,
        user_id: &str,
        workout_letter: &str,
    ) -> Result<Vec<PlanExercise>, Error> {
        let exercises = self.workouts.plan(user_id, workout_letter).await?;
        if exercises.is_empty() {
            return Err(Error::not_found("no plan for that workout letter"));
        }
        Ok(exercises)
    }

    /// Every plan the user has, grouped by letter.
    pub async fn plans(&self, user_id: &str) -> Result<Vec<PlannedWorkout>, Error> {
        Ok(self.workouts.plans(user_id).await?)
    }

    /// Mark a workout complete, applying the deload rollover first.
    ///
    /// If the most recent completion across any of the user's letters is
    /// stale, every counter resets to zero before this completion counts,
    /// so the triggering letter lands on 1 rather than continuing an
    /// abandoned cycle.
    pub async fn complete(
        &self,
        user_id: &str,
        workout_letter: &str,
    ) -> Result<CompletionOutcome, Error> {
        let now = self.clock.utc();
        if let Some(last) = self.workouts.latest_completion_at(user_id).await? {
            if is_stale(last, now) {
                info!(user_id, "completion gap exceeded, resetting counters");
                self.workouts.reset_all_counts(user_id).await?;
            }
        }
        let completion_count = self
            .workouts
            .increment_count(user_id, workout_letter, now)
            .await?;

        let username = self
            .members
            .find_by_user(user_id)
            .await?
            .map_or_else(|| UNKNOWN_USERNAME.to_owned(), |member| member.username);
        let xp_awarded = self
            .game
            .award_bonus(user_id, &username, XP_WORKOUT_COMPLETE, "workout_complete")
            .await?;

        Ok(CompletionOutcome {
            workout_letter: workout_letter.to_owned(),
            completion_count,
            needs_deload: needs_deload(completion_count),
            xp_awarded,
        })
    }

    /// Deload status for every letter the user has completed.
    pub async fn deload_status(&self, user_id: &str) -> Result<Vec<DeloadStatus>, Error> {
        let completions = self.workouts.completions(user_id).await?;
        Ok(completions.into_iter().map(DeloadStatus::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::members::Member;
    use crate::domain::ports::{
        MockMemberStore, MockWeeklyLogStore, MockWorkoutStore, MockXpStore,
    };
    use crate::domain::workouts::CompletionState;
    use chrono::{Duration, TimeZone, Utc};
    use mockable::MockClock;

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
    }

    fn fixed_clock() -> Arc<MockClock> {
        let mut clock = MockClock::new();
        clock.expect_utc().returning(now);
        Arc::new(clock)
    }

    fn game(xp: MockXpStore, enabled: bool) -> GameService {
        GameService::new(
            Arc::new(xp),
            Arc::new(MockWeeklyLogStore::new()),
            fixed_clock(),
            enabled,
        )
    }

    fn known_member(members: &mut MockMemberStore) {
        members.expect_find_by_user().returning(|user_id| {
            Ok(Some(Member {
                user_id: user_id.to_owned(),
                username: "ada".to_owned(),
                access_code: "code".to_owned(),
                created_at: now(),
            }))
        });
    }

    #[actix_rt::test]
    async fn completion_within_window_increments_without_reset() {
        let mut workouts = MockWorkoutStore::new();
        workouts
            .expect_latest_completion_at()
            .returning(|_| Ok(Some(now() - Duration::days(2))));
        workouts.expect_reset_all_counts().times(0);
        workouts
            .expect_increment_count()
            .returning(|_, _, _| Ok(6));
        let mut members = MockMemberStore::new();
        known_member(&mut members);
        let mut xp = MockXpStore::new();
        xp.expect_add_xp().returning(|_, _, amount, _| Ok(amount));

        let service = WorkoutService::new(
            Arc::new(workouts),
            Arc::new(members),
            game(xp, true),
            fixed_clock(),
        );
        let outcome = service.complete("u1", "A").await.unwrap();

        assert_eq!(outcome.completion_count, 6);
        assert!(outcome.needs_deload);
        assert_eq!(outcome.xp_awarded, XP_WORKOUT_COMPLETE);
    }

    #[actix_rt::test]
    async fn stale_gap_resets_counters_before_incrementing() {
        let mut workouts = MockWorkoutStore::new();
        workouts
            .expect_latest_completion_at()
            .returning(|_| Ok(Some(now() - Duration::days(8))));
        workouts
            .expect_reset_all_counts()
            .times(1)
            .returning(|_| Ok(()));
        workouts
            .expect_increment_count()
            .returning(|_, _, _| Ok(1));
        let mut members = MockMemberStore::new();
        known_member(&mut members);
        let mut xp = MockXpStore::new();
        xp.expect_add_xp().returning(|_, _, amount, _| Ok(amount));

        let service = WorkoutService::new(
            Arc::new(workouts),
            Arc::new(members),
            game(xp, true),
            fixed_clock(),
        );
        let outcome = service.complete("u1", "A").await.unwrap();

        assert_eq!(outcome.completion_count, 1);
        assert!(!outcome.needs_deload);
    }

    #[actix_rt::test]
    async fn first_ever_completion_skips_the_staleness_check() {
        let mut workouts = MockWorkoutStore::new();
        workouts
            .expect_latest_completion_at()
            .returning(|_| Ok(None));
        workouts.expect_reset_all_counts().times(0);
        workouts
            .expect_increment_count()
            .returning(|_, _, _| Ok(1));
        let mut members = MockMemberStore::new();
        members.expect_find_by_user().returning(|_| Ok(None));

        let service = WorkoutService::new(
            Arc::new(workouts),
            Arc::new(members),
            game(MockXpStore::new(), false),
            fixed_clock(),
        );
        let outcome = service.complete("u1", "B").await.unwrap();

        assert_eq!(outcome.completion_count, 1);
        assert_eq!(outcome.xp_awarded, 0);
    }

    #[actix_rt::test]
    async fn empty_plan_reads_as_not_found() {
        let mut workouts = MockWorkoutStore::new();
        workouts.expect_plan().returning(|_, _| Ok(Vec::new()));

        let service = WorkoutService::new(
            Arc::new(workouts),
            Arc::new(MockMemberStore::new()),
            game(MockXpStore::new(), true),
            fixed_clock(),
        );
        let err = service.plan("u1", "Z").await.unwrap_err();
        assert_eq!(err.code(), crate::domain::ErrorCode::NotFound);
    }

    #[actix_rt::test]
    async fn deload_status_flags_counters_at_threshold() {
        let mut workouts = MockWorkoutStore::new();
        workouts.expect_completions().returning(|_| {
            Ok(vec![
                CompletionState {
                    workout_letter: "A".to_owned(),
                    completion_count: 6,
                    last_completed_at: Some(now()),
                },
                CompletionState {
                    workout_letter: "B".to_owned(),
                    completion_count: 3,
                    last_completed_at: None,
                },
            ])
        });

        let service = WorkoutService::new(
            Arc::new(workouts),
            Arc::new(MockMemberStore::new()),
            game(MockXpStore::new(), true),
            fixed_clock(),
        );
        let status = service.deload_status("u1").await.unwrap();

        assert!(status[0].needs_deload);
        assert!(!status[1].needs_deload);
    }
}
