//! PR logging orchestration.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::game::{GameService, XP_NEW_PR};
use crate::domain::ports::PrStore;
use crate::domain::{Error, one_rep_max};

use super::{LoggedAttempt, NewPrRecord, PrAttempt, PrRecord};

/// Domain service for logging attempts and querying PR history.
///
/// History is append-only: every attempt is persisted whether or not it
/// sets a new PR. PR evaluation compares within one pool only, so weighted
/// attempts never compete against bodyweight ones.
#[derive(Clone)]
pub struct TrainingService {
    prs: Arc<dyn PrStore>,
    game: GameService,
    clock: Arc<dyn Clock>,
}

impl TrainingService {
    /// Create a new service.
    pub fn new(prs: Arc<dyn PrStore>, game: GameService, clock: Arc<dyn Clock>) -> Self {
        Self { prs, game, clock }
    }

    /// Log an attempt, evaluate it against the prior best, and award the
    /// PR bonus when it sets a new record.
    pub async fn log_attempt(&self, attempt: PrAttempt) -> Result<LoggedAttempt, Error> {
        let PrAttempt {
            user_id,
            username,
            exercise,
            weight,
            reps,
        } = attempt;
        let estimated = one_rep_max::estimate(weight, reps);
        let bodyweight = one_rep_max::is_bodyweight(weight);
        let prior_best = self.prs.best(&user_id, &exercise, bodyweight).await?;
        let is_new_pr = prior_best.is_none_or(|best| estimated > best.estimated_one_rep_max);

        let record = self
            .prs
            .append(NewPrRecord {
                user_id,
                username,
                exercise,
                weight,
                reps,
                estimated_one_rep_max: estimated,
                recorded_at: self.clock.utc(),
            })
            .await?;

        let xp_awarded = if is_new_pr {
            self.game
                .award_bonus(&record.user_id, &record.username, XP_NEW_PR, "pr")
                .await?
        } else {
            0
        };

        info!(
            user_id = %record.user_id,
            exercise = %record.exercise,
            estimated_one_rep_max = estimated,
            is_new_pr,
            "logged attempt"
        );
        Ok(LoggedAttempt {
            record,
            is_new_pr,
            xp_awarded,
        })
    }

    /// Attempts for a user, newest first, optionally filtered by exercise.
    pub async fn history(
        &self,
        user_id: &str,
        exercise: Option<&str>,
        limit: i64,
    ) -> Result<Vec<PrRecord>, Error> {
        Ok(self
            .prs
            .history(user_id, exercise.map(ToOwned::to_owned), limit)
            .await?)
    }

    /// Full history for one exercise in chronological order.
    pub async fn history_chronological(
        &self,
        user_id: &str,
        exercise: &str,
    ) -> Result<Vec<PrRecord>, Error> {
        Ok(self.prs.history_chronological(user_id, exercise).await?)
    }

    /// Best attempt for (user, exercise) across both pools.
    pub async fn best(&self, user_id: &str, exercise: &str) -> Result<PrRecord, Error> {
        self.prs
            .best_overall(user_id, exercise)
            .await?
            .ok_or_else(|| Error::not_found("no attempts logged for that exercise"))
    }

    /// Best attempt per exercise the user has ever logged.
    pub async fn best_lifts(&self, user_id: &str) -> Result<Vec<PrRecord>, Error> {
        let mut bests = Vec::new();
        for exercise in self.prs.logged_exercises(user_id).await? {
            if let Some(best) = self.prs.best_overall(user_id, &exercise).await? {
                bests.push(best);
            }
        }
        Ok(bests)
    }
}
