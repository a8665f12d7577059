//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they depend on
//! domain services only and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::game::GameService;
use crate::domain::members::MemberService;
use crate::domain::nutrition::NutritionService;
use crate::domain::ports::{
    CoreFoodStore, MemberStore, PrStore, WeeklyLogStore, WorkoutStore, XpStore,
};
use crate::domain::training::TrainingService;
use crate::domain::workouts::WorkoutService;

/// Parameter object bundling the store implementations handlers run on.
#[derive(Clone)]
pub struct StateStores {
    /// PR history store.
    pub prs: Arc<dyn PrStore>,
    /// Workout plan and counter store.
    pub workouts: Arc<dyn WorkoutStore>,
    /// XP account store.
    pub xp: Arc<dyn XpStore>,
    /// Weekly-log store.
    pub weekly_logs: Arc<dyn WeeklyLogStore>,
    /// Core-food check-in store.
    pub core_foods: Arc<dyn CoreFoodStore>,
    /// Dashboard member store.
    pub members: Arc<dyn MemberStore>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// PR logging and queries.
    pub training: TrainingService,
    /// Plans, completions, deload status.
    pub workouts: WorkoutService,
    /// XP awards and weekly logs.
    pub game: GameService,
    /// Core-food check-ins.
    pub nutrition: NutritionService,
    /// Member enrollment and code resolution.
    pub members: MemberService,
}

impl HttpState {
    /// Wire the domain services over a set of stores.
    #[must_use]
    pub fn new(stores: StateStores, clock: Arc<dyn Clock>, xp_enabled: bool) -> Self {
        let game = GameService::new(
            stores.xp,
            stores.weekly_logs,
            Arc::clone(&clock),
            xp_enabled,
        );
        let members = MemberService::new(Arc::clone(&stores.members), Arc::clone(&clock));
        Self {
            training: TrainingService::new(stores.prs, game.clone(), Arc::clone(&clock)),
            workouts: WorkoutService::new(
                stores.workouts,
                stores.members,
                game.clone(),
                Arc::clone(&clock),
            ),
            game,
            nutrition: NutritionService::new(stores.core_foods, clock),
            members,
        }
    }
}
