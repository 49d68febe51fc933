//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::memory::InMemoryStore;
use crate::adapters::postgres::{
    PostgresAchievementCatalog, PostgresCommunityRepository, PostgresIncidentLogRepository,
    PostgresUserAchievementRepository, PostgresUserRepository,
};
use crate::application::handlers::community::{
    CreatePostHandler, LikePostHandler, ListPostsHandler, ListRepliesHandler, ReplyToPostHandler,
};
use crate::application::handlers::gamification::{
    EventDispatcher, GetUserProgressHandler, ListAchievementsHandler, ListUserAchievementsHandler,
    ProgressEvaluator, ResetProgressHandler, SimulateLogsHandler, SimulateStreakHandler,
    UnlockAchievementHandler, UnlockEngine, XpLedger,
};
use crate::application::handlers::incident::{
    ListIncidentsHandler, LogIncidentHandler, WeeklyAnalyticsHandler,
};
use crate::application::handlers::streak::IncrementStreakHandler;
use crate::application::handlers::user::{CreateUserHandler, GetProfileHandler};
use crate::ports::{
    AchievementCatalog, CommunityRepository, IncidentLogRepository, UserAchievementRepository,
    UserRepository,
};

/// Ports plus the shared gamification core.
///
/// Cloned per request; everything inside is behind an `Arc`. Handlers are
/// built on demand from these dependencies.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub logs: Arc<dyn IncidentLogRepository>,
    pub catalog: Arc<dyn AchievementCatalog>,
    pub unlocks: Arc<dyn UserAchievementRepository>,
    pub community: Arc<dyn CommunityRepository>,
    evaluator: Arc<ProgressEvaluator>,
    engine: Arc<UnlockEngine>,
    dispatcher: Arc<EventDispatcher>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        logs: Arc<dyn IncidentLogRepository>,
        catalog: Arc<dyn AchievementCatalog>,
        unlocks: Arc<dyn UserAchievementRepository>,
        community: Arc<dyn CommunityRepository>,
    ) -> Self {
        let evaluator = Arc::new(ProgressEvaluator::new(
            users.clone(),
            logs.clone(),
            community.clone(),
        ));
        let engine = Arc::new(UnlockEngine::new(catalog.clone(), unlocks.clone()));
        let dispatcher = Arc::new(EventDispatcher::new(evaluator.clone(), engine.clone()));
        Self {
            users,
            logs,
            catalog,
            unlocks,
            community,
            evaluator,
            engine,
            dispatcher,
        }
    }

    /// Every port served by one in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
        )
    }

    /// Every port served by PostgreSQL over a shared pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresIncidentLogRepository::new(pool.clone())),
            Arc::new(PostgresAchievementCatalog::new(pool.clone())),
            Arc::new(PostgresUserAchievementRepository::new(pool.clone())),
            Arc::new(PostgresCommunityRepository::new(pool)),
        )
    }

    pub fn dispatcher(&self) -> Arc<EventDispatcher> {
        self.dispatcher.clone()
    }

    // ── users ────────────────────────────────────────────────────────────────

    pub fn create_user_handler(&self) -> CreateUserHandler {
        CreateUserHandler::new(self.users.clone())
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.users.clone(), self.logs.clone())
    }

    // ── logs and streaks ─────────────────────────────────────────────────────

    pub fn log_incident_handler(&self) -> LogIncidentHandler {
        LogIncidentHandler::new(self.logs.clone(), self.dispatcher.clone())
    }

    pub fn list_incidents_handler(&self) -> ListIncidentsHandler {
        ListIncidentsHandler::new(self.logs.clone())
    }

    pub fn weekly_analytics_handler(&self) -> WeeklyAnalyticsHandler {
        WeeklyAnalyticsHandler::new(self.logs.clone())
    }

    pub fn increment_streak_handler(&self) -> IncrementStreakHandler {
        IncrementStreakHandler::new(self.users.clone(), self.dispatcher.clone())
    }

    // ── community ────────────────────────────────────────────────────────────

    pub fn create_post_handler(&self) -> CreatePostHandler {
        CreatePostHandler::new(self.users.clone(), self.community.clone(), self.dispatcher.clone())
    }

    pub fn like_post_handler(&self) -> LikePostHandler {
        LikePostHandler::new(self.users.clone(), self.community.clone(), self.dispatcher.clone())
    }

    pub fn reply_to_post_handler(&self) -> ReplyToPostHandler {
        ReplyToPostHandler::new(self.users.clone(), self.community.clone(), self.dispatcher.clone())
    }

    pub fn list_posts_handler(&self) -> ListPostsHandler {
        ListPostsHandler::new(self.community.clone())
    }

    pub fn list_replies_handler(&self) -> ListRepliesHandler {
        ListRepliesHandler::new(self.community.clone())
    }

    // ── gamification ─────────────────────────────────────────────────────────

    pub fn list_achievements_handler(&self) -> ListAchievementsHandler {
        ListAchievementsHandler::new(
            self.evaluator.clone(),
            self.catalog.clone(),
            self.unlocks.clone(),
        )
    }

    pub fn list_user_achievements_handler(&self) -> ListUserAchievementsHandler {
        ListUserAchievementsHandler::new(
            self.evaluator.clone(),
            self.catalog.clone(),
            self.unlocks.clone(),
        )
    }

    pub fn user_progress_handler(&self) -> GetUserProgressHandler {
        GetUserProgressHandler::new(
            self.evaluator.clone(),
            self.catalog.clone(),
            self.unlocks.clone(),
        )
    }

    // ── test harness ─────────────────────────────────────────────────────────

    pub fn xp_ledger(&self) -> XpLedger {
        XpLedger::new(self.users.clone())
    }

    pub fn simulate_streak_handler(&self) -> SimulateStreakHandler {
        SimulateStreakHandler::new(self.users.clone(), self.dispatcher.clone())
    }

    pub fn simulate_logs_handler(&self) -> SimulateLogsHandler {
        SimulateLogsHandler::new(self.users.clone(), self.logs.clone(), self.dispatcher.clone())
    }

    pub fn unlock_achievement_handler(&self) -> UnlockAchievementHandler {
        UnlockAchievementHandler::new(self.evaluator.clone(), self.engine.clone())
    }

    pub fn reset_progress_handler(&self) -> ResetProgressHandler {
        ResetProgressHandler::new(self.users.clone())
    }
}
