//! End-to-end gamification scenarios against the in-memory store.
//!
//! These drive the public handlers the same way the HTTP layer does:
//! award XP, log incidents, evaluate, and check that unlocks and XP credits
//! happen exactly once.

use std::sync::Arc;

use junkstop::adapters::memory::InMemoryStore;
use junkstop::application::handlers::gamification::{
    AwardXpCommand, EvaluateCommand, EventDispatcher, ProgressEvaluator, UnlockEngine, XpLedger,
};
use junkstop::application::handlers::incident::{LogIncidentCommand, LogIncidentHandler};
use junkstop::domain::foundation::{AchievementId, UserId};
use junkstop::domain::gamification::{AchievementDefinition, BadgeCategory, UnlockCondition};
use junkstop::domain::incident::{IncidentLog, NewIncident};
use junkstop::domain::user::User;
use junkstop::ports::{
    AchievementCatalog, IncidentLogRepository, UserAchievementRepository, UserRepository,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct World {
    store: Arc<InMemoryStore>,
    dispatcher: Arc<EventDispatcher>,
    user: User,
}

fn ten_logs_badge() -> AchievementDefinition {
    AchievementDefinition::new(
        AchievementId::new("ten_logs").unwrap(),
        BadgeCategory::Milestone,
        "Transparency",
        "Log 10 junk food items",
        UnlockCondition::TotalLogs(10),
        60,
        0,
    )
    .unwrap()
}

async fn world() -> World {
    let store = Arc::new(InMemoryStore::new());
    AchievementCatalog::upsert(store.as_ref(), &ten_logs_badge())
        .await
        .unwrap();

    let user = User::new(UserId::new(), "scenario", "scenario@example.com").unwrap();
    UserRepository::create(store.as_ref(), &user).await.unwrap();

    let evaluator = Arc::new(ProgressEvaluator::new(
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    let engine = Arc::new(UnlockEngine::new(store.clone(), store.clone()));
    let dispatcher = Arc::new(EventDispatcher::new(evaluator, engine));

    World {
        store,
        dispatcher,
        user,
    }
}

fn incident() -> NewIncident {
    NewIncident {
        food_type: "Donut".to_string(),
        guilt_rating: 6,
        regret_rating: 5,
        estimated_cost: 2.5,
        calories: 300,
        location: None,
    }
}

fn manual(user_id: UserId) -> EvaluateCommand {
    EvaluateCommand {
        user_id,
        event_type: "manual".to_string(),
        payload: None,
    }
}

async fn balance(world: &World) -> (i64, u32) {
    let user = UserRepository::find_by_id(world.store.as_ref(), &world.user.id)
        .await
        .unwrap()
        .unwrap();
    (user.xp, user.level)
}

async fn append_logs(world: &World, count: usize) {
    for _ in 0..count {
        let log = IncidentLog::record(world.user.id, incident()).unwrap();
        IncidentLogRepository::append(world.store.as_ref(), &log)
            .await
            .unwrap();
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn tenth_log_unlocks_milestone_and_levels_up() {
    let world = world().await;

    let award = XpLedger::new(world.store.clone())
        .award_xp(AwardXpCommand {
            user_id: world.user.id,
            amount: 50,
            reason: "warm-up".to_string(),
        })
        .await
        .unwrap();
    assert_eq!((award.new_xp, award.new_level), (50, 1));
    assert!(!award.leveled_up);

    let handler = LogIncidentHandler::new(world.store.clone(), world.dispatcher.clone());
    let mut unlocked = Vec::new();
    for _ in 0..10 {
        let result = handler
            .handle(LogIncidentCommand {
                user_id: world.user.id,
                incident: incident(),
            })
            .await
            .unwrap();
        unlocked.extend(result.newly_unlocked);
    }

    assert_eq!(unlocked, vec![AchievementId::new("ten_logs").unwrap()]);
    assert_eq!(balance(&world).await, (110, 2));
}

#[tokio::test]
async fn second_evaluation_after_unlock_is_empty() {
    let world = world().await;
    append_logs(&world, 10).await;

    let first = world.dispatcher.evaluate(manual(world.user.id)).await.unwrap();
    assert_eq!(first.len(), 1);
    let after_first = balance(&world).await;

    let second = world.dispatcher.evaluate(manual(world.user.id)).await.unwrap();
    assert!(second.is_empty());
    assert_eq!(balance(&world).await, after_first);
}

#[tokio::test]
async fn milestone_requires_exact_threshold() {
    let world = world().await;
    append_logs(&world, 9).await;

    assert!(world
        .dispatcher
        .evaluate(manual(world.user.id))
        .await
        .unwrap()
        .is_empty());

    append_logs(&world, 1).await;
    assert_eq!(
        world
            .dispatcher
            .evaluate(manual(world.user.id))
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn unlock_survives_progress_falling_back() {
    let world = world().await;
    let three_days = AchievementDefinition::new(
        AchievementId::new("three_day_streak").unwrap(),
        BadgeCategory::Streak,
        "Getting Started",
        "Stay clean for 3 days",
        UnlockCondition::CurrentStreak(3),
        25,
        1,
    )
    .unwrap();
    AchievementCatalog::upsert(world.store.as_ref(), &three_days)
        .await
        .unwrap();
    UserRepository::set_streak(world.store.as_ref(), &world.user.id, 3)
        .await
        .unwrap();
    world.dispatcher.evaluate(manual(world.user.id)).await.unwrap();

    let log = IncidentLog::record(world.user.id, incident()).unwrap();
    assert!(IncidentLogRepository::record_incident(world.store.as_ref(), &log)
        .await
        .unwrap());
    let again = world.dispatcher.evaluate(manual(world.user.id)).await.unwrap();
    assert!(again.is_empty());

    let ids = UserAchievementRepository::unlocked_ids(world.store.as_ref(), &world.user.id)
        .await
        .unwrap();
    assert!(ids.contains(&AchievementId::new("three_day_streak").unwrap()));
    assert_eq!(balance(&world).await, (25, 1));
}

#[tokio::test]
async fn concurrent_evaluations_unlock_and_credit_once() {
    let world = world().await;
    append_logs(&world, 10).await;

    let (a, b, c) = tokio::join!(
        world.dispatcher.evaluate(manual(world.user.id)),
        world.dispatcher.evaluate(manual(world.user.id)),
        world.dispatcher.evaluate(manual(world.user.id)),
    );
    let total: usize = [a.unwrap(), b.unwrap(), c.unwrap()]
        .iter()
        .map(Vec::len)
        .sum();

    assert_eq!(total, 1);
    assert_eq!(balance(&world).await, (60, 1));
    let records =
        UserAchievementRepository::list_for_user(world.store.as_ref(), &world.user.id)
            .await
            .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].progress, 10);
}

#[tokio::test]
async fn concurrent_xp_awards_are_not_lost() {
    let world = world().await;
    let ledger = XpLedger::new(world.store.clone());
    let award = |amount| AwardXpCommand {
        user_id: world.user.id,
        amount,
        reason: "burst".to_string(),
    };

    let (a, b) = tokio::join!(ledger.award_xp(award(70)), ledger.award_xp(award(80)));
    a.unwrap();
    b.unwrap();

    assert_eq!(balance(&world).await, (150, 2));
}

#[tokio::test]
async fn unknown_user_evaluation_writes_nothing() {
    let world = world().await;
    let ghost = UserId::new();

    assert!(world.dispatcher.evaluate(manual(ghost)).await.is_err());
    assert!(
        UserAchievementRepository::unlocked_ids(world.store.as_ref(), &ghost)
            .await
            .unwrap()
            .is_empty()
    );
}
