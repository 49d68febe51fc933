//! In-memory implementation of every persistence port.
//!
//! Useful for:
//! - Development without a database
//! - Handler and integration tests
//!
//! All state sits behind one `Mutex`, so each port method is atomic with
//! respect to every other. In particular `unlock` holds the guard across the
//! record insert and the XP credit, `record_incident` across the log append
//! and the streak reset, and `reset_progress` across the user reset and both
//! deletes. Nothing survives a restart.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::community::{CommunityPost, PostReply};
use crate::domain::foundation::{
    AchievementId, DomainError, ErrorCode, PostId, Timestamp, UserId,
};
use crate::domain::gamification::{
    sort_catalog, AchievementDefinition, SocialCounts, UnlockGrant, UnlockOutcome,
    UserAchievement, XpAmount, XpBalance,
};
use crate::domain::incident::{IncidentLog, IncidentTotals};
use crate::domain::user::{StreakUpdate, User};
use crate::ports::{
    AchievementCatalog, CommunityRepository, IncidentLogRepository, UserAchievementRepository,
    UserRepository,
};

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    logs: Vec<IncidentLog>,
    catalog: BTreeMap<AchievementId, AchievementDefinition>,
    unlocks: Vec<UserAchievement>,
    posts: Vec<CommunityPost>,
    likes: HashSet<(PostId, UserId)>,
    replies: Vec<PostReply>,
}

impl State {
    fn user_mut(&mut self, id: &UserId) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    fn is_unlocked(&self, user_id: &UserId, achievement_id: &AchievementId) -> bool {
        self.unlocks
            .iter()
            .any(|u| &u.user_id == user_id && &u.achievement_id == achievement_id)
    }
}

/// Process-local store implementing all repository ports.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "In-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        let taken = state.users.values().any(|u| {
            u.id == user.id || u.username == user.username || u.email == user.email
        });
        if taken {
            return Err(DomainError::new(ErrorCode::UserExists, "User already exists")
                .with_detail("username", user.username.clone()));
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn increment_streak(&self, id: &UserId) -> Result<Option<StreakUpdate>, DomainError> {
        Ok(self.lock()?.user_mut(id).map(User::increment_streak))
    }

    async fn set_streak(&self, id: &UserId, days: u32) -> Result<bool, DomainError> {
        Ok(self.lock()?.user_mut(id).map(|u| u.set_streak(days)).is_some())
    }

    async fn credit_xp(
        &self,
        id: &UserId,
        amount: XpAmount,
    ) -> Result<Option<XpBalance>, DomainError> {
        Ok(self.lock()?.user_mut(id).map(|u| u.credit_xp(amount)))
    }

    async fn reset_progress(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        if state.user_mut(id).map(User::reset_progress).is_none() {
            return Ok(false);
        }
        state.unlocks.retain(|u| &u.user_id != id);
        state.logs.retain(|l| &l.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl IncidentLogRepository for InMemoryStore {
    async fn append(&self, log: &IncidentLog) -> Result<(), DomainError> {
        self.lock()?.logs.push(log.clone());
        Ok(())
    }

    async fn record_incident(&self, log: &IncidentLog) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        if state.user_mut(&log.user_id).map(User::reset_streak).is_none() {
            return Ok(false);
        }
        state.logs.push(log.clone());
        Ok(true)
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u32, DomainError> {
        let count = self.lock()?.logs.iter().filter(|l| &l.user_id == user_id).count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<IncidentLog>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .logs
            .iter()
            .rev()
            .filter(|l| &l.user_id == user_id)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn totals_for_user(&self, user_id: &UserId) -> Result<IncidentTotals, DomainError> {
        let state = self.lock()?;
        Ok(state
            .logs
            .iter()
            .filter(|l| &l.user_id == user_id)
            .fold(IncidentTotals::default(), |mut totals, log| {
                totals.total_logs = totals.total_logs.saturating_add(1);
                totals.total_cost += log.estimated_cost;
                totals.total_calories += u64::from(log.calories);
                totals
            }))
    }

    async fn list_since(
        &self,
        user_id: &UserId,
        since: Timestamp,
    ) -> Result<Vec<IncidentLog>, DomainError> {
        let state = self.lock()?;
        let mut logs: Vec<_> = state
            .logs
            .iter()
            .filter(|l| &l.user_id == user_id && l.logged_at >= since)
            .cloned()
            .collect();
        logs.sort_by(|a, b| a.logged_at.cmp(&b.logged_at));
        Ok(logs)
    }
}

#[async_trait]
impl AchievementCatalog for InMemoryStore {
    async fn list(&self) -> Result<Vec<AchievementDefinition>, DomainError> {
        let mut catalog: Vec<_> = self.lock()?.catalog.values().cloned().collect();
        sort_catalog(&mut catalog);
        Ok(catalog)
    }

    async fn find_by_id(
        &self,
        id: &AchievementId,
    ) -> Result<Option<AchievementDefinition>, DomainError> {
        Ok(self.lock()?.catalog.get(id).cloned())
    }

    async fn upsert(&self, definition: &AchievementDefinition) -> Result<(), DomainError> {
        self.lock()?
            .catalog
            .insert(definition.id.clone(), definition.clone());
        Ok(())
    }
}

#[async_trait]
impl UserAchievementRepository for InMemoryStore {
    async fn unlocked_ids(&self, user_id: &UserId) -> Result<HashSet<AchievementId>, DomainError> {
        Ok(self
            .lock()?
            .unlocks
            .iter()
            .filter(|u| &u.user_id == user_id)
            .map(|u| u.achievement_id.clone())
            .collect())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, DomainError> {
        Ok(self
            .lock()?
            .unlocks
            .iter()
            .filter(|u| &u.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn unlock(&self, grant: &UnlockGrant) -> Result<UnlockOutcome, DomainError> {
        let mut state = self.lock()?;
        if !state.users.contains_key(&grant.user_id) {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found")
                .with_detail("user_id", grant.user_id.to_string()));
        }
        if state.is_unlocked(&grant.user_id, &grant.achievement_id) {
            return Ok(UnlockOutcome::AlreadyUnlocked);
        }

        state.unlocks.push(grant.record());
        let balance = match (state.user_mut(&grant.user_id), grant.xp_reward) {
            (Some(user), Some(amount)) => user.credit_xp(amount),
            (Some(user), None) => user.balance(),
            (None, _) => XpBalance::default(),
        };
        Ok(UnlockOutcome::Unlocked(balance))
    }
}

#[async_trait]
impl CommunityRepository for InMemoryStore {
    async fn create_post(&self, post: &CommunityPost) -> Result<(), DomainError> {
        self.lock()?.posts.push(post.clone());
        Ok(())
    }

    async fn find_post(&self, id: &PostId) -> Result<Option<CommunityPost>, DomainError> {
        Ok(self.lock()?.posts.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_posts(&self, limit: u32, offset: u32) -> Result<Vec<CommunityPost>, DomainError> {
        Ok(self
            .lock()?
            .posts
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn like_post(&self, post_id: &PostId, user_id: &UserId) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        if !state.posts.iter().any(|p| &p.id == post_id) {
            return Err(post_not_found(post_id));
        }
        if !state.likes.insert((*post_id, *user_id)) {
            return Ok(false);
        }
        if let Some(post) = state.posts.iter_mut().find(|p| &p.id == post_id) {
            post.likes_count = post.likes_count.saturating_add(1);
        }
        Ok(true)
    }

    async fn add_reply(&self, reply: &PostReply) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        if !state.posts.iter().any(|p| p.id == reply.post_id) {
            return Err(post_not_found(&reply.post_id));
        }
        state.replies.push(reply.clone());
        Ok(())
    }

    async fn list_replies(&self, post_id: &PostId) -> Result<Vec<PostReply>, DomainError> {
        Ok(self
            .lock()?
            .replies
            .iter()
            .filter(|r| &r.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn social_counts(&self, user_id: &UserId) -> Result<SocialCounts, DomainError> {
        let state = self.lock()?;
        let own_posts: HashSet<PostId> = state
            .posts
            .iter()
            .filter(|p| &p.author_id == user_id)
            .map(|p| p.id)
            .collect();

        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        Ok(SocialCounts {
            posts_created: count(own_posts.len()),
            likes_given: count(state.likes.iter().filter(|(_, u)| u == user_id).count()),
            likes_received: count(
                state
                    .likes
                    .iter()
                    .filter(|(p, u)| own_posts.contains(p) && u != user_id)
                    .count(),
            ),
            replies_written: count(state.replies.iter().filter(|r| &r.author_id == user_id).count()),
        })
    }
}

fn post_not_found(post_id: &PostId) -> DomainError {
    DomainError::new(ErrorCode::PostNotFound, "Post not found")
        .with_detail("post_id", post_id.to_string())
}
