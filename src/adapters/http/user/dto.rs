//! Request and response bodies for user endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::gamification::LevelProgress;
use crate::domain::incident::IncidentTotals;
use crate::domain::user::User;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub streak_count: u32,
    pub best_streak: u32,
    pub xp: i64,
    pub level: u32,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            streak_count: user.streak_count,
            best_streak: user.best_streak,
            xp: user.xp,
            level: user.level,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub level: LevelProgress,
    pub totals: IncidentTotals,
}
