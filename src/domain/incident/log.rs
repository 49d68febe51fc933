//! Junk-food incident log entry.

use serde::Serialize;

use crate::domain::foundation::{IncidentLogId, Rating, Timestamp, UserId, ValidationError};

const MAX_FOOD_TYPE_LEN: usize = 100;
const MAX_CALORIES: i64 = 20_000;

/// Raw fields of a new log, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewIncident {
    pub food_type: String,
    pub guilt_rating: i64,
    pub regret_rating: i64,
    pub estimated_cost: f64,
    pub calories: i64,
    pub location: Option<String>,
}

/// One logged junk-food event. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentLog {
    pub id: IncidentLogId,
    pub user_id: UserId,
    pub food_type: String,
    pub guilt_rating: Rating,
    pub regret_rating: Rating,
    /// Money spent, in the user's currency.
    pub estimated_cost: f64,
    pub calories: u32,
    pub location: Option<String>,
    pub logged_at: Timestamp,
}

impl IncidentLog {
    /// Validates the raw fields and stamps the entry with the current time.
    pub fn record(user_id: UserId, input: NewIncident) -> Result<Self, ValidationError> {
        let food_type = input.food_type.trim().to_string();
        if food_type.is_empty() {
            return Err(ValidationError::empty_field("food_type"));
        }
        let len = food_type.chars().count();
        if len > MAX_FOOD_TYPE_LEN {
            return Err(ValidationError::out_of_range(
                "food_type",
                1,
                MAX_FOOD_TYPE_LEN as i64,
                len as i64,
            ));
        }

        let guilt_rating = Rating::try_new("guilt_rating", input.guilt_rating)?;
        let regret_rating = Rating::try_new("regret_rating", input.regret_rating)?;

        if !input.estimated_cost.is_finite() || input.estimated_cost < 0.0 {
            return Err(ValidationError::invalid_format(
                "estimated_cost",
                "must be a non-negative amount",
            ));
        }
        if !(0..=MAX_CALORIES).contains(&input.calories) {
            return Err(ValidationError::out_of_range(
                "calories",
                0,
                MAX_CALORIES,
                input.calories,
            ));
        }

        let location = input
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        Ok(Self {
            id: IncidentLogId::new(),
            user_id,
            food_type,
            guilt_rating,
            regret_rating,
            estimated_cost: input.estimated_cost,
            calories: input.calories as u32,
            location,
            logged_at: Timestamp::now(),
        })
    }
}

/// Aggregates over a user's incident logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IncidentTotals {
    pub total_logs: u32,
    pub total_cost: f64,
    pub total_calories: u64,
}
