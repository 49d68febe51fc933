//! Request bodies and query strings for log and streak endpoints.

use serde::Deserialize;

use crate::domain::incident::NewIncident;

#[derive(Debug, Clone, Deserialize)]
pub struct LogIncidentRequest {
    pub food_type: String,
    pub guilt_rating: i64,
    pub regret_rating: i64,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub calories: i64,
    pub location: Option<String>,
}

impl From<LogIncidentRequest> for NewIncident {
    fn from(req: LogIncidentRequest) -> Self {
        NewIncident {
            food_type: req.food_type,
            guilt_rating: req.guilt_rating,
            regret_rating: req.regret_rating,
            estimated_cost: req.estimated_cost,
            calories: req.calories,
            location: req.location,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
