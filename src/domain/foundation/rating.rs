//! Rating value object for guilt/regret scores (1 to 10 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Self-reported intensity from 1 (barely) to 10 (overwhelming).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates a Rating, returning error if outside 1..=10.
    pub fn try_new(field: &str, value: i64) -> Result<Self, ValidationError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(ValidationError::out_of_range(
                field,
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i16> for Rating {
    type Error = ValidationError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_new("rating", i64::from(value))
    }
}

impl From<Rating> for i16 {
    fn from(rating: Rating) -> Self {
        i16::from(rating.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(Rating::try_new("guilt", 1).unwrap().value(), 1);
        assert_eq!(Rating::try_new("guilt", 10).unwrap().value(), 10);
    }

    #[test]
    fn rejects_out_of_range_with_field_name() {
        let err = Rating::try_new("regret_rating", 11).unwrap_err();
        assert_eq!(err, ValidationError::out_of_range("regret_rating", 1, 10, 11));
        assert!(Rating::try_new("guilt", 0).is_err());
        assert!(Rating::try_new("guilt", -4).is_err());
    }

    #[test]
    fn deserializes_from_integer() {
        let rating: Rating = serde_json::from_str("7").unwrap();
        assert_eq!(rating.value(), 7);
        assert!(serde_json::from_str::<Rating>("42").is_err());
    }

    #[test]
    fn displays_out_of_ten() {
        assert_eq!(Rating::try_new("guilt", 3).unwrap().to_string(), "3/10");
    }
}
