//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a UUID-backed identifier with the usual constructors and conversions.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a user account.
    UserId
);

uuid_id!(
    /// Unique identifier for a logged junk-food incident.
    IncidentLogId
);

uuid_id!(
    /// Unique identifier for a community post.
    PostId
);

uuid_id!(
    /// Unique identifier for a reply to a community post.
    ReplyId
);

/// Catalog identifier for an achievement (a stable slug such as `ten_logs`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AchievementId(String);

impl AchievementId {
    const MAX_LEN: usize = 64;

    /// Creates a new AchievementId.
    ///
    /// Slugs are lowercase ASCII letters, digits and underscores.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("achievement_id"));
        }
        if id.len() > Self::MAX_LEN {
            return Err(ValidationError::invalid_format(
                "achievement_id",
                format!("must be at most {} characters", Self::MAX_LEN),
            ));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "achievement_id",
                "only lowercase letters, digits and underscores are allowed",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AchievementId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AchievementId> for String {
    fn from(id: AchievementId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_generates_unique_values() {
        assert_ne!(UserId::new(), UserId::new());
    }

    #[test]
    fn user_id_round_trips_through_string() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn user_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[test]
    fn user_id_serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&UserId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn achievement_id_accepts_slugs() {
        let id = AchievementId::new("week_warrior").unwrap();
        assert_eq!(id.as_str(), "week_warrior");
        assert_eq!(id.to_string(), "week_warrior");
    }

    #[test]
    fn achievement_id_rejects_empty() {
        assert!(matches!(
            AchievementId::new(""),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn achievement_id_rejects_uppercase_and_spaces() {
        assert!(AchievementId::new("Week Warrior").is_err());
        assert!(AchievementId::new("week-warrior").is_err());
    }

    #[test]
    fn achievement_id_deserialization_validates() {
        let ok: Result<AchievementId, _> = serde_json::from_str("\"ten_logs\"");
        assert!(ok.is_ok());
        let bad: Result<AchievementId, _> = serde_json::from_str("\"Ten Logs\"");
        assert!(bad.is_err());
    }
}
