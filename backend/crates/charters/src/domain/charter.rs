//! Charter entity

use chrono::{DateTime, Utc};
use kernel::id::{CharterId, UserId};
use serde::{Deserialize, Serialize};

pub const GOAL_MAX_LENGTH: usize = 500;
pub const HYPOTHESES_MAX_LENGTH: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharterStatus {
    Active,
    Closed,
}

impl CharterStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            CharterStatus::Active => "active",
            CharterStatus::Closed => "closed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(CharterStatus::Active),
            "closed" => Some(CharterStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charter {
    pub id: CharterId,
    pub user_id: UserId,
    pub goal: String,
    pub hypotheses: Option<String>,
    pub status: CharterStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Charter {
    /// A new active charter. Validates goal (1..=500) and hypotheses (<= 2000).
    pub fn start(user_id: UserId, goal: &str, hypotheses: Option<&str>) -> Result<Self, String> {
        let goal = goal.trim();
        let goal_len = goal.chars().count();
        if goal_len == 0 {
            return Err("Cel sesji jest wymagany".to_string());
        }
        if goal_len > GOAL_MAX_LENGTH {
            return Err(format!(
                "Cel sesji może mieć maksymalnie {GOAL_MAX_LENGTH} znaków"
            ));
        }

        let hypotheses = hypotheses.map(str::trim).filter(|h| !h.is_empty());
        if hypotheses.is_some_and(|h| h.chars().count() > HYPOTHESES_MAX_LENGTH) {
            return Err(format!(
                "Hipotezy mogą mieć maksymalnie {HYPOTHESES_MAX_LENGTH} znaków"
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: CharterId::new(),
            user_id,
            goal: goal.to_string(),
            hypotheses: hypotheses.map(str::to_string),
            status: CharterStatus::Active,
            started_at: now,
            ended_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == CharterStatus::Active
    }

    /// Seconds from start to end (or to `now` while active)
    pub fn duration_secs(&self, now: DateTime<Utc>) -> i64 {
        let end = self.ended_at.unwrap_or(now);
        (end - self.started_at).num_seconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_start_validates_goal() {
        let user = UserId::new();
        assert!(Charter::start(user, "   ", None).is_err());
        assert!(Charter::start(user, &"g".repeat(501), None).is_err());
        let charter = Charter::start(user, &"ż".repeat(500), None).unwrap();
        assert!(charter.is_active());
        assert!(charter.ended_at.is_none());
    }

    #[test]
    fn test_start_normalizes_hypotheses() {
        let user = UserId::new();
        let charter = Charter::start(user, "Checkout", Some("   ")).unwrap();
        assert_eq!(charter.hypotheses, None);
        let charter = Charter::start(user, "Checkout", Some(" coupons stack ")).unwrap();
        assert_eq!(charter.hypotheses.as_deref(), Some("coupons stack"));
        assert!(Charter::start(user, "Checkout", Some(&"h".repeat(2001))).is_err());
    }

    #[test]
    fn test_duration() {
        let mut charter = Charter::start(UserId::new(), "Search", None).unwrap();
        let later = charter.started_at + Duration::seconds(90);
        assert_eq!(charter.duration_secs(later), 90);
        charter.ended_at = Some(charter.started_at + Duration::seconds(30));
        assert_eq!(charter.duration_secs(later), 30);
    }

    #[test]
    fn test_status_codes() {
        for status in [CharterStatus::Active, CharterStatus::Closed] {
            assert_eq!(CharterStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(CharterStatus::from_code("paused"), None);
    }
}
