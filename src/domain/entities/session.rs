use crate::domain::entities::{id::Id, user::User};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Id<Session>,
    pub user_id: Id<User>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub last_rotation: DateTime<Utc>,
    pub remember_me: bool,
}

impl Session {
    pub fn start(user_id: Id<User>, remember_me: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            user_id,
            created_at: now,
            last_activity: now,
            last_rotation: now,
            remember_me,
        }
    }

    /// Same session lifetime under a fresh id.
    pub fn rotated(&self, now: DateTime<Utc>) -> Self {
        Self {
            id: Id::generate(),
            user_id: self.user_id.clone(),
            created_at: self.created_at,
            last_activity: now,
            last_rotation: now,
            remember_me: self.remember_me,
        }
    }
}
