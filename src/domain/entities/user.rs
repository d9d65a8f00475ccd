use chrono::{DateTime, Utc};

use crate::domain::entities::id::Id;

#[derive(Debug, Clone)]
pub struct User {
    pub id: Id<User>,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// `password` is expected to be already hashed.
    pub fn new(email: String, password: String) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            email: email.to_lowercase(),
            password,
            created_at: now,
            updated_at: now,
        }
    }
}
