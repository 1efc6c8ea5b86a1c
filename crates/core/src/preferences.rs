//! User-scoped stored preferences

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A key/value pair remembered for one user.
///
/// Unique on `(user_id, key)`; repeated saves overwrite `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPreference {
    pub user_id: String,
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredPreference {
    pub fn new(user_id: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            key: key.into(),
            value: value.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
