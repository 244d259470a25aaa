use serde::{Deserialize, Serialize};

use super::offer::non_blank;
use super::{ANONYMOUS, UNKNOWN_INITIAL};

// ---------------------------------------------------------------------------
// Review — A user's rating and comment, with the author's name joined in
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_id: Option<String>,
    /// Nominally 1-5; not validated.
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: String,
    /// Display name joined from `users.name`.
    #[serde(default)]
    pub user_name: Option<String>,
}

impl Review {
    pub fn author_name(&self) -> &str {
        non_blank(self.user_name.as_deref()).unwrap_or(ANONYMOUS)
    }

    /// First letter of the author's name, upper-cased, for the avatar badge.
    pub fn author_initial(&self) -> String {
        non_blank(self.user_name.as_deref())
            .and_then(|name| name.trim().chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| UNKNOWN_INITIAL.to_string())
    }
}
