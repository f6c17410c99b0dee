use serde::Serialize;

/// Upper bound on title length, matching the schema CHECK constraint.
pub const TITLE_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub complete: bool,
    pub created_at: String,
}
