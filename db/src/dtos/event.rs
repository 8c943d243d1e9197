use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug)]
pub struct EventCreateRequest {
    pub title: String,
    pub description: String,
    pub venue_id: Uuid,
    pub category: String,
    pub tags: Vec<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub price_cents: i64,
    pub capacity: i32,
    pub organizer_id: Uuid,
}

/// Partial event update; `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct EventUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub venue_id: Option<Uuid>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
    pub capacity: Option<i32>,
}

/// Optional filters for the public event listing.
#[derive(Debug, Default)]
pub struct EventFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
}
