#[derive(Debug)]
pub struct VenueCreateRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub capacity: i32,
}

/// Partial venue update; `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct VenueUpdateRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<i32>,
}
