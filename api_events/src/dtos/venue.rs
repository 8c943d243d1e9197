use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub capacity: i32,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<i32>,
}
