use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub event_id: Uuid,
    pub quantity: i32,
}
