use uuid::Uuid;

#[derive(Debug)]
pub struct BookingCreateRequest {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub quantity: i32,
    pub total_cents: i64,
    pub reference: String,
}
