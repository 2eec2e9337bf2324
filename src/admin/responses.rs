use serde::Serialize;

#[derive(Default, Serialize)]
pub struct BookingItem {
    pub id: u64,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub services: Vec<String>,
    pub date: String,
    pub time: String,
    pub duration_minutes: i32,
    pub staff_id: Option<u64>,
    pub status: String,
    pub notes: String,
    pub created_at: String,
}

#[derive(Default, Serialize)]
pub struct StatusCounts {
    pub all: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub cancelled: i64,
}

#[derive(Default, Serialize)]
pub struct ListBookingsResponse {
    pub success: bool,
    pub err: String,
    pub bookings: Vec<BookingItem>,
    pub counts: StatusCounts,
}

#[derive(Default, Serialize)]
pub struct BlackoutItem {
    pub id: u64,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub staff_id: Option<u64>,
    pub reason: String,
}

#[derive(Default, Serialize)]
pub struct ListBlackoutsResponse {
    pub success: bool,
    pub err: String,
    pub blackouts: Vec<BlackoutItem>,
}

#[derive(Default, Serialize)]
pub struct CreateBlackoutResponse {
    pub success: bool,
    pub err: String,
    pub blackout_id: Option<u64>,
}

#[derive(Default, Serialize)]
pub struct SendRemindersResponse {
    pub success: bool,
    pub err: String,
    pub sent: i64,
}

crate::impl_err_response! {
    ListBookingsResponse,
    ListBlackoutsResponse,
    CreateBlackoutResponse,
    SendRemindersResponse,
}
