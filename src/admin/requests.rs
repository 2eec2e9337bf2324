use serde::Deserialize;

#[derive(Deserialize)]
pub struct ListBookingsRequest {
    pub admin_token: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub first_index: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub admin_token: String,
    pub booking_id: u64,
    pub status: String,
}

#[derive(Deserialize)]
pub struct DeleteBookingRequest {
    pub admin_token: String,
    pub booking_id: u64,
}

#[derive(Deserialize)]
pub struct ListBlackoutsRequest {
    pub admin_token: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBlackoutRequest {
    pub admin_token: String,
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub staff_id: Option<u64>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize)]
pub struct DeleteBlackoutRequest {
    pub admin_token: String,
    pub blackout_id: u64,
}

#[derive(Deserialize)]
pub struct SendRemindersRequest {
    pub admin_token: String,
}
