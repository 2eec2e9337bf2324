use serde::Serialize;

#[derive(Default, Serialize)]
pub struct ServiceItem {
    pub name: String,
    pub duration_minutes: i32,
    pub price: f64,
}

#[derive(Default, Serialize)]
pub struct ListServicesResponse {
    pub success: bool,
    pub err: String,
    pub services: Vec<ServiceItem>,
}

#[derive(Default, Serialize)]
pub struct StaffItem {
    pub id: u64,
    pub name: String,
}

#[derive(Default, Serialize)]
pub struct ListStaffResponse {
    pub success: bool,
    pub err: String,
    pub staff: Vec<StaffItem>,
}

#[derive(Default, Serialize)]
pub struct SlotItem {
    pub time: String,
    pub display: String,
    pub available: bool,
    pub reason: Option<String>,
}

#[derive(Default, Serialize)]
pub struct AvailabilityResponse {
    pub success: bool,
    pub err: String,
    pub date: String,
    pub requested_duration: i32,
    pub slots: Vec<SlotItem>,
    pub staff: Vec<StaffItem>,
}

#[derive(Default, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub err: String,
    pub message: String,
    pub booking_id: Option<u64>,
}

crate::impl_err_response! {
    ListServicesResponse,
    ListStaffResponse,
    AvailabilityResponse,
    BookingResponse,
}
