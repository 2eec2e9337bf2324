use serde::Deserialize;

#[derive(Deserialize)]
pub struct ListServicesRequest {}

#[derive(Deserialize)]
pub struct ListStaffRequest {}

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    pub date: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub staff_id: Option<u64>,
}

#[derive(Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub preferred_date: String,
    #[serde(default)]
    pub preferred_time: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub staff_id: Option<u64>,
    /// Honeypot: hidden on the form, must come back empty.
    #[serde(default)]
    pub website: String,
}
