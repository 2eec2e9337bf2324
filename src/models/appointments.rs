use crate::schema::appointments;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Statuses that occupy their time slot. Cancelled rows stay in
/// storage as history but never constrain availability.
pub const ACTIVE_STATUSES: [&str; 2] = [STATUS_PENDING, STATUS_CONFIRMED];

#[derive(Queryable, Clone)]
pub struct Appointment {
    pub id: u64,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub services: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    pub duration_minutes: i32,
    pub staff_id: Option<u64>,
    pub status: String,
    pub notes: String,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    /// Service names were snapshotted as a JSON array at booking time;
    /// later catalog edits never touch them.
    pub fn service_names(&self) -> Vec<String> {
        serde_json::from_str(&self.services).unwrap_or_default()
    }
}

#[derive(Insertable)]
#[table_name = "appointments"]
pub struct NewAppointment {
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub services: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    pub duration_minutes: i32,
    pub staff_id: Option<u64>,
    pub status: String,
    pub notes: String,
    pub created_at: NaiveDateTime,
}
