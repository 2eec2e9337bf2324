use crate::schema::blackouts;
use chrono::{NaiveDate, NaiveTime};

/// Minutes a time-ranged blackout covers when no end time was given.
pub const DEFAULT_BLOCK_MINUTES: i32 = 60;

/// An admin-declared blocked period. A null `block_time` blocks the
/// whole day; a null `staff_id` applies to everyone.
#[derive(Queryable, Clone)]
pub struct Blackout {
    pub id: u64,
    pub block_date: NaiveDate,
    pub block_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub staff_id: Option<u64>,
    pub reason: String,
}

#[derive(Insertable)]
#[table_name = "blackouts"]
pub struct NewBlackout {
    pub block_date: NaiveDate,
    pub block_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub staff_id: Option<u64>,
    pub reason: String,
}
