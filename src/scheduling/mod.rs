//! Slot generation, availability classification, and the booking
//! conflict test. Everything here is a pure function over rows the
//! caller has already loaded, so the whole engine can be exercised
//! without a database; the write path re-runs [`find_conflict`]
//! against rows locked in its own transaction.

mod error;
#[cfg(test)]
mod tests;

pub use error::BookingError;

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::{
    config::BusinessHours,
    models::{
        appointments::Appointment,
        blackouts::{Blackout, DEFAULT_BLOCK_MINUTES},
    },
    utils::minutes_of,
};

pub const REASON_AFTER_CLOSING: &str = "Service would end after closing";
pub const REASON_CLOSED: &str = "Salon closed";
pub const REASON_BLOCKED: &str = "Blocked";
pub const REASON_BOOKED: &str = "Booked";

/// A committed appointment's footprint, in minutes from midnight.
#[derive(Debug, Clone, Copy)]
pub struct BookedSpan {
    pub start: i32,
    pub duration: i32,
    pub staff_id: Option<u64>,
}

impl BookedSpan {
    pub fn end(&self) -> i32 {
        self.start + self.duration
    }
}

impl From<&Appointment> for BookedSpan {
    fn from(appt: &Appointment) -> Self {
        Self {
            start: minutes_of(appt.preferred_time),
            duration: appt.duration_minutes,
            staff_id: appt.staff_id,
        }
    }
}

/// A blocked period. `span == None` blocks the whole day.
#[derive(Debug, Clone, Copy)]
pub struct BlackoutSpan {
    pub span: Option<(i32, i32)>,
    pub staff_id: Option<u64>,
}

impl From<&Blackout> for BlackoutSpan {
    fn from(b: &Blackout) -> Self {
        let span = b.block_time.map(|start| {
            let start = minutes_of(start);
            let end = b
                .end_time
                .map(minutes_of)
                .unwrap_or(start + DEFAULT_BLOCK_MINUTES);
            (start, end)
        });
        Self {
            span,
            staff_id: b.staff_id,
        }
    }
}

/// Half-open interval overlap; touching endpoints never conflict.
pub fn overlaps(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    a_start < b_end && b_start < a_end
}

/// A stored blackout with no staff id applies to everyone. A request
/// with no staff preference is only constrained by those global rows;
/// one staff member being away does not close the salon.
pub fn blackout_applies(record_staff: Option<u64>, requested_staff: Option<u64>) -> bool {
    match (record_staff, requested_staff) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(r), Some(q)) => r == q,
    }
}

/// An appointment with no staff id could be served by anyone, so it
/// constrains every request; a request with no preference must clear
/// every staff member's bookings.
pub fn appointment_constrains(record_staff: Option<u64>, requested_staff: Option<u64>) -> bool {
    match (record_staff, requested_staff) {
        (None, _) | (_, None) => true,
        (Some(r), Some(q)) => r == q,
    }
}

/// Syntactic and not-in-past validation for availability queries.
/// Today stays queryable so admins can handle same-day requests; the
/// booking write path separately demands a strictly future date.
pub fn validate_request_date(s: &str, today: NaiveDate) -> Result<NaiveDate, BookingError> {
    let date = crate::utils::parse_date_str(s)
        .map_err(|_| BookingError::InvalidDate("Invalid date format. Use YYYY-MM-DD"))?;
    if date < today {
        return Err(BookingError::InvalidDate(
            "Cannot check availability for past dates",
        ));
    }
    Ok(date)
}

/// Sum of catalog durations for the selected services, substituting a
/// default for unknown names and flooring to the configured minimum.
/// The floor also guards against an empty selection.
pub fn total_duration(
    selected: &[String],
    catalog: &HashMap<String, i32>,
    hours: &BusinessHours,
) -> i32 {
    let sum: i32 = selected
        .iter()
        .map(|name| {
            catalog
                .get(name.trim())
                .copied()
                .unwrap_or(hours.default_service_minutes)
        })
        .sum();
    sum.max(hours.min_service_minutes)
}

#[derive(Debug, Clone)]
pub struct SlotDecision {
    pub time: NaiveTime,
    pub available: bool,
    pub reason: Option<&'static str>,
}

/// Classify every candidate slot of one day. Never fails for lack of
/// space; a fully booked day comes back as a full grid of unavailable
/// slots with reasons.
pub fn evaluate_slots(
    hours: &BusinessHours,
    duration: i32,
    requested_staff: Option<u64>,
    blackouts: &[BlackoutSpan],
    booked: &[BookedSpan],
) -> Vec<SlotDecision> {
    let day_blocked = blackouts
        .iter()
        .any(|b| b.span.is_none() && blackout_applies(b.staff_id, requested_staff));

    hours
        .slot_starts
        .iter()
        .map(|&time| {
            let start = minutes_of(time);
            let end = start + duration;

            let reason = if end > hours.closing_minutes {
                Some(REASON_AFTER_CLOSING)
            } else if day_blocked {
                Some(REASON_CLOSED)
            } else if blackouts.iter().any(|b| match b.span {
                Some((b_start, b_end)) => {
                    blackout_applies(b.staff_id, requested_staff)
                        && overlaps(start, end, b_start, b_end)
                }
                None => false,
            }) {
                Some(REASON_BLOCKED)
            } else if booked.iter().any(|b| {
                appointment_constrains(b.staff_id, requested_staff)
                    && overlaps(start, end, b.start, b.end())
            }) {
                Some(REASON_BOOKED)
            } else {
                None
            };

            SlotDecision {
                time,
                available: reason.is_none(),
                reason,
            }
        })
        .collect()
}

/// The authoritative conflict test for the booking write path. The
/// advisory answer from [`evaluate_slots`] is never trusted; this must
/// run against rows locked in the same transaction that inserts.
pub fn find_conflict(
    booked: &[BookedSpan],
    start: i32,
    duration: i32,
    requested_staff: Option<u64>,
) -> bool {
    let end = start + duration;
    booked.iter().any(|b| {
        appointment_constrains(b.staff_id, requested_staff)
            && overlaps(start, end, b.start, b.end())
    })
}
