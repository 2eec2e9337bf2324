mod requests;
mod responses;

use std::collections::HashMap;

use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::{Local, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;

use crate::{
    database::{assert, flatten_block_err, get_db_conn, last_insert_id, DbConn},
    models::{
        appointments::{Appointment, NewAppointment, ACTIVE_STATUSES, STATUS_PENDING},
        blackouts::Blackout,
        services::ServiceData,
        staff::StaffData,
    },
    notify::BookingDetails,
    protocol::ERR_UNAVAILABLE,
    scheduling::{self, BlackoutSpan, BookedSpan, BookingError},
    utils, AppContext,
};

use self::{requests::*, responses::*};

const MIN_PHONE_DIGITS: usize = 10;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_services)
        .service(list_staff)
        .service(check_availability)
        .service(book);
}

crate::post_funcs! {
    (list_services, "/services", ListServicesRequest, ListServicesResponse),
    (list_staff, "/staff", ListStaffRequest, ListStaffResponse),
    (check_availability, "/availability", AvailabilityRequest, AvailabilityResponse),
    (book, "/book", BookingRequest, BookingResponse),
}

async fn list_services_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<ListServicesRequest>,
) -> anyhow::Result<ListServicesResponse> {
    use crate::schema::services;

    let _ = info.into_inner();
    let conn = get_db_conn(&ctx.pool)?;
    let rows = web::block(move || {
        services::table
            .filter(services::is_active.eq(true))
            .order(services::name.asc())
            .load::<ServiceData>(&conn)
    })
    .await
    .context(ERR_UNAVAILABLE)?;

    Ok(ListServicesResponse {
        success: true,
        err: "".to_string(),
        services: rows
            .into_iter()
            .map(|s| ServiceItem {
                name: s.name,
                duration_minutes: s.duration_minutes,
                price: s.price,
            })
            .collect(),
    })
}

async fn list_staff_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<ListStaffRequest>,
) -> anyhow::Result<ListStaffResponse> {
    let _ = info.into_inner();
    let conn = get_db_conn(&ctx.pool)?;
    let rows = web::block(move || load_active_staff(&conn))
        .await
        .context(ERR_UNAVAILABLE)?;

    Ok(ListStaffResponse {
        success: true,
        err: "".to_string(),
        staff: rows
            .into_iter()
            .map(|s| StaffItem {
                id: s.id,
                name: s.name,
            })
            .collect(),
    })
}

async fn check_availability_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<AvailabilityRequest>,
) -> anyhow::Result<AvailabilityResponse> {
    use crate::schema::{blackouts, services};

    let info = info.into_inner();
    let date = scheduling::validate_request_date(&info.date, Local::now().date_naive())?;
    if let Some(staff_id) = info.staff_id {
        assert::assert_staff(&ctx.pool, staff_id).await?;
    }

    let conn = get_db_conn(&ctx.pool)?;
    let (catalog, roster, blocks, appts) = web::block(
        move || -> diesel::QueryResult<(Vec<(String, i32)>, Vec<StaffData>, Vec<Blackout>, Vec<Appointment>)> {
            let catalog = services::table
                .select((services::name, services::duration_minutes))
                .load(&conn)?;
            let roster = load_active_staff(&conn)?;
            let blocks = blackouts::table
                .filter(blackouts::block_date.eq(date))
                .load(&conn)?;
            // Load the whole date; the evaluator applies staff scoping.
            let appts = load_active_appointments(&conn, date)?;
            Ok((catalog, roster, blocks, appts))
        },
    )
    .await
    .context("Unable to check availability")?;

    let catalog: HashMap<String, i32> = catalog.into_iter().collect();
    let duration = scheduling::total_duration(&info.services, &catalog, &ctx.hours);
    let blocks: Vec<BlackoutSpan> = blocks.iter().map(Into::into).collect();
    let booked: Vec<BookedSpan> = appts.iter().map(Into::into).collect();
    let slots = scheduling::evaluate_slots(&ctx.hours, duration, info.staff_id, &blocks, &booked);

    Ok(AvailabilityResponse {
        success: true,
        err: "".to_string(),
        date: info.date,
        requested_duration: duration,
        slots: slots
            .into_iter()
            .map(|s| SlotItem {
                time: utils::clock_str(s.time),
                display: utils::display_time(s.time),
                available: s.available,
                reason: s.reason.map(str::to_string),
            })
            .collect(),
        staff: roster
            .into_iter()
            .map(|s| StaffItem {
                id: s.id,
                name: s.name,
            })
            .collect(),
    })
}

async fn book_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<BookingRequest>,
) -> anyhow::Result<BookingResponse> {
    use crate::schema::{appointments, services};

    let info = info.into_inner();

    // Bots fill the hidden field; stall them and hand back the same
    // generic failure a validation error would produce.
    if !info.website.trim().is_empty() {
        actix_rt::time::delay_for(std::time::Duration::from_secs(2)).await;
        bail!(BookingError::Unavailable);
    }

    let (date, time) = validate_booking(&info, Local::now().date_naive())?;
    if let Some(staff_id) = info.staff_id {
        assert::assert_staff(&ctx.pool, staff_id).await?;
    }

    // Snapshot the catalog durations now; later catalog edits must not
    // move an accepted booking's footprint.
    let conn = get_db_conn(&ctx.pool)?;
    let catalog = web::block(move || {
        services::table
            .select((services::name, services::duration_minutes))
            .load::<(String, i32)>(&conn)
    })
    .await
    .context(ERR_UNAVAILABLE)?;
    let catalog: HashMap<String, i32> = catalog.into_iter().collect();
    let duration = scheduling::total_duration(&info.services, &catalog, &ctx.hours);

    let record = NewAppointment {
        client_name: info.client_name.trim().to_string(),
        email: info.email.trim().to_string(),
        phone: info.phone.trim().to_string(),
        services: serde_json::to_string(&info.services).context(ERR_UNAVAILABLE)?,
        preferred_date: date,
        preferred_time: time,
        duration_minutes: duration,
        staff_id: info.staff_id,
        status: STATUS_PENDING.to_string(),
        notes: info.notes.trim().to_string(),
        created_at: Utc::now().naive_utc(),
    };
    let details = BookingDetails {
        client_name: record.client_name.clone(),
        email: record.email.clone(),
        phone: record.phone.clone(),
        services: info.services.clone(),
        date,
        time,
        notes: record.notes.clone(),
    };

    let conn = get_db_conn(&ctx.pool)?;
    let staff_scope = info.staff_id;
    let booking_id = web::block(move || {
        conn.transaction(|| {
            // Pessimistic lock on every row this request could collide
            // with; concurrent submissions for the same date and staff
            // scope serialize here, so exactly one of two overlapping
            // requests commits.
            let rows = lock_active_appointments(&conn, date, staff_scope)
                .context(ERR_UNAVAILABLE)?;
            let booked: Vec<BookedSpan> = rows.iter().map(Into::into).collect();
            if scheduling::find_conflict(&booked, utils::minutes_of(time), duration, staff_scope) {
                bail!(BookingError::SlotConflict);
            }

            diesel::insert_into(appointments::table)
                .values(&record)
                .execute(&conn)
                .context(ERR_UNAVAILABLE)?;
            diesel::select(last_insert_id)
                .get_result::<u64>(&conn)
                .context(ERR_UNAVAILABLE)
        })
    })
    .await
    .map_err(flatten_block_err)?;

    // Durable from here on; notification is best-effort.
    ctx.mailer.booking_received(&details, booking_id);

    Ok(BookingResponse {
        success: true,
        err: "".to_string(),
        message: "Booking submitted successfully".to_string(),
        booking_id: Some(booking_id),
    })
}

/// Field validation with every violation aggregated into one error.
/// Returns the parsed date and start time on success.
fn validate_booking(
    info: &BookingRequest,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveTime), BookingError> {
    let mut errors = Vec::new();

    if info.client_name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if !utils::is_valid_email(info.email.trim()) {
        errors.push("Valid email is required".to_string());
    }
    if utils::digit_count(&info.phone) < MIN_PHONE_DIGITS {
        errors.push("Valid phone number is required".to_string());
    }
    if info.services.is_empty() {
        errors.push("Please select at least one service".to_string());
    }

    let date = if info.preferred_date.trim().is_empty() {
        errors.push("Preferred date is required".to_string());
        None
    } else {
        match utils::parse_date_str(info.preferred_date.trim()) {
            Ok(date) if date > today => Some(date),
            Ok(_) => {
                errors.push("Please select a future date".to_string());
                None
            }
            Err(_) => {
                errors.push("Invalid date format. Use YYYY-MM-DD".to_string());
                None
            }
        }
    };
    let time = if info.preferred_time.trim().is_empty() {
        errors.push("Preferred time is required".to_string());
        None
    } else {
        match utils::parse_clock_str(info.preferred_time.trim()) {
            Ok(time) => Some(time),
            Err(_) => {
                errors.push("Invalid time format. Use HH:MM".to_string());
                None
            }
        }
    };

    match (date, time) {
        (Some(date), Some(time)) if errors.is_empty() => Ok((date, time)),
        _ => Err(BookingError::Validation(errors)),
    }
}

fn load_active_staff(conn: &DbConn) -> diesel::QueryResult<Vec<StaffData>> {
    use crate::schema::staff;
    staff::table
        .filter(staff::is_active.eq(true))
        .order(staff::name.asc())
        .load(conn)
}

/// All slot-occupying appointments for a date, no lock. Cancelled rows
/// are history only and are filtered out here.
fn load_active_appointments(conn: &DbConn, date: NaiveDate) -> diesel::QueryResult<Vec<Appointment>> {
    use crate::schema::appointments;
    appointments::table
        .filter(appointments::preferred_date.eq(date))
        .filter(appointments::status.eq_any(ACTIVE_STATUSES.to_vec()))
        .load(conn)
}

/// Same rows under `SELECT ... FOR UPDATE`, scoped to the staff filter
/// when one was given (staff-NULL rows always participate: they could
/// be served by anyone). Must run inside a transaction.
fn lock_active_appointments(
    conn: &DbConn,
    date: NaiveDate,
    staff_id: Option<u64>,
) -> diesel::QueryResult<Vec<Appointment>> {
    use crate::schema::appointments;
    let base = appointments::table
        .filter(appointments::preferred_date.eq(date))
        .filter(appointments::status.eq_any(ACTIVE_STATUSES.to_vec()));
    match staff_id {
        Some(staff_id) => base
            .filter(
                appointments::staff_id
                    .is_null()
                    .or(appointments::staff_id.eq(staff_id)),
            )
            .for_update()
            .load(conn),
        None => base.for_update().load(conn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> BookingRequest {
        BookingRequest {
            client_name: "Asha Patel".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 93164 58160".to_string(),
            services: vec!["Gel Extensions".to_string()],
            preferred_date: "2025-06-02".to_string(),
            preferred_time: "14:00".to_string(),
            notes: "".to_string(),
            staff_id: None,
            website: "".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn valid_booking_passes() {
        let (date, time) = validate_booking(&valid_request(), today()).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
    }

    #[test]
    fn violations_are_aggregated() {
        let mut info = valid_request();
        info.client_name = " ".to_string();
        info.email = "nope".to_string();
        info.phone = "12345".to_string();
        let err = validate_booking(&info, today()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Name is required"));
        assert!(msg.contains("Valid email is required"));
        assert!(msg.contains("Valid phone number is required"));
    }

    #[test]
    fn booking_date_must_be_strictly_future() {
        let mut info = valid_request();
        info.preferred_date = "2025-06-01".to_string();
        let err = validate_booking(&info, today()).unwrap_err();
        assert!(err.to_string().contains("future date"));

        info.preferred_date = "2025-05-20".to_string();
        assert!(validate_booking(&info, today()).is_err());
    }

    #[test]
    fn missing_fields_reported() {
        let mut info = valid_request();
        info.services.clear();
        info.preferred_date = "".to_string();
        info.preferred_time = "".to_string();
        let msg = validate_booking(&info, today()).unwrap_err().to_string();
        assert!(msg.contains("Please select at least one service"));
        assert!(msg.contains("Preferred date is required"));
        assert!(msg.contains("Preferred time is required"));
    }

    #[test]
    fn malformed_time_rejected() {
        let mut info = valid_request();
        info.preferred_time = "2pm".to_string();
        let msg = validate_booking(&info, today()).unwrap_err().to_string();
        assert!(msg.contains("Invalid time format"));
    }
}
