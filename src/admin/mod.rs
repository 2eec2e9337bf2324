mod requests;
mod responses;
mod utils;

use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::{Duration, Local};
use diesel::prelude::*;

use crate::{
    database::{flatten_block_err, get_db_conn, last_insert_id},
    models::{
        appointments::{
            Appointment, STATUS_CANCELLED, STATUS_CONFIRMED, STATUS_PENDING,
        },
        blackouts::{Blackout, NewBlackout},
    },
    protocol::{SimpleResponse, ERR_UNAVAILABLE},
    utils as fmt,
    AppContext,
};

use self::{requests::*, responses::*, utils::assert_admin};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_bookings)
        .service(update_status)
        .service(delete_booking)
        .service(list_blackouts)
        .service(create_blackout)
        .service(delete_blackout)
        .service(send_reminders);
}

crate::post_funcs! {
    (list_bookings, "/bookings", ListBookingsRequest, ListBookingsResponse),
    (update_status, "/update_status", UpdateStatusRequest, SimpleResponse),
    (delete_booking, "/delete_booking", DeleteBookingRequest, SimpleResponse),
    (list_blackouts, "/blackouts", ListBlackoutsRequest, ListBlackoutsResponse),
    (create_blackout, "/create_blackout", CreateBlackoutRequest, CreateBlackoutResponse),
    (delete_blackout, "/delete_blackout", DeleteBlackoutRequest, SimpleResponse),
    (send_reminders, "/send_reminders", SendRemindersRequest, SendRemindersResponse),
}

async fn list_bookings_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<ListBookingsRequest>,
) -> anyhow::Result<ListBookingsResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    assert_admin(&info.admin_token, &ctx.admin)?;

    let status = info.status.unwrap_or_else(|| "all".to_string());
    if !matches!(
        status.as_str(),
        "all" | STATUS_PENDING | STATUS_CONFIRMED | STATUS_CANCELLED
    ) {
        bail!("Invalid status filter");
    }

    let conn = get_db_conn(&ctx.pool)?;
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(50).max(0);
    let (rows, statuses) = web::block(
        move || -> diesel::QueryResult<(Vec<Appointment>, Vec<String>)> {
            let rows = appointments::table
                .filter(appointments::status.eq(&status).or(status == "all"))
                .order(appointments::created_at.desc())
                .offset(first_index)
                .limit(limit)
                .load::<Appointment>(&conn)?;
            let statuses = appointments::table
                .select(appointments::status)
                .load::<String>(&conn)?;
            Ok((rows, statuses))
        },
    )
    .await
    .context(ERR_UNAVAILABLE)?;

    let mut counts = StatusCounts {
        all: statuses.len() as i64,
        ..Default::default()
    };
    for s in &statuses {
        match s.as_str() {
            STATUS_PENDING => counts.pending += 1,
            STATUS_CONFIRMED => counts.confirmed += 1,
            STATUS_CANCELLED => counts.cancelled += 1,
            _ => {}
        }
    }

    Ok(ListBookingsResponse {
        success: true,
        err: "".to_string(),
        bookings: rows
            .into_iter()
            .map(|a| BookingItem {
                id: a.id,
                services: a.service_names(),
                date: fmt::date_str(a.preferred_date),
                time: fmt::clock_str(a.preferred_time),
                created_at: a.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                client_name: a.client_name,
                email: a.email,
                phone: a.phone,
                duration_minutes: a.duration_minutes,
                staff_id: a.staff_id,
                status: a.status,
                notes: a.notes,
            })
            .collect(),
        counts,
    })
}

async fn update_status_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<UpdateStatusRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    assert_admin(&info.admin_token, &ctx.admin)?;

    // Confirmation never changes timing, so no overlap re-validation;
    // cancellation frees the interval simply by leaving the active set.
    let new_status = info.status;
    if new_status != STATUS_CONFIRMED && new_status != STATUS_CANCELLED {
        bail!("Invalid status");
    }

    let conn = get_db_conn(&ctx.pool)?;
    let booking_id = info.booking_id;
    let status_for_update = new_status.clone();
    let appt = web::block(move || {
        conn.transaction(|| {
            let appt = appointments::table
                .filter(appointments::id.eq(booking_id))
                .get_result::<Appointment>(&conn)
                .optional()
                .context(ERR_UNAVAILABLE)?;
            let appt = match appt {
                Some(appt) => appt,
                None => bail!("No such booking"),
            };

            diesel::update(appointments::table.filter(appointments::id.eq(booking_id)))
                .set(appointments::status.eq(&status_for_update))
                .execute(&conn)
                .context(ERR_UNAVAILABLE)?;

            Ok(appt)
        })
    })
    .await
    .map_err(flatten_block_err)?;

    ctx.mailer.status_changed(&appt, &new_status);

    Ok(SimpleResponse::ok())
}

async fn delete_booking_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<DeleteBookingRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    assert_admin(&info.admin_token, &ctx.admin)?;

    let conn = get_db_conn(&ctx.pool)?;
    let booking_id = info.booking_id;
    let deleted = web::block(move || {
        diesel::delete(appointments::table.filter(appointments::id.eq(booking_id))).execute(&conn)
    })
    .await
    .context(ERR_UNAVAILABLE)?;

    if deleted == 0 {
        bail!("No such booking");
    }

    Ok(SimpleResponse::ok())
}

async fn list_blackouts_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<ListBlackoutsRequest>,
) -> anyhow::Result<ListBlackoutsResponse> {
    use crate::schema::blackouts;

    let info = info.into_inner();
    assert_admin(&info.admin_token, &ctx.admin)?;

    let date = match info.date {
        Some(raw) => Some(fmt::parse_date_str(raw.trim())?),
        None => None,
    };

    let conn = get_db_conn(&ctx.pool)?;
    let rows = web::block(move || match date {
        Some(date) => blackouts::table
            .filter(blackouts::block_date.eq(date))
            .order((blackouts::block_date.asc(), blackouts::block_time.asc()))
            .load::<Blackout>(&conn),
        None => blackouts::table
            .order((blackouts::block_date.asc(), blackouts::block_time.asc()))
            .load::<Blackout>(&conn),
    })
    .await
    .context(ERR_UNAVAILABLE)?;

    Ok(ListBlackoutsResponse {
        success: true,
        err: "".to_string(),
        blackouts: rows
            .into_iter()
            .map(|b| BlackoutItem {
                id: b.id,
                date: fmt::date_str(b.block_date),
                start_time: b.block_time.map(fmt::clock_str),
                end_time: b.end_time.map(fmt::clock_str),
                staff_id: b.staff_id,
                reason: b.reason,
            })
            .collect(),
    })
}

async fn create_blackout_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<CreateBlackoutRequest>,
) -> anyhow::Result<CreateBlackoutResponse> {
    use crate::schema::blackouts;

    let info = info.into_inner();
    assert_admin(&info.admin_token, &ctx.admin)?;

    let block_date = fmt::parse_date_str(info.date.trim())?;
    let block_time = match &info.start_time {
        Some(raw) => Some(fmt::parse_clock_str(raw.trim())?),
        None => None,
    };
    let end_time = match &info.end_time {
        Some(raw) => Some(fmt::parse_clock_str(raw.trim())?),
        None => None,
    };
    if block_time.is_none() && end_time.is_some() {
        bail!("End time requires a start time");
    }
    if let (Some(start), Some(end)) = (block_time, end_time) {
        if end <= start {
            bail!("End time must be after start time");
        }
    }

    let record = NewBlackout {
        block_date,
        block_time,
        end_time,
        staff_id: info.staff_id,
        reason: info.reason.trim().to_string(),
    };

    let conn = get_db_conn(&ctx.pool)?;
    let blackout_id = web::block(move || {
        conn.transaction(|| {
            diesel::insert_into(blackouts::table)
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

    Ok(CreateBlackoutResponse {
        success: true,
        err: "".to_string(),
        blackout_id: Some(blackout_id),
    })
}

async fn delete_blackout_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<DeleteBlackoutRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::blackouts;

    let info = info.into_inner();
    assert_admin(&info.admin_token, &ctx.admin)?;

    let conn = get_db_conn(&ctx.pool)?;
    let blackout_id = info.blackout_id;
    let deleted = web::block(move || {
        diesel::delete(blackouts::table.filter(blackouts::id.eq(blackout_id))).execute(&conn)
    })
    .await
    .context(ERR_UNAVAILABLE)?;

    if deleted == 0 {
        bail!("No such blocked period");
    }

    Ok(SimpleResponse::ok())
}

async fn send_reminders_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<SendRemindersRequest>,
) -> anyhow::Result<SendRemindersResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    assert_admin(&info.admin_token, &ctx.admin)?;

    let tomorrow = Local::now().date_naive() + Duration::days(1);
    let conn = get_db_conn(&ctx.pool)?;
    let rows = web::block(move || {
        appointments::table
            .filter(appointments::preferred_date.eq(tomorrow))
            .filter(appointments::status.eq(STATUS_CONFIRMED))
            .load::<Appointment>(&conn)
    })
    .await
    .context(ERR_UNAVAILABLE)?;

    let sent = rows.len() as i64;
    for appt in &rows {
        ctx.mailer.reminder(appt);
    }
    log::info!("queued {} reminder(s) for {}", sent, tomorrow);

    Ok(SendRemindersResponse {
        success: true,
        err: "".to_string(),
        sent,
    })
}
