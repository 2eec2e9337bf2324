use super::*;
use chrono::NaiveDate;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn min(h: i32, m: i32) -> i32 {
    h * 60 + m
}

fn default_hours() -> BusinessHours {
    BusinessHours::grid(t(8, 0), t(21, 0), t(22, 0), 60)
}

fn short_day() -> BusinessHours {
    // 10:00–18:00, hourly slots through 17:00.
    BusinessHours::grid(t(10, 0), t(17, 0), t(18, 0), 60)
}

fn booked(start: i32, duration: i32, staff_id: Option<u64>) -> BookedSpan {
    BookedSpan {
        start,
        duration,
        staff_id,
    }
}

fn full_day_block(staff_id: Option<u64>) -> BlackoutSpan {
    BlackoutSpan {
        span: None,
        staff_id,
    }
}

fn timed_block(start: i32, end: i32, staff_id: Option<u64>) -> BlackoutSpan {
    BlackoutSpan {
        span: Some((start, end)),
        staff_id,
    }
}

fn catalog() -> std::collections::HashMap<String, i32> {
    vec![
        ("Classic Manicure".to_string(), 45),
        ("Gel Extensions".to_string(), 90),
        ("Nail Art".to_string(), 60),
        ("Spa Pedicure".to_string(), 60),
    ]
    .into_iter()
    .collect()
}

#[test]
fn empty_day_every_slot_available() {
    let slots = evaluate_slots(&default_hours(), 60, None, &[], &[]);
    assert_eq!(slots.len(), 14);
    assert!(slots.iter().all(|s| s.available && s.reason.is_none()));
}

#[test]
fn ninety_minute_service_cut_off_by_closing() {
    // 17:00 + 90min = 18:30 > 18:00 closing.
    let slots = evaluate_slots(&short_day(), 90, None, &[], &[]);
    let last = slots.iter().find(|s| s.time == t(17, 0)).unwrap();
    assert!(!last.available);
    assert_eq!(last.reason, Some(REASON_AFTER_CLOSING));
    // 16:00 + 90min = 17:30 still fits.
    let prev = slots.iter().find(|s| s.time == t(16, 0)).unwrap();
    assert!(prev.available);
}

#[test]
fn existing_booking_blocks_overlapping_slot_only() {
    // Pending appointment occupies 14:00–15:00, any staff.
    let existing = [booked(min(14, 0), 60, None)];
    assert!(find_conflict(&existing, min(14, 30), 30, None));
    assert!(!find_conflict(&existing, min(15, 0), 30, None));

    let slots = evaluate_slots(&default_hours(), 60, None, &[], &existing);
    let at_14 = slots.iter().find(|s| s.time == t(14, 0)).unwrap();
    assert_eq!(at_14.reason, Some(REASON_BOOKED));
    let at_15 = slots.iter().find(|s| s.time == t(15, 0)).unwrap();
    assert!(at_15.available);
}

#[test]
fn touching_endpoints_do_not_conflict() {
    let existing = [booked(min(14, 0), 60, None)];
    // Ends exactly at the existing start: accepted.
    assert!(!find_conflict(&existing, min(13, 0), 60, None));
    // Ends one minute past the existing start: rejected.
    assert!(find_conflict(&existing, min(13, 1), 60, None));
    // Starts exactly at the existing end: accepted.
    assert!(!find_conflict(&existing, min(15, 0), 60, None));
}

#[test]
fn available_slots_pass_the_booking_conflict_test() {
    // What the evaluator advertises as available must be accepted by
    // the write path's check when nothing changed in between.
    let existing = [
        booked(min(10, 0), 90, None),
        booked(min(15, 0), 45, Some(2)),
    ];
    let slots = evaluate_slots(&default_hours(), 60, Some(2), &[], &existing);
    for slot in slots {
        let conflict = find_conflict(&existing, minutes_of(slot.time), 60, Some(2));
        match slot.reason {
            None => assert!(!conflict, "slot {} advertised free but conflicts", slot.time),
            Some(REASON_BOOKED) => assert!(conflict),
            _ => {}
        }
    }
}

#[test]
fn rejection_is_deterministic() {
    let existing = [booked(min(14, 0), 60, None)];
    let first = find_conflict(&existing, min(14, 0), 60, None);
    let second = find_conflict(&existing, min(14, 0), 60, None);
    assert!(first && second);
}

#[test]
fn full_day_blackout_scoped_to_one_staff_member() {
    let blocks = [full_day_block(Some(1))];

    // Staff 1 is fully blocked.
    let for_staff_1 = evaluate_slots(&default_hours(), 60, Some(1), &blocks, &[]);
    assert!(for_staff_1
        .iter()
        .all(|s| s.reason == Some(REASON_CLOSED)));

    // Other staff and "any staff" requests are untouched.
    let for_staff_2 = evaluate_slots(&default_hours(), 60, Some(2), &blocks, &[]);
    assert!(for_staff_2.iter().all(|s| s.available));
    let any_staff = evaluate_slots(&default_hours(), 60, None, &blocks, &[]);
    assert!(any_staff.iter().all(|s| s.available));
}

#[test]
fn global_full_day_blackout_blocks_everyone() {
    let blocks = [full_day_block(None)];
    for requested in &[None, Some(1), Some(7)] {
        let slots = evaluate_slots(&default_hours(), 60, *requested, &blocks, &[]);
        assert!(slots.iter().all(|s| s.reason == Some(REASON_CLOSED)));
    }
}

#[test]
fn timed_blackout_uses_half_open_overlap() {
    let blocks = [timed_block(min(13, 0), min(15, 0), None)];
    let slots = evaluate_slots(&default_hours(), 60, None, &blocks, &[]);
    // 12:00 ends exactly at the block start: free.
    assert!(slots.iter().find(|s| s.time == t(12, 0)).unwrap().available);
    for blocked_at in &[t(13, 0), t(14, 0)] {
        let slot = slots.iter().find(|s| s.time == *blocked_at).unwrap();
        assert_eq!(slot.reason, Some(REASON_BLOCKED));
    }
    // 15:00 starts exactly at the block end: free.
    assert!(slots.iter().find(|s| s.time == t(15, 0)).unwrap().available);
}

#[test]
fn open_ended_blackout_defaults_to_one_hour() {
    let b = Blackout {
        id: 1,
        block_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        block_time: Some(t(13, 0)),
        end_time: None,
        staff_id: None,
        reason: "".to_string(),
    };
    let span = BlackoutSpan::from(&b);
    assert_eq!(span.span, Some((min(13, 0), min(14, 0))));
}

#[test]
fn staff_matching_both_directions() {
    // Stored NULL staff is global.
    assert!(blackout_applies(None, None));
    assert!(blackout_applies(None, Some(3)));
    // Stored staff-specific blackout only hits that staff's requests.
    assert!(blackout_applies(Some(3), Some(3)));
    assert!(!blackout_applies(Some(3), Some(4)));
    assert!(!blackout_applies(Some(3), None));

    // Appointments: a no-preference request checks everyone's rows.
    assert!(appointment_constrains(Some(3), None));
    assert!(appointment_constrains(None, Some(3)));
    assert!(appointment_constrains(Some(3), Some(3)));
    assert!(!appointment_constrains(Some(3), Some(4)));
}

#[test]
fn staff_scoped_bookings_do_not_collide_across_staff() {
    let existing = [booked(min(14, 0), 60, Some(1))];
    assert!(find_conflict(&existing, min(14, 0), 60, Some(1)));
    assert!(!find_conflict(&existing, min(14, 0), 60, Some(2)));
    assert!(find_conflict(&existing, min(14, 0), 60, None));
}

#[test]
fn duration_resolution_sums_defaults_and_floors() {
    let hours = default_hours();
    let catalog = catalog();

    // Floored to the one-hour minimum.
    let selected = vec!["Classic Manicure".to_string()];
    assert_eq!(total_duration(&selected, &catalog, &hours), 60);

    // Sums across services.
    let selected = vec!["Classic Manicure".to_string(), "Gel Extensions".to_string()];
    assert_eq!(total_duration(&selected, &catalog, &hours), 135);

    // Unknown names fall back to the default.
    let selected = vec!["Mystery Treatment".to_string()];
    assert_eq!(total_duration(&selected, &catalog, &hours), 60);

    // Empty selection still floors.
    assert_eq!(total_duration(&[], &catalog, &hours), 60);

    // Whitespace around names is tolerated.
    let selected = vec![" Gel Extensions ".to_string()];
    assert_eq!(total_duration(&selected, &catalog, &hours), 90);
}

#[test]
fn request_date_validation() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    assert!(validate_request_date("2025-06-01", today).is_ok());
    assert!(validate_request_date("2025-06-02", today).is_ok());

    let err = validate_request_date("2025-05-31", today).unwrap_err();
    assert!(err.to_string().contains("past"));

    let err = validate_request_date("2025-6-1", today).unwrap_err();
    assert!(err.to_string().contains("YYYY-MM-DD"));
    assert!(validate_request_date("garbage", today).is_err());
}

#[test]
fn cancelled_rows_are_simply_absent() {
    // The store filters cancelled rows before handing spans to the
    // engine; with the row gone the identical interval is accepted.
    let with_row = [booked(min(14, 0), 60, None)];
    assert!(find_conflict(&with_row, min(14, 0), 60, None));
    let after_cancel: [BookedSpan; 0] = [];
    assert!(!find_conflict(&after_cancel, min(14, 0), 60, None));
}
