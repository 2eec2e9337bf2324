use chrono::NaiveTime;

use crate::utils::minutes_of;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_time(key: &str, default: &str) -> NaiveTime {
    let raw = env_or(key, default);
    crate::utils::parse_clock_str(&raw)
        .unwrap_or_else(|_| panic!("{} is not a valid HH:MM time: {}", key, raw))
}

fn env_minutes(key: &str, default: i32) -> i32 {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{} is not a valid minute count: {}", key, raw)),
        Err(_) => default,
    }
}

/// The business-hours table the slot generator runs on. Held
/// explicitly (not as hidden constants) so deployments and tests can
/// supply alternate hours.
#[derive(Clone, Debug)]
pub struct BusinessHours {
    /// Ordered candidate start times for one business day.
    pub slot_starts: Vec<NaiveTime>,
    /// Minutes from midnight past which no service may run.
    pub closing_minutes: i32,
    /// Floor applied to every requested total duration.
    pub min_service_minutes: i32,
    /// Duration assumed for a service name missing from the catalog.
    pub default_service_minutes: i32,
}

impl BusinessHours {
    /// Fixed grid from `open` through `last_slot` inclusive, stepping
    /// `step_minutes`, closing at `closing`.
    pub fn grid(open: NaiveTime, last_slot: NaiveTime, closing: NaiveTime, step_minutes: i32) -> Self {
        assert!(step_minutes > 0, "slot step must be positive");
        let mut slot_starts = Vec::new();
        let mut m = minutes_of(open);
        let last = minutes_of(last_slot);
        while m <= last {
            let t = NaiveTime::from_hms_opt((m / 60) as u32, (m % 60) as u32, 0)
                .expect("slot start out of range");
            slot_starts.push(t);
            m += step_minutes;
        }
        Self {
            slot_starts,
            closing_minutes: minutes_of(closing),
            min_service_minutes: 60,
            default_service_minutes: 60,
        }
    }

    /// Defaults match the salon's posted hours: hourly slots
    /// 08:00–21:00, doors close at 22:00, one-hour minimum service.
    pub fn from_env() -> Self {
        let open = env_time("BUSINESS_OPEN", "08:00");
        let last_slot = env_time("BUSINESS_LAST_SLOT", "21:00");
        let closing = env_time("BUSINESS_CLOSE", "22:00");
        let step = env_minutes("SLOT_INTERVAL_MINUTES", 60);
        let mut hours = Self::grid(open, last_slot, closing, step);
        hours.min_service_minutes = env_minutes("MIN_SERVICE_MINUTES", 60);
        hours.default_service_minutes = env_minutes("DEFAULT_SERVICE_MINUTES", 60);
        hours
    }
}

/// Identity fields used when composing outbound email.
#[derive(Clone, Debug)]
pub struct SalonInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub admin_email: String,
}

impl SalonInfo {
    pub fn from_env() -> Self {
        let email = env_or("SALON_EMAIL", "noreply@salon.local");
        Self {
            name: env_or("SALON_NAME", "The Salon"),
            phone: env_or("SALON_PHONE", ""),
            admin_email: env_or("ADMIN_EMAIL", &email),
            email,
        }
    }
}

/// Admin capability: callers present a bearer token whose blake2
/// digest must match this hash. No token hash configured means every
/// admin call is refused.
#[derive(Clone, Debug)]
pub struct AdminConfig {
    pub token_hash: Option<String>,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self {
            token_hash: std::env::var("ADMIN_TOKEN_HASH").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn hourly_grid_is_inclusive_of_last_slot() {
        let hours = BusinessHours::grid(t(8, 0), t(21, 0), t(22, 0), 60);
        assert_eq!(hours.slot_starts.len(), 14);
        assert_eq!(hours.slot_starts[0], t(8, 0));
        assert_eq!(*hours.slot_starts.last().unwrap(), t(21, 0));
        assert_eq!(hours.closing_minutes, 22 * 60);
    }

    #[test]
    fn half_hour_grid() {
        let hours = BusinessHours::grid(t(10, 0), t(11, 30), t(12, 0), 30);
        assert_eq!(
            hours.slot_starts,
            vec![t(10, 0), t(10, 30), t(11, 0), t(11, 30)]
        );
    }
}
