//! Outbound email. Delivery is best-effort and fire-and-forget: the
//! booking is durable before any message is composed, failures are
//! logged and never surfaced, and nothing here can roll a commit back.

use chrono::{NaiveDate, NaiveTime};
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, Message, SmtpTransport,
    Transport,
};

use crate::{config::SalonInfo, models::appointments::Appointment, utils};

const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl SmtpConfig {
    /// `None` when `SMTP_HOST` is unset; the mailer then logs each
    /// message instead of sending it.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            user: std::env::var("SMTP_USER").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Everything the confirmation emails need, captured before the insert
/// so composition never touches the store.
pub struct BookingDetails {
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub services: Vec<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: String,
}

#[derive(Clone)]
pub struct Mailer {
    smtp: Option<SmtpConfig>,
    salon: SalonInfo,
}

impl Mailer {
    pub fn from_env(salon: SalonInfo) -> Self {
        Self {
            smtp: SmtpConfig::from_env(),
            salon,
        }
    }

    /// Admin heads-up plus client acknowledgement for a fresh booking.
    pub fn booking_received(&self, details: &BookingDetails, booking_id: u64) {
        let services = details.services.join(", ");
        let date = utils::display_date(details.date);
        let time = utils::display_time(details.time);

        let admin_subject = format!("New Booking Request - {}", self.salon.name);
        let admin_body = format!(
            "New appointment request\n\n\
             Client: {}\nEmail: {}\nPhone: {}\n\n\
             Services: {}\nDate: {}\nTime: {}\n\n\
             Notes: {}\n\n\
             Booking ID: #{}\nStatus: Pending\n\n\
             Log in to the admin dashboard to confirm or manage this booking.\n",
            details.client_name,
            details.email,
            details.phone,
            services,
            date,
            time,
            if details.notes.is_empty() {
                "None"
            } else {
                &details.notes
            },
            booking_id,
        );
        self.dispatch(self.salon.admin_email.clone(), admin_subject, admin_body);

        let client_subject = format!("Your Appointment Request - {}", self.salon.name);
        let client_body = format!(
            "Dear {},\n\n\
             Thank you for choosing {}!\n\n\
             Your appointment request has been received:\n\n\
             Services: {}\nDate: {}\nTime: {}\n\n\
             Your booking is currently PENDING confirmation. We will contact you \
             shortly to confirm your appointment.\n\n\
             If you have any questions, please call us at {}.\n\n\
             Best regards,\n{}\n",
            details.client_name, self.salon.name, services, date, time, self.salon.phone, self.salon.name,
        );
        self.dispatch(details.email.clone(), client_subject, client_body);
    }

    /// Sent after an admin confirms or cancels.
    pub fn status_changed(&self, appt: &Appointment, new_status: &str) {
        let subject = format!("Your Appointment Update - {}", self.salon.name);
        let body = format!(
            "Dear {},\n\n\
             Your appointment on {} at {} is now {}.\n\n\
             Services: {}\n\n\
             If you have any questions, please call us at {}.\n\n\
             Best regards,\n{}\n",
            appt.client_name,
            utils::display_date(appt.preferred_date),
            utils::display_time(appt.preferred_time),
            new_status.to_uppercase(),
            appt.service_names().join(", "),
            self.salon.phone,
            self.salon.name,
        );
        self.dispatch(appt.email.clone(), subject, body);
    }

    /// Day-before nudge for confirmed appointments.
    pub fn reminder(&self, appt: &Appointment) {
        let subject = format!("Appointment Reminder - {}", self.salon.name);
        let body = format!(
            "Dear {},\n\n\
             This is a friendly reminder that your appointment at {} is coming up \
             tomorrow.\n\n\
             Services: {}\nDate: {}\nTime: {}\n\n\
             Running late? Please let us know. If you are more than 15 minutes late \
             we may need to reschedule.\n\n\
             Need to change your booking? Call us at {}.\n\n\
             See you soon,\n{}\n",
            appt.client_name,
            self.salon.name,
            appt.service_names().join(", "),
            utils::display_date(appt.preferred_date),
            utils::display_time(appt.preferred_time),
            self.salon.phone,
            self.salon.name,
        );
        self.dispatch(appt.email.clone(), subject, body);
    }

    /// Hand the message to a background thread and return immediately.
    fn dispatch(&self, to: String, subject: String, body: String) {
        let mailer = self.clone();
        std::thread::spawn(move || {
            if let Err(err) = mailer.deliver(&to, &subject, body) {
                log::error!("email to {} failed: {:#}", to, err);
            }
        });
    }

    fn deliver(&self, to: &str, subject: &str, body: String) -> anyhow::Result<()> {
        let smtp = match &self.smtp {
            Some(smtp) => smtp,
            None => {
                log::info!("SMTP not configured; skipping email to {} ({})", to, subject);
                return Ok(());
            }
        };

        let from: Mailbox = format!("{} <{}>", self.salon.name, self.salon.email).parse()?;
        let message = Message::builder()
            .from(from)
            .to(to.parse()?)
            .subject(subject)
            .body(body)?;

        let mut builder = SmtpTransport::starttls_relay(&smtp.host)?.port(smtp.port);
        if let (Some(user), Some(password)) = (&smtp.user, &smtp.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }
        builder.build().send(&message)?;

        log::info!("email sent to {} ({})", to, subject);
        Ok(())
    }
}
