/// Client-facing failure taxonomy for the booking surface. The
/// `Display` output is exactly what callers see; infrastructure detail
/// stays in the logs.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    InvalidDate(&'static str),

    /// One message per violated field rule, aggregated.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// Recoverable: the caller should pick another slot.
    #[error("This time slot was just booked. Please choose another time.")]
    SlotConflict,

    /// Infrastructure-level; safe to retry, nothing was committed.
    #[error("Unable to process booking. Please try again.")]
    Unavailable,
}
