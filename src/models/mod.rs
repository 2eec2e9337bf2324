pub mod appointments;
pub mod blackouts;
pub mod services;
pub mod staff;
