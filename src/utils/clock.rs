use chrono::{DateTime, Local};

/// Represents an entity responsible for providing the wall-clock time across the application.
/// Check-in slots and day rollover are both derived from it, so tests substitute their own.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Sync + Send + 'static {
    fn now(&self) -> DateTime<Local>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
