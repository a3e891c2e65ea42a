use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

/// Clock abstracts access to the current time so services remain
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp (used for persisted `paid_at`).
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current wall-clock time in the user's timezone (used for
    /// urgency arithmetic against noon-anchored due dates).
    fn local_now(&self) -> NaiveDateTime {
        self.now().naive_utc()
    }

    /// Returns the current calendar day. Defaults to `local_now().date()`.
    fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
