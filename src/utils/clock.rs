use chrono::{Local, NaiveDateTime, SubsecRound};

/// Represents an entity responsible for providing the current time across application. This
/// allows tests to pin "now" to a known moment.
pub trait Clock: Sync + Send + 'static {
    /// Local wall-clock time. Items are filed under the local date of this value.
    fn now(&self) -> NaiveDateTime;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        // Microseconds are the finest precision older records were written with.
        Local::now().naive_local().trunc_subsecs(6)
    }
}

#[cfg(test)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
