//! Date source used when stamping a newly cut release.

/// Supplies today's date as `YYYY-MM-DD`
pub trait Clock {
    fn today(&self) -> String;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> String {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    }
}

/// A clock pinned to a fixed date, for tests and reproducible runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(date: impl Into<String>) -> Self {
        FixedClock(date.into())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.0.clone()
    }
}
