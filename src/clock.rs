use chrono::{Local, NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "now". Everything that needs the current date goes through this
/// so tests can pin it.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn today_str(&self) -> String {
        self.today().format(DATE_FORMAT).to_string()
    }

    fn now_millis(&self) -> i64 {
        self.now().and_utc().timestamp_millis()
    }
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Midnight of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(0, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let clock = FixedClock::on(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.today_str(), "2024-03-14");
    }

    #[test]
    fn millis_advance_with_time() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let a = FixedClock(date.and_hms_opt(10, 0, 0).unwrap());
        let b = FixedClock(date.and_hms_milli_opt(10, 0, 0, 5).unwrap());
        assert_eq!(b.now_millis() - a.now_millis(), 5);
    }
}
