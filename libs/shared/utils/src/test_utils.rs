use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};

use shared_config::AppConfig;

pub struct TestConfig {
    pub max_slot_search_days: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            max_slot_search_days: 14,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_host: "127.0.0.1".to_string(),
            api_port: 0,
            max_slot_search_days: self.max_slot_search_days,
        }
    }
}

/// Wall-clock time helper for fixtures. Panics on out-of-range input.
pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid test time")
}

/// First date strictly after today that falls on `weekday`.
pub fn next_weekday(weekday: Weekday) -> NaiveDate {
    next_weekday_after(Utc::now().date_naive(), weekday)
}

pub fn next_weekday_after(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut date = from + Duration::days(1);
    while date.weekday() != weekday {
        date += Duration::days(1);
    }
    date
}
