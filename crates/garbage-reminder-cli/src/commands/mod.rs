pub mod activity;
pub mod config;
pub mod habit;
pub mod home;
pub mod notify;
pub mod reminder;
pub mod week;
pub mod widget;

use chrono::{Local, NaiveTime, TimeZone};

/// Local `HH:MM` of an epoch-seconds instant.
pub fn local_hhmm(ts: i64) -> String {
    match Local.timestamp_opt(ts, 0).single() {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => ts.to_string(),
    }
}

/// Today's local date at `time`, as epoch seconds.
pub fn today_at(time: NaiveTime) -> Result<i64, Box<dyn std::error::Error>> {
    let naive = Local::now().date_naive().and_time(time);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| format!("{} does not exist today in the local time zone", time.format("%H:%M")).into())
}
