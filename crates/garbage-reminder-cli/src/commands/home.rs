use chrono::Local;
use garbage_reminder_core::i18n::weekday_name;
use garbage_reminder_core::notification::{request_authorization_or_log, schedule_or_log};
use garbage_reminder_core::{localize, Config, FileNotificationCenter, NotificationRequest};
use tracing::warn;

use super::local_hhmm;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let lang = config.ui.language;
    let label = config.bin_label_for(Local::now().date_naive());

    println!("{}", localize(lang, "Garbage Bin Reminder"));
    println!();
    println!("{}", label.this_week_message(lang));
    println!(
        "{}: {}",
        localize(lang, "Reminder Day"),
        weekday_name(lang, config.reminder.day).unwrap_or("?")
    );
    println!("{}: {}", localize(lang, "Reminder Time"), local_hhmm(config.reminder.time));

    // Notification failures never stop the home screen.
    match FileNotificationCenter::open() {
        Ok(mut center) => {
            request_authorization_or_log(&mut center);
            match NotificationRequest::home_reminder(&config, &Local, label) {
                Ok(request) => {
                    schedule_or_log(&mut center, request);
                }
                Err(e) => warn!(error = %e, "Notification scheduling error"),
            }
        }
        Err(e) => warn!(error = %e, "Notification scheduling error"),
    }
    Ok(())
}
