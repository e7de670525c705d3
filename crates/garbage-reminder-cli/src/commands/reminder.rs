use chrono::{Local, NaiveTime};
use clap::Subcommand;
use garbage_reminder_core::habit::Suggestion;
use garbage_reminder_core::i18n::weekday_name;
use garbage_reminder_core::notification::{request_authorization_or_log, schedule_or_log};
use garbage_reminder_core::{
    localize, Config, FileNotificationCenter, NotificationRequest, WeeklyTrigger,
};
use tracing::warn;

use super::{local_hhmm, today_at};

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Show the saved reminder
    Show,
    /// Save a new reminder time and day, then schedule it
    Set {
        /// Wall-clock time, HH:MM (defaults to the saved time)
        #[arg(long, value_parser = parse_hhmm)]
        time: Option<NaiveTime>,
        /// Weekday, 1 = Sunday .. 7 = Saturday (defaults to the saved day)
        #[arg(long)]
        day: Option<u8>,
    },
    /// When the reminder fires next
    Next,
    /// Use the suggested time from your reminder habits
    AcceptSuggestion,
}

fn parse_hhmm(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

pub fn run(action: ReminderAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ReminderAction::Show => {
            let config = Config::load()?;
            let lang = config.ui.language;
            println!(
                "{}: {}",
                localize(lang, "Reminder Day"),
                weekday_name(lang, config.reminder.day).unwrap_or("?")
            );
            println!("{}: {}", localize(lang, "Reminder Time"), local_hhmm(config.reminder.time));
            println!("{}: {}", localize(lang, "Notification Sound"), localize(lang, config.notifications.sound.name()));
        }
        ReminderAction::Set { time, day } => {
            let mut config = Config::load()?;
            let lang = config.ui.language;
            let time = match time {
                Some(t) => today_at(t)?,
                None => config.reminder.time,
            };
            let day = day.unwrap_or(config.reminder.day);

            config.save_reminder(time, day)?;
            config.save()?;
            schedule_custom(&config);

            println!("{}", localize(lang, "Settings Saved"));
            println!("{}", localize(lang, "Your notification settings have been saved successfully."));

            if let Some(suggestion) = config.suggestion() {
                print_suggestion(&config, &suggestion);
            }
        }
        ReminderAction::Next => {
            let config = Config::load()?;
            let trigger = WeeklyTrigger::from_reminder(config.reminder.time, config.reminder.day, &Local)?;
            match trigger.next_fire_after(&Local::now()) {
                Some(at) => println!("{} ({trigger})", at.format("%Y-%m-%d %H:%M %:z")),
                None => println!("no upcoming reminder ({trigger})"),
            }
        }
        ReminderAction::AcceptSuggestion => {
            let mut config = Config::load()?;
            match config.accept_suggestion() {
                Some(applied) => {
                    config.save()?;
                    schedule_custom(&config);
                    println!("reminder time set to {}", local_hhmm(applied.reminder_time));
                }
                None => println!("no suggestion yet"),
            }
        }
    }
    Ok(())
}

/// Replace the per-day custom reminder. Failures are logged only.
fn schedule_custom(config: &Config) {
    let request = match NotificationRequest::custom_reminder(config, &Local) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Notification scheduling error");
            return;
        }
    };
    match FileNotificationCenter::open() {
        Ok(mut center) => {
            request_authorization_or_log(&mut center);
            schedule_or_log(&mut center, request);
        }
        Err(e) => warn!(error = %e, "Notification scheduling error"),
    }
}

fn print_suggestion(config: &Config, suggestion: &Suggestion) {
    let lang = config.ui.language;
    println!();
    println!("{}", localize(lang, "Smart Reminder Suggestion"));
    println!(
        "{}",
        localize(
            lang,
            "We noticed you often set reminders around this time. Would you like to set this as your default reminder time?"
        )
    );
    println!(
        "  {} ({} saves) -- run `garbage-reminder reminder accept-suggestion`",
        local_hhmm(suggestion.reminder_time),
        suggestion.supporting_entries
    );
}
