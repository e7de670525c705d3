use chrono::{Local, NaiveDate};
use garbage_reminder_core::{week_of_year, Config};
use serde::Serialize;

#[derive(Serialize)]
struct WeekReport {
    date: NaiveDate,
    week: u32,
    numbering: &'static str,
    label: garbage_reminder_core::BinLabel,
    message: String,
}

pub fn run(date: Option<NaiveDate>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let numbering = config.ui.week_numbering;
    let label = config.bin_label_for(date);

    if json {
        let report = WeekReport {
            date,
            week: week_of_year(date, numbering),
            numbering: numbering.as_str(),
            label,
            message: label.message().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", label.this_week_message(config.ui.language));
    }
    Ok(())
}
