use chrono::Local;
use garbage_reminder_core::widget::{render_text, snapshot, timeline, Palette};
use garbage_reminder_core::{Config, Timeline};
use serde::Serialize;

#[derive(Serialize)]
struct WidgetReport {
    theme: &'static str,
    opacity: f64,
    palette: Palette,
    timeline: Timeline,
}

pub fn run(hours: u32, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let ui = &config.ui;
    let now = Local::now();

    if json {
        let report = WidgetReport {
            theme: ui.theme.name(),
            opacity: ui.widget_opacity,
            palette: ui.theme.palette(),
            timeline: timeline(now, hours, ui.week_numbering, ui.language),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let entry = snapshot(now, ui.week_numbering, ui.language);
        println!("{}", render_text(&entry, ui.theme, ui.widget_opacity, ui.language));
    }
    Ok(())
}
