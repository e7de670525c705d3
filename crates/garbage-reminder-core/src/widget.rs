//! Home-screen widget timeline and theming.
//!
//! The widget refreshes on an hourly timeline. Every entry carries the same
//! bin message for the week the entry falls in, so a timeline that crosses a
//! week boundary switches message at the boundary.

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::bin_week::{bin_for_date, WeekNumbering};
use crate::error::ValidationError;
use crate::i18n::{localize, Language};

/// Widget title.
pub const WIDGET_TITLE: &str = "Garbage Bin Reminder";

/// Number of hourly entries in a regular timeline.
pub const DEFAULT_TIMELINE_HOURS: u32 = 24;

/// Message shown before the first timeline is ready.
pub const PLACEHOLDER_MESSAGE: &str = "Loading...";

/// Widget colour scheme.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum WidgetTheme {
    #[default]
    Light,
    Dark,
}

impl WidgetTheme {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetTheme::Light => "Light",
            WidgetTheme::Dark => "Dark",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            WidgetTheme::Light => Palette {
                gradient: [Rgb(220, 240, 255), Rgb(245, 245, 245)],
                message_background: Rgb(173, 216, 230),
                message_background_opacity: 0.7,
                font: Rgb(60, 60, 60),
            },
            WidgetTheme::Dark => Palette {
                gradient: [Rgb(15, 30, 60), Rgb(45, 15, 75)],
                message_background: Rgb(15, 30, 60),
                message_background_opacity: 0.7,
                font: Rgb(255, 255, 255),
            },
        }
    }
}

impl fmt::Display for WidgetTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidgetTheme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(WidgetTheme::Light),
            "dark" => Ok(WidgetTheme::Dark),
            other => Err(ValidationError::InvalidValue {
                field: "theme".into(),
                message: format!("expected 'Light' or 'Dark', got '{other}'"),
            }),
        }
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colours used to draw the widget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Palette {
    /// Background gradient, top-leading to bottom-trailing.
    pub gradient: [Rgb; 2],
    pub message_background: Rgb,
    pub message_background_opacity: f64,
    pub font: Rgb,
}

/// One widget snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    pub date: DateTime<FixedOffset>,
    pub bin_message: String,
}

/// When the host should ask for a fresh timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReloadPolicy {
    /// Reload after the last entry's date has passed.
    AtEnd,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    pub policy: ReloadPolicy,
}

/// Entry shown while the widget is loading.
pub fn placeholder<Tz: TimeZone>(now: DateTime<Tz>, lang: Language) -> TimelineEntry {
    TimelineEntry {
        date: now.fixed_offset(),
        bin_message: localize(lang, PLACEHOLDER_MESSAGE).to_string(),
    }
}

/// Snapshot for `now`.
pub fn snapshot<Tz: TimeZone>(
    now: DateTime<Tz>,
    numbering: WeekNumbering,
    lang: Language,
) -> TimelineEntry {
    let now = now.fixed_offset();
    let label = bin_for_date(now.date_naive(), numbering);
    TimelineEntry {
        bin_message: localize(lang, label.message()).to_string(),
        date: now,
    }
}

/// `hours` hourly entries starting at `now`.
pub fn timeline<Tz: TimeZone>(
    now: DateTime<Tz>,
    hours: u32,
    numbering: WeekNumbering,
    lang: Language,
) -> Timeline {
    let now = now.fixed_offset();
    let entries = (0..hours)
        .map(|offset| snapshot(now + Duration::hours(i64::from(offset)), numbering, lang))
        .collect();
    Timeline {
        entries,
        policy: ReloadPolicy::AtEnd,
    }
}

/// Text card used by the CLI in place of the graphical widget.
///
/// The card itself is plain text; the trailing lines report the theme
/// colours. `opacity` is the background alpha.
pub fn render_text(
    entry: &TimelineEntry,
    theme: WidgetTheme,
    opacity: f64,
    lang: Language,
) -> String {
    let title = localize(lang, WIDGET_TITLE);
    let width = title
        .chars()
        .count()
        .max(entry.bin_message.chars().count())
        + 4;
    let palette = theme.palette();
    let border = format!("+{}+", "-".repeat(width));

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for line in [title, entry.bin_message.as_str()] {
        let pad = width - line.chars().count();
        let left = pad / 2;
        out.push_str(&format!(
            "|{}{}{}|\n",
            " ".repeat(left),
            line,
            " ".repeat(pad - left)
        ));
    }
    out.push_str(&border);
    out.push('\n');
    out.push_str(&format!(
        "theme: {} (background {} -> {}, alpha {:.2})",
        localize(lang, theme.name()),
        palette.gradient[0].hex(),
        palette.gradient[1].hex(),
        opacity.clamp(0.0, 1.0)
    ));
    out.push('\n');
    out.push_str(&format!(
        "message: {} on {} (alpha {:.2})",
        palette.font.hex(),
        palette.message_background.hex(),
        palette.message_background_opacity
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn timeline_has_hourly_entries_and_reloads_at_end() {
        let now = Utc.with_ymd_and_hms(2024, 8, 15, 9, 0, 0).unwrap();
        let tl = timeline(now, DEFAULT_TIMELINE_HOURS, WeekNumbering::Iso, Language::En);
        assert_eq!(tl.entries.len(), 24);
        assert_eq!(tl.policy, ReloadPolicy::AtEnd);
        assert_eq!(tl.entries[0].date, now);
        assert_eq!(tl.entries[23].date, now + Duration::hours(23));
        assert!(tl
            .entries
            .iter()
            .all(|e| e.bin_message == "General Waste & Green Waste"));
    }

    #[test]
    fn timeline_switches_message_at_week_boundary() {
        // Sunday 18 August 2024 22:00 (ISO week 33) rolls into Monday, week 34.
        let offset = FixedOffset::east_opt(10 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 8, 18, 22, 0, 0).unwrap();
        let tl = timeline(now, 4, WeekNumbering::Iso, Language::En);
        assert_eq!(tl.entries[1].bin_message, "General Waste & Green Waste");
        assert_eq!(tl.entries[2].bin_message, "Recyclable Waste & Green Waste");
    }

    #[test]
    fn placeholder_is_localized() {
        let now = Utc.with_ymd_and_hms(2024, 8, 15, 9, 0, 0).unwrap();
        assert_eq!(placeholder(now, Language::En).bin_message, "Loading...");
        assert_eq!(placeholder(now, Language::Es).bin_message, "Cargando...");
    }

    #[test]
    fn dark_theme_uses_white_text() {
        assert_eq!(WidgetTheme::Dark.palette().font, Rgb(255, 255, 255));
        assert_eq!(WidgetTheme::Light.palette().font.hex(), "#3c3c3c");
        assert_eq!(WidgetTheme::Light.palette().gradient[0].hex(), "#dcf0ff");
    }

    #[test]
    fn theme_names_parse() {
        assert_eq!("dark".parse::<WidgetTheme>().unwrap(), WidgetTheme::Dark);
        assert_eq!("Light".parse::<WidgetTheme>().unwrap(), WidgetTheme::Light);
        assert!("sepia".parse::<WidgetTheme>().is_err());
    }

    #[test]
    fn rendered_card_contains_title_and_message() {
        let now = Utc.with_ymd_and_hms(2024, 8, 22, 9, 0, 0).unwrap();
        let entry = snapshot(now, WeekNumbering::Iso, Language::En);
        let card = render_text(&entry, WidgetTheme::Dark, 0.8, Language::En);
        assert!(card.contains("Garbage Bin Reminder"));
        assert!(card.contains("Recyclable Waste & Green Waste"));
        assert!(card.contains("alpha 0.80"));
        assert!(card.contains("#0f1e3c"));
        assert!(card.contains("message: #ffffff on #0f1e3c (alpha 0.70)"));
    }

    #[test]
    fn light_card_reports_its_own_message_colours() {
        let now = Utc.with_ymd_and_hms(2024, 8, 22, 9, 0, 0).unwrap();
        let entry = snapshot(now, WeekNumbering::Iso, Language::En);
        let light = render_text(&entry, WidgetTheme::Light, 0.8, Language::En);
        let dark = render_text(&entry, WidgetTheme::Dark, 0.8, Language::En);
        assert!(light.contains("message: #3c3c3c on #add8e6 (alpha 0.70)"));
        assert_ne!(light.lines().last(), dark.lines().last());
    }
}
