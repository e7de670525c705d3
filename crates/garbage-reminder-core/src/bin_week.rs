//! Which bins go out this week.
//!
//! Collection alternates every week: even week numbers are recycling weeks,
//! odd week numbers are general waste weeks. Green waste goes out every week.
//!
//! Week numbers reset at year boundaries and are not normalized, so two odd
//! weeks can follow each other (ISO week 53 then week 1).

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::i18n::{localize, Language};

/// How week-of-year numbers are counted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekNumbering {
    /// ISO 8601: weeks start on Monday, week 1 holds the first Thursday.
    #[default]
    Iso,
    /// Weeks start on Sunday and week 1 is the week holding 1 January.
    /// A late-December week that already holds next 1 January is week 1.
    Gregorian,
}

impl WeekNumbering {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekNumbering::Iso => "iso",
            WeekNumbering::Gregorian => "gregorian",
        }
    }
}

impl FromStr for WeekNumbering {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iso" => Ok(WeekNumbering::Iso),
            "gregorian" => Ok(WeekNumbering::Gregorian),
            other => Err(ValidationError::InvalidValue {
                field: "week_numbering".into(),
                message: format!("expected 'iso' or 'gregorian', got '{other}'"),
            }),
        }
    }
}

/// The two bin combinations that alternate week by week.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BinLabel {
    RecyclableAndGreen,
    GeneralAndGreen,
}

impl BinLabel {
    /// The fixed English label.
    pub fn message(&self) -> &'static str {
        match self {
            BinLabel::RecyclableAndGreen => "Recyclable Waste & Green Waste",
            BinLabel::GeneralAndGreen => "General Waste & Green Waste",
        }
    }

    /// Localized "This Week: ..." line shown on the home screen and used as
    /// the notification body.
    pub fn this_week_message(&self, lang: Language) -> &'static str {
        let key = match self {
            BinLabel::RecyclableAndGreen => "This Week: Recyclable Waste & Green Waste",
            BinLabel::GeneralAndGreen => "This Week: General Waste & Green Waste",
        };
        localize(lang, key)
    }

    /// The label of the following (or previous) week.
    pub fn next(&self) -> BinLabel {
        match self {
            BinLabel::RecyclableAndGreen => BinLabel::GeneralAndGreen,
            BinLabel::GeneralAndGreen => BinLabel::RecyclableAndGreen,
        }
    }
}

impl fmt::Display for BinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Week-of-year number of `date` under `numbering`.
pub fn week_of_year(date: NaiveDate, numbering: WeekNumbering) -> u32 {
    match numbering {
        WeekNumbering::Iso => date.iso_week().week(),
        WeekNumbering::Gregorian => gregorian_week(date),
    }
}

fn gregorian_week(date: NaiveDate) -> u32 {
    let week_start = date - Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    let week_end = week_start + Duration::days(6);
    if week_end.year() > date.year() {
        return 1;
    }

    let jan1 = date - Duration::days(i64::from(date.ordinal0()));
    let offset = jan1.weekday().num_days_from_sunday();
    (date.ordinal0() + offset) / 7 + 1
}

/// Bin label for the week containing `date`.
pub fn bin_for_date(date: NaiveDate, numbering: WeekNumbering) -> BinLabel {
    if week_of_year(date, numbering) % 2 == 0 {
        BinLabel::RecyclableAndGreen
    } else {
        BinLabel::GeneralAndGreen
    }
}
