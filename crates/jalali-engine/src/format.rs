//! Text rendering and parsing of Jalali dates.
//!
//! The numeric field format is `year/month/day` with month and day padded to
//! two digits. Persian digit glyphs (۰–۹) map one-for-one onto ASCII digits
//! in both directions; parsing also accepts Arabic-Indic digits (٠–٩), which
//! some keyboards emit.
//!
//! Besides the numeric form, [`DateStyle`] covers the named layouts used in
//! page templates (`1 مهر 1403`, `یکشنبه 1 مهر 1403`, …).

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{day_of_week, JalaliDate};
use crate::error::{CalendarError, Result};

/// Persian digit glyphs, indexed by value.
pub const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Arabic-Indic digit glyphs, indexed by value.
const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Persian month names, Farvardin first.
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Conventional Latin transliteration of [`MONTH_NAMES`].
pub const MONTH_NAMES_LATIN: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

/// Persian weekday names, Saturday first (matches [`day_of_week`]).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه‌شنبه",
    "چهارشنبه",
    "پنج‌شنبه",
    "جمعه",
];

/// Single-letter column headers for a Saturday-first month grid.
pub const WEEKDAY_INITIALS: [&str; 7] = ["ش", "ی", "د", "س", "چ", "پ", "ج"];

/// Persian name of `month` (1–12).
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize).copied())
}

/// Latin name of `month` (1–12).
pub fn month_name_latin(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES_LATIN.get(i as usize).copied())
}

/// Persian name of a weekday index (0 = Saturday).
pub fn weekday_name(index: u32) -> Option<&'static str> {
    WEEKDAY_NAMES.get(index as usize).copied()
}

// ── Digits ──────────────────────────────────────────────────────────────────

/// Replace every ASCII digit with its Persian glyph. Other characters pass
/// through unchanged.
///
/// ```
/// use jalali_engine::format::to_persian_digits;
///
/// assert_eq!(to_persian_digits("1403/07/01"), "۱۴۰۳/۰۷/۰۱");
/// ```
pub fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => PERSIAN_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Replace every Persian or Arabic-Indic digit with its ASCII digit.
pub fn to_ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .position(|&p| p == c)
                .or_else(|| ARABIC_INDIC_DIGITS.iter().position(|&a| a == c))
                .and_then(|d| char::from_digit(d as u32, 10))
                .unwrap_or(c)
        })
        .collect()
}

fn localize(text: String, localized_digits: bool) -> String {
    if localized_digits {
        to_persian_digits(&text)
    } else {
        text
    }
}

// ── Numeric format ──────────────────────────────────────────────────────────

/// Format as `year/MM/DD`, optionally with Persian digits.
///
/// ```
/// use jalali_engine::{format_date, JalaliDate};
///
/// let date = JalaliDate::new(1403, 7, 1).unwrap();
/// assert_eq!(format_date(&date, true), "۱۴۰۳/۰۷/۰۱");
/// assert_eq!(format_date(&date, false), "1403/07/01");
/// ```
pub fn format_date(date: &JalaliDate, localized_digits: bool) -> String {
    localize(date.to_string(), localized_digits)
}

/// Parse `year/month/day` text, Persian or ASCII digits.
///
/// Returns `None` if the text does not have exactly three `/`-separated
/// numeric parts, if any part is zero, or if the parts do not name a real
/// Jalali day (month above 12, day beyond the month length, unsupported
/// year). Use [`str::parse`] for the reason a string was rejected.
///
/// ```
/// use jalali_engine::parse_date;
///
/// assert!(parse_date("۱۴۰۳/۰۷/۰۱").is_some());
/// assert!(parse_date("1403/07").is_none());
/// assert!(parse_date("1403/07/35").is_none());
/// ```
pub fn parse_date(text: &str) -> Option<JalaliDate> {
    text.parse().ok()
}

impl FromStr for JalaliDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        let ascii = to_ascii_digits(s.trim());
        let parts: Vec<&str> = ascii.split('/').collect();
        if parts.len() != 3 {
            return Err(CalendarError::Parse(format!(
                "expected year/month/day, got '{}'",
                s.trim()
            )));
        }

        let year = parse_part(parts[0], s)?;
        let month = parse_part(parts[1], s)?;
        let day = parse_part(parts[2], s)?;
        let year = i32::try_from(year).map_err(|_| CalendarError::Parse(format!("'{s}'")))?;
        JalaliDate::new(year, month, day)
    }
}

/// One numeric, non-zero component of a date string.
fn parse_part(part: &str, input: &str) -> Result<u32> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalendarError::Parse(format!(
            "'{}' is not numeric in '{}'",
            part,
            input.trim()
        )));
    }
    match part.parse::<u32>() {
        Ok(0) => Err(CalendarError::Parse(format!(
            "zero component in '{}'",
            input.trim()
        ))),
        Ok(n) => Ok(n),
        Err(_) => Err(CalendarError::Parse(format!(
            "'{}' is too large in '{}'",
            part,
            input.trim()
        ))),
    }
}

// ── Named styles ────────────────────────────────────────────────────────────

/// Layouts for displaying a date in running text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `1403/07/01`
    #[default]
    Numeric,
    /// `1 مهر 1403`
    DayMonthYear,
    /// `یکشنبه 1 مهر 1403`
    WeekdayDayMonthYear,
    /// `مهر 1403`
    MonthYear,
    /// `1 مهر`
    DayMonth,
}

/// Format `date` in one of the named [`DateStyle`] layouts.
///
/// ```
/// use jalali_engine::format::{format_styled, DateStyle};
/// use jalali_engine::JalaliDate;
///
/// let date = JalaliDate::new(1403, 7, 1).unwrap();
/// assert_eq!(format_styled(&date, DateStyle::DayMonthYear, false), "1 مهر 1403");
/// ```
pub fn format_styled(date: &JalaliDate, style: DateStyle, localized_digits: bool) -> String {
    let month = month_name(date.month()).unwrap_or_default();
    let text = match style {
        DateStyle::Numeric => date.to_string(),
        DateStyle::DayMonthYear => format!("{} {} {}", date.day(), month, date.year()),
        DateStyle::WeekdayDayMonthYear => {
            let weekday = weekday_name(day_of_week(date)).unwrap_or_default();
            format!("{} {} {} {}", weekday, date.day(), month, date.year())
        }
        DateStyle::MonthYear => format!("{} {}", month, date.year()),
        DateStyle::DayMonth => format!("{} {}", date.day(), month),
    };
    localize(text, localized_digits)
}

/// Convert a Gregorian date and format it in `style`.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] for Gregorian dates outside the
/// supported range.
pub fn format_gregorian(
    date: NaiveDate,
    style: DateStyle,
    localized_digits: bool,
) -> Result<String> {
    let jalali = JalaliDate::from_gregorian(date)?;
    Ok(format_styled(&jalali, style, localized_digits))
}

/// Grid header for the month containing `view`, e.g. `مهر ۱۴۰۳`.
pub fn month_title(view: &JalaliDate, localized_digits: bool) -> String {
    format_styled(view, DateStyle::MonthYear, localized_digits)
}
