//! Codec between a form's Gregorian storage value and the Persian text shown
//! in a date field.
//!
//! Storage is always a Gregorian [`NaiveDate`]; the field shows the Jalali
//! date as `YYYY/MM/DD` with Persian digits and a four-digit year.

use chrono::NaiveDate;

use crate::calendar::JalaliDate;
use crate::error::Result;
use crate::format::{parse_date, to_persian_digits};

/// Field text for a stored Gregorian date, e.g. `۱۴۰۳/۰۷/۰۱`.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`](crate::CalendarError::OutOfRange)
/// if the date precedes the Jalali epoch or lies past the supported range.
pub fn display_value(date: NaiveDate) -> Result<String> {
    let jalali = JalaliDate::from_gregorian(date)?;
    let text = format!(
        "{:04}/{:02}/{:02}",
        jalali.year(),
        jalali.month(),
        jalali.day()
    );
    Ok(to_persian_digits(&text))
}

/// Field text for a raw stored value.
///
/// Text that already contains `/` is taken to be in field form and returned
/// as-is; an ISO `YYYY-MM-DD` value is converted. Anything else is echoed
/// back unchanged so the user can see and correct it.
pub fn display_value_from_str(value: &str) -> String {
    if value.contains('/') {
        return value.to_string();
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| display_value(date).ok())
        .unwrap_or_else(|| value.to_string())
}

/// Gregorian date to store for submitted field text.
///
/// Returns `None` for empty or malformed text.
///
/// ```
/// use chrono::NaiveDate;
/// use jalali_engine::field::storage_value;
///
/// assert_eq!(storage_value("۱۴۰۳/۰۱/۰۱"), NaiveDate::from_ymd_opt(2024, 3, 20));
/// assert_eq!(storage_value(""), None);
/// ```
pub fn storage_value(text: &str) -> Option<NaiveDate> {
    parse_date(text).map(|date| date.to_gregorian())
}
