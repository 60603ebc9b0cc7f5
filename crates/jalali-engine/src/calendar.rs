//! Deterministic Jalali (Persian solar) calendar arithmetic.
//!
//! Provides the [`JalaliDate`] value type and pure functions for
//! Gregorian↔Jalali conversion, leap-year determination, month lengths and
//! day-of-week derivation. Apart from [`today`], nothing here reads the
//! system clock: callers pass dates in explicitly, keeping every function
//! testable and WASM-compatible.
//!
//! # Leap years
//!
//! Jalali leap years do not follow a fixed periodic rule. The year is split
//! into intercalation sub-cycles starting at the years listed in
//! [`BREAKS`]; inside a sub-cycle leap years recur every four years (with a
//! 33-year phase), except in the truncated tail just before the next break,
//! where the offset is re-based. The same walk over the table yields the
//! Gregorian day in March on which 1 Farvardin falls, and both conversions
//! are built on that single anchor. Leap years, month lengths and
//! conversions therefore always agree.
//!
//! # Functions
//!
//! - [`today`] — the current local date as a [`JalaliDate`]
//! - [`gregorian_to_jalali`] — Gregorian (year, month, day) → [`JalaliDate`]
//! - [`jalali_to_gregorian`] — Jalali (year, month, day) → [`NaiveDate`]
//! - [`is_leap_year`] — break-table leap test
//! - [`days_in_month`] — 31 / 30 / 29–30 month lengths
//! - [`day_of_week`] — 0 = Saturday … 6 = Friday

use std::fmt;

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// First Jalali year accepted by the validating constructors.
pub const MIN_YEAR: i32 = 1;

/// Last Jalali year accepted by the validating constructors.
///
/// The break table ends at 3178, and converting the first months of a
/// Gregorian year needs the following Jalali year's anchor, so the last
/// fully convertible year is 3176.
pub const MAX_YEAR: i32 = 3176;

/// Jalali years at which a new intercalation sub-cycle begins.
///
/// Valid for Jalali years `-61 ..= 3177`.
pub const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Length of the first half of the year (six 31-day months).
const FIRST_HALF_DAYS: u32 = 186;

// ── JalaliDate ──────────────────────────────────────────────────────────────

/// A validated date in the Jalali calendar.
///
/// Values are immutable and compared field-wise; ordering is chronological.
/// Every constructor checks `1 ≤ month ≤ 12`, `1 ≤ day ≤ days_in_month` and
/// the supported year range, so a `JalaliDate` is always a real day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "DateParts")]
pub struct JalaliDate {
    year: i32,
    month: u32,
    day: u32,
}

/// Unvalidated wire form used when deserializing a [`JalaliDate`].
#[derive(Deserialize)]
struct DateParts {
    year: i32,
    month: u32,
    day: u32,
}

impl TryFrom<DateParts> for JalaliDate {
    type Error = CalendarError;

    fn try_from(parts: DateParts) -> Result<Self> {
        JalaliDate::new(parts.year, parts.month, parts.day)
    }
}

impl JalaliDate {
    /// Build a date, rejecting anything that is not a real Jalali day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if `year` is outside
    /// [`MIN_YEAR`]`..=`[`MAX_YEAR`], or [`CalendarError::InvalidDate`] if the
    /// month or day does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use jalali_engine::JalaliDate;
    ///
    /// assert!(JalaliDate::new(1403, 12, 30).is_ok()); // 1403 is leap
    /// assert!(JalaliDate::new(1404, 12, 30).is_err());
    /// ```
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::OutOfRange(year));
        }
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidDate(format!(
                "{year}/{month:02}/{day:02}: month must be 1-12"
            )));
        }
        let max_day = days_in_month(year, month);
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDate(format!(
                "{year}/{month:02}/{day:02}: day must be 1-{max_day}"
            )));
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Day 1 of this date's month.
    pub fn first_of_month(&self) -> Self {
        Self { day: 1, ..*self }
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    /// Day of the year, starting at 1 for 1 Farvardin.
    pub fn ordinal(&self) -> u32 {
        self.ordinal0() + 1
    }

    /// Zero-based day of the year.
    fn ordinal0(&self) -> u32 {
        if self.month <= 6 {
            (self.month - 1) * 31 + self.day - 1
        } else {
            FIRST_HALF_DAYS + (self.month - 7) * 30 + self.day - 1
        }
    }

    /// Weekday index, 0 = Saturday … 6 = Friday.
    pub fn weekday(&self) -> u32 {
        day_of_week(self)
    }

    /// Convert to the proleptic Gregorian calendar.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use jalali_engine::JalaliDate;
    ///
    /// let nowruz = JalaliDate::new(1403, 1, 1).unwrap();
    /// assert_eq!(nowruz.to_gregorian(), NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
    /// ```
    pub fn to_gregorian(&self) -> NaiveDate {
        // Constructors keep the year inside the break table, so the anchor exists.
        let anchor = nowruz(self.year).unwrap_or(NaiveDate::MIN);
        anchor + Days::new(u64::from(self.ordinal0()))
    }

    /// Convert a proleptic Gregorian date.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the date falls outside the
    /// supported Jalali years (before 622-03-22 or after 3798-03-19).
    pub fn from_gregorian(date: NaiveDate) -> Result<Self> {
        let mut year = date.year() - 621;
        let mut anchor = nowruz(year).ok_or(CalendarError::OutOfRange(year))?;
        if date < anchor {
            year -= 1;
            anchor = nowruz(year).ok_or(CalendarError::OutOfRange(year))?;
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::OutOfRange(year));
        }

        // The next anchor is always in the following Gregorian March, so the
        // offset is below the year length.
        let offset = (date - anchor).num_days() as u32;
        let (month, day) = if offset < FIRST_HALF_DAYS {
            (1 + offset / 31, offset % 31 + 1)
        } else {
            let rest = offset - FIRST_HALF_DAYS;
            (7 + rest / 30, rest % 30 + 1)
        };
        Ok(Self { year, month, day })
    }
}

impl fmt::Display for JalaliDate {
    /// ASCII numeric form, `YYYY/MM/DD`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

// ── Public engine functions ─────────────────────────────────────────────────

/// Today's date according to the local system clock.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] only if the clock reports a date
/// outside the supported range.
pub fn today() -> Result<JalaliDate> {
    JalaliDate::from_gregorian(Local::now().date_naive())
}

/// Convert a Gregorian calendar date to Jalali.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidGregorian`] if the Gregorian date does not
/// exist (e.g. February 30, or February 29 of a common year), or
/// [`CalendarError::OutOfRange`] if it maps outside the supported years.
///
/// # Examples
///
/// ```
/// use jalali_engine::gregorian_to_jalali;
///
/// let mehr = gregorian_to_jalali(2024, 9, 22).unwrap();
/// assert_eq!((mehr.year(), mehr.month(), mehr.day()), (1403, 7, 1));
/// ```
pub fn gregorian_to_jalali(year: i32, month: u32, day: u32) -> Result<JalaliDate> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        CalendarError::InvalidGregorian(format!("{year:04}-{month:02}-{day:02}"))
    })?;
    JalaliDate::from_gregorian(date)
}

/// Convert a Jalali calendar date to Gregorian.
///
/// # Errors
///
/// Returns the same errors as [`JalaliDate::new`] for dates that do not exist.
pub fn jalali_to_gregorian(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    Ok(JalaliDate::new(year, month, day)?.to_gregorian())
}

/// Whether `year` has 366 days (Esfand 30 exists).
///
/// Years outside the break table are reported as common years.
///
/// ```
/// use jalali_engine::is_leap_year;
///
/// assert!(is_leap_year(1403));
/// assert!(!is_leap_year(1404));
/// assert!(is_leap_year(1408)); // five years later: sub-cycle phase shift
/// ```
pub fn is_leap_year(year: i32) -> bool {
    year_anchor(year).is_some_and(|anchor| anchor.leap)
}

/// Number of days in `month` of `year`.
///
/// Farvardin..Shahrivar have 31 days, Mehr..Bahman 30, and Esfand 29 or 30.
/// Returns 0 for a month outside 1–12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        12 if is_leap_year(year) => 30,
        12 => 29,
        _ => 0,
    }
}

/// Weekday of `date`, 0 = Saturday (شنبه) … 6 = Friday (جمعه).
pub fn day_of_week(date: &JalaliDate) -> u32 {
    (date.to_gregorian().weekday().num_days_from_sunday() + 1) % 7
}

// ── Break-table walk ────────────────────────────────────────────────────────

/// What the break table says about one Jalali year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearAnchor {
    /// Whether the year has 366 days.
    leap: bool,
    /// Gregorian year in which the Jalali year starts.
    gregorian_year: i32,
    /// Day of Gregorian March on which 1 Farvardin falls.
    march_day: u32,
}

/// Walk the break table for `year`. `None` outside `-61 ..= 3177`.
fn year_anchor(year: i32) -> Option<YearAnchor> {
    let last = BREAKS[BREAKS.len() - 1];
    if year < BREAKS[0] || year >= last {
        return None;
    }

    // Jalali leap days accumulated since 621 CE, sub-cycle by sub-cycle.
    let mut leap_days = -14;
    let mut start = BREAKS[0];
    let mut jump = 0;
    for &next in &BREAKS[1..] {
        jump = next - start;
        if year < next {
            break;
        }
        leap_days += jump / 33 * 8 + (jump % 33) / 4;
        start = next;
    }

    let mut offset = year - start;
    leap_days += offset / 33 * 8 + (offset % 33 + 3) / 4;
    if jump % 33 == 4 && jump - offset == 4 {
        leap_days += 1;
    }

    let gregorian_year = year + 621;
    let gregorian_leap_days = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_days - gregorian_leap_days;

    // Truncated tail of a sub-cycle: count from the adjusted offset.
    if jump - offset < 6 {
        offset = offset - jump + (jump + 4) / 33 * 33;
    }
    let leap = ((offset + 1) % 33 - 1) % 4 == 0;

    Some(YearAnchor {
        leap,
        gregorian_year,
        march_day: march_day as u32,
    })
}

/// Gregorian date of 1 Farvardin of `year`.
fn nowruz(year: i32) -> Option<NaiveDate> {
    let anchor = year_anchor(year)?;
    NaiveDate::from_ymd_opt(anchor.gregorian_year, 3, anchor.march_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gregorian(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn jalali(y: i32, m: u32, d: u32) -> JalaliDate {
        JalaliDate::new(y, m, d).unwrap()
    }

    // ── Conversion tests ────────────────────────────────────────────────

    #[test]
    fn test_gregorian_to_jalali_first_of_mehr() {
        assert_eq!(gregorian_to_jalali(2024, 9, 22).unwrap(), jalali(1403, 7, 1));
    }

    #[test]
    fn test_jalali_to_gregorian_nowruz_1403() {
        assert_eq!(jalali_to_gregorian(1403, 1, 1).unwrap(), gregorian(2024, 3, 20));
    }

    #[test]
    fn test_nowruz_dates_around_present() {
        // 1 Farvardin moves between March 20 and 21 with the leap pattern.
        assert_eq!(jalali(1402, 1, 1).to_gregorian(), gregorian(2023, 3, 21));
        assert_eq!(jalali(1404, 1, 1).to_gregorian(), gregorian(2025, 3, 21));
        assert_eq!(jalali(1405, 1, 1).to_gregorian(), gregorian(2026, 3, 21));
    }

    #[test]
    fn test_last_day_of_leap_year() {
        assert_eq!(jalali(1403, 12, 30).to_gregorian(), gregorian(2025, 3, 20));
        assert_eq!(gregorian_to_jalali(2025, 3, 20).unwrap(), jalali(1403, 12, 30));
    }

    #[test]
    fn test_day_before_nowruz_belongs_to_previous_year() {
        assert_eq!(gregorian_to_jalali(2024, 3, 19).unwrap(), jalali(1402, 12, 29));
    }

    #[test]
    fn test_gregorian_leap_day() {
        assert_eq!(gregorian_to_jalali(2024, 2, 29).unwrap(), jalali(1402, 12, 10));
        assert_eq!(gregorian_to_jalali(2000, 2, 29).unwrap(), jalali(1378, 12, 10));
    }

    #[test]
    fn test_gregorian_century_non_leap() {
        // 1900 is not a Gregorian leap year; Feb 28 → Mar 1 is one day.
        let feb28 = gregorian_to_jalali(1900, 2, 28).unwrap();
        let mar1 = gregorian_to_jalali(1900, 3, 1).unwrap();
        assert_eq!(feb28, jalali(1278, 12, 9));
        assert_eq!(mar1, jalali(1278, 12, 10));
    }

    #[test]
    fn test_epoch() {
        assert_eq!(jalali(1, 1, 1).to_gregorian(), gregorian(622, 3, 22));
        assert_eq!(gregorian_to_jalali(622, 3, 22).unwrap(), jalali(1, 1, 1));
    }

    #[test]
    fn test_before_epoch_is_out_of_range() {
        let err = gregorian_to_jalali(622, 3, 21).unwrap_err();
        assert_eq!(err, CalendarError::OutOfRange(0));
    }

    #[test]
    fn test_far_future_is_out_of_range() {
        assert!(gregorian_to_jalali(3798, 3, 19).is_ok());
        assert_eq!(
            gregorian_to_jalali(3798, 3, 20).unwrap_err(),
            CalendarError::OutOfRange(3177)
        );
        assert_eq!(
            gregorian_to_jalali(3799, 1, 1).unwrap_err(),
            CalendarError::OutOfRange(3178)
        );
    }

    #[test]
    fn test_invalid_gregorian_input() {
        let err = gregorian_to_jalali(2023, 2, 29).unwrap_err();
        assert!(err.to_string().contains("Invalid Gregorian date"), "got: {err}");
        assert!(gregorian_to_jalali(2024, 13, 1).is_err());
    }

    // ── Leap-year tests ─────────────────────────────────────────────────

    #[test]
    fn test_leap_years_present_day() {
        let leaps: Vec<i32> = (1390..1420).filter(|y| is_leap_year(*y)).collect();
        assert_eq!(leaps, vec![1391, 1395, 1399, 1403, 1408, 1412, 1416]);
    }

    #[test]
    fn test_leap_year_matches_year_length() {
        for year in [1, 9, 38, 199, 1210, 1403, 1404, 1634, 2000, 3176] {
            let start = jalali(year, 1, 1).to_gregorian();
            let length = if year == MAX_YEAR {
                nowruz(year + 1).unwrap() - start
            } else {
                jalali(year + 1, 1, 1).to_gregorian() - start
            };
            let expected = if is_leap_year(year) { 366 } else { 365 };
            assert_eq!(length.num_days(), expected, "year {year}");
        }
    }

    #[test]
    fn test_leap_year_outside_table_is_common() {
        assert!(!is_leap_year(-100));
        assert!(!is_leap_year(3178));
        assert!(!is_leap_year(i32::MAX));
    }

    // ── Month length tests ──────────────────────────────────────────────

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(1403, 1), 31);
        assert_eq!(days_in_month(1403, 6), 31);
        assert_eq!(days_in_month(1403, 7), 30);
        assert_eq!(days_in_month(1403, 11), 30);
        assert_eq!(days_in_month(1403, 12), 30);
        assert_eq!(days_in_month(1404, 12), 29);
        assert_eq!(days_in_month(1404, 0), 0);
        assert_eq!(days_in_month(1404, 13), 0);
    }

    // ── Weekday tests ───────────────────────────────────────────────────

    #[test]
    fn test_day_of_week_saturday_first() {
        // 2024-09-22 was a Sunday.
        assert_eq!(day_of_week(&jalali(1403, 7, 1)), 1);
        // 2024-03-20 was a Wednesday.
        assert_eq!(day_of_week(&jalali(1403, 1, 1)), 4);
        // 2024-09-21 was a Saturday, 2024-09-27 a Friday.
        assert_eq!(jalali(1403, 6, 31).weekday(), 0);
        assert_eq!(jalali(1403, 7, 6).weekday(), 6);
    }

    // ── Constructor tests ───────────────────────────────────────────────

    #[test]
    fn test_new_rejects_invalid_parts() {
        assert!(matches!(JalaliDate::new(1403, 0, 1), Err(CalendarError::InvalidDate(_))));
        assert!(matches!(JalaliDate::new(1403, 13, 1), Err(CalendarError::InvalidDate(_))));
        assert!(matches!(JalaliDate::new(1403, 7, 31), Err(CalendarError::InvalidDate(_))));
        assert!(matches!(JalaliDate::new(1403, 1, 0), Err(CalendarError::InvalidDate(_))));
        assert_eq!(JalaliDate::new(0, 1, 1), Err(CalendarError::OutOfRange(0)));
        assert_eq!(
            JalaliDate::new(MAX_YEAR + 1, 1, 1),
            Err(CalendarError::OutOfRange(MAX_YEAR + 1))
        );
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(jalali(1403, 1, 1).ordinal(), 1);
        assert_eq!(jalali(1403, 7, 1).ordinal(), 187);
        assert_eq!(jalali(1403, 12, 30).ordinal(), 366);
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(jalali(1402, 12, 29) < jalali(1403, 1, 1));
        assert!(jalali(1403, 1, 31) < jalali(1403, 2, 1));
        assert!(jalali(1403, 2, 1) < jalali(1403, 2, 2));
    }

    #[test]
    fn test_display_is_ascii_numeric() {
        assert_eq!(jalali(1403, 7, 1).to_string(), "1403/07/01");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: JalaliDate = serde_json::from_str(r#"{"year":1403,"month":7,"day":1}"#).unwrap();
        assert_eq!(ok, jalali(1403, 7, 1));

        let bad = serde_json::from_str::<JalaliDate>(r#"{"year":1404,"month":12,"day":30}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_today_is_in_range() {
        let today = today().unwrap();
        assert!(today.year() >= 1400);
    }
}
