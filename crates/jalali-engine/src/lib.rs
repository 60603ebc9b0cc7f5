//! # jalali-engine
//!
//! Jalali (Solar Hijri) calendar arithmetic and date-picker state.
//!
//! The engine converts between the Jalali and Gregorian calendars using the
//! break-point leap-year table, lays out Saturday-first month grids, and
//! renders and parses dates with Persian digits. Everything here is pure and
//! synchronous; the only clock read is [`today`].
//!
//! ## Modules
//!
//! - [`calendar`] — `JalaliDate`, Gregorian ↔ Jalali conversion, leap years, weekdays
//! - [`navigation`] — 42-cell month grids and month stepping
//! - [`format`] — Persian digits, month/weekday names, numeric and named date styles, parsing
//! - [`field`] — Gregorian storage value ↔ Persian input text
//! - [`view`] — `CalendarView` widget state machine and `PickerOptions`
//! - [`error`] — Error types

pub mod calendar;
pub mod error;
pub mod field;
pub mod format;
pub mod navigation;
pub mod view;

pub use calendar::{
    day_of_week, days_in_month, gregorian_to_jalali, is_leap_year, jalali_to_gregorian, today,
    JalaliDate, MAX_YEAR, MIN_YEAR,
};
pub use error::CalendarError;
pub use field::{display_value, storage_value};
pub use format::{format_date, format_gregorian, format_styled, month_title, parse_date, DateStyle};
pub use navigation::{
    build_month_grid, build_month_grid_with_bounds, step_month, GridCell, GRID_CELLS, GRID_COLUMNS,
};
pub use view::{CalendarView, Change, PickerKind, PickerOptions};
