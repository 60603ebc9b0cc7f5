//! Month grids and month stepping for a date-picker view.
//!
//! A month is rendered as 6 rows × 7 columns, Saturday first. The grid is a
//! pure function of the viewed month, the selection and "today", so
//! rendering twice with the same inputs yields the same cells.

use serde::Serialize;

use crate::calendar::{day_of_week, days_in_month, JalaliDate};
use crate::error::{CalendarError, Result};

/// Cells in a month grid (6 weeks × 7 days).
pub const GRID_CELLS: usize = 42;

/// Columns in a month grid.
pub const GRID_COLUMNS: usize = 7;

/// Upper bound on next-month days appended after the viewed month.
const MAX_TRAILING_DAYS: usize = 14;

/// One day slot in a rendered month.
///
/// `year`/`month`/`day` are plain integers rather than a [`JalaliDate`]
/// because the leading cells of Farvardin 1 belong to year 0, which is
/// outside the constructible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridCell {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Whether the cell belongs to the viewed month.
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// Outside the picker's min/max bounds; never set by [`build_month_grid`].
    pub is_disabled: bool,
}

impl GridCell {
    /// The cell's date, if it is a constructible [`JalaliDate`].
    pub fn date(&self) -> Option<JalaliDate> {
        JalaliDate::new(self.year, self.month, self.day).ok()
    }
}

/// Inclusive selection bounds applied while building a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub min: Option<JalaliDate>,
    pub max: Option<JalaliDate>,
}

impl Bounds {
    fn excludes(&self, key: (i32, u32, u32)) -> bool {
        self.min.is_some_and(|min| key < date_key(&min))
            || self.max.is_some_and(|max| key > date_key(&max))
    }
}

fn date_key(date: &JalaliDate) -> (i32, u32, u32) {
    (date.year(), date.month(), date.day())
}

/// Build the 42-cell grid for the month containing `view`.
///
/// Leading cells are the last days of the previous month, one per weekday
/// before 1st of the month (so their count is `day_of_week(first_of_month)`).
/// Trailing cells continue into the next month, at most 14 of them.
///
/// ```
/// use jalali_engine::{build_month_grid, JalaliDate};
///
/// let mehr = JalaliDate::new(1403, 7, 1).unwrap();
/// let cells = build_month_grid(&mehr, None, &mehr);
/// assert_eq!(cells.len(), 42);
/// assert_eq!(cells.iter().filter(|c| c.is_today).count(), 1);
/// ```
pub fn build_month_grid(
    view: &JalaliDate,
    selected: Option<&JalaliDate>,
    today: &JalaliDate,
) -> Vec<GridCell> {
    build_grid(view, selected, today, Bounds::default())
}

/// [`build_month_grid`] with cells outside `min..=max` marked disabled.
///
/// The selection is marked even when it lies outside the bounds.
pub fn build_month_grid_with_bounds(
    view: &JalaliDate,
    selected: Option<&JalaliDate>,
    today: &JalaliDate,
    min: Option<JalaliDate>,
    max: Option<JalaliDate>,
) -> Vec<GridCell> {
    build_grid(view, selected, today, Bounds { min, max })
}

pub(crate) fn build_grid(
    view: &JalaliDate,
    selected: Option<&JalaliDate>,
    today: &JalaliDate,
    bounds: Bounds,
) -> Vec<GridCell> {
    let first = view.first_of_month();
    let (year, month) = (first.year(), first.month());
    let leading = day_of_week(&first) as usize;
    let length = days_in_month(year, month) as usize;

    let today_key = date_key(today);
    let selected_key = selected.map(date_key);
    let cell = |year: i32, month: u32, day: u32, in_current_month: bool| {
        let key = (year, month, day);
        GridCell {
            year,
            month,
            day,
            in_current_month,
            is_today: key == today_key,
            is_selected: selected_key == Some(key),
            is_disabled: bounds.excludes(key),
        }
    };

    let mut cells = Vec::with_capacity(GRID_CELLS);

    let (prev_year, prev_month) = month_before(year, month);
    let prev_length = days_in_month(prev_year, prev_month) as usize;
    for day in (prev_length - leading + 1)..=prev_length {
        cells.push(cell(prev_year, prev_month, day as u32, false));
    }

    for day in 1..=length {
        cells.push(cell(year, month, day as u32, true));
    }

    let (next_year, next_month) = month_after(year, month);
    let trailing = (GRID_CELLS - cells.len()).min(MAX_TRAILING_DAYS);
    for day in 1..=trailing {
        cells.push(cell(next_year, next_month, day as u32, false));
    }

    cells
}

/// Move the view by `delta` months, anchored to day 1.
///
/// Stepping back from Farvardin lands on Esfand of the previous year and
/// forward from Esfand on Farvardin of the next.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`]
/// when the step leaves the supported years.
///
/// ```
/// use jalali_engine::{step_month, JalaliDate};
///
/// let farvardin = JalaliDate::new(1403, 1, 1).unwrap();
/// assert_eq!(step_month(&farvardin, -1).unwrap(), JalaliDate::new(1402, 12, 1).unwrap());
/// ```
pub fn step_month(view: &JalaliDate, delta: i32) -> Result<JalaliDate> {
    let index = i64::from(view.year()) * 12 + i64::from(view.month() - 1) + i64::from(delta);
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let year = i32::try_from(year).map_err(|_| CalendarError::OutOfRange(i32::MAX))?;
    JalaliDate::new(year, month, 1)
}

fn month_before(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn month_after(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
