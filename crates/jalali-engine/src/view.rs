//! State of one date-picker widget attached to one text input.
//!
//! [`CalendarView`] owns the viewed month, the selection and the open flag.
//! Every operation is synchronous and takes "today" from the caller, so the
//! state machine can be driven from tests without a clock. Rendering (DOM,
//! terminal, native) is left to the caller, who reads [`CalendarView::grid`]
//! and [`CalendarView::title`] and writes back [`Change::input_value`].
//!
//! # Transitions
//!
//! ```text
//!            open                select / click / today / clear
//!  Closed ─────────▶ Open ──────────────────────────────────────▶ Closed
//!    ▲                │  previous_month / next_month (stays open)
//!    └──── close ─────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::calendar::JalaliDate;
use crate::error::{CalendarError, Result};
use crate::format::{format_date, month_title, parse_date};
use crate::navigation::{build_grid, step_month, Bounds, GridCell};

// ── Options ─────────────────────────────────────────────────────────────────

/// What the attached input collects. Only affects the default placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerKind {
    #[default]
    Date,
    DateTime,
}

impl PickerKind {
    /// Example text shown in an empty input.
    pub fn default_placeholder(self) -> &'static str {
        match self {
            PickerKind::Date => "مثال: ۱۴۰۳/۰۷/۰۱",
            PickerKind::DateTime => "مثال: ۱۴۰۳/۰۷/۰۱ ۱۴:۳۰",
        }
    }
}

/// Configuration for a [`CalendarView`].
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration:
///
/// ```
/// use jalali_engine::PickerOptions;
///
/// let opts: PickerOptions = serde_json::from_str(r#"{"localized_digits": false}"#).unwrap();
/// assert!(!opts.localized_digits);
/// assert_eq!(opts.placeholder(), "مثال: ۱۴۰۳/۰۷/۰۱");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    pub kind: PickerKind,
    /// Overrides [`PickerKind::default_placeholder`].
    pub placeholder: Option<String>,
    /// Persian digits in the input text and the month title.
    pub localized_digits: bool,
    /// Earliest selectable day (inclusive).
    pub min_date: Option<JalaliDate>,
    /// Latest selectable day (inclusive). Must not precede `min_date`;
    /// [`CalendarView::attach`] rejects such options.
    pub max_date: Option<JalaliDate>,
    /// Input text present when the widget is attached.
    pub initial_value: Option<String>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            kind: PickerKind::Date,
            placeholder: None,
            localized_digits: true,
            min_date: None,
            max_date: None,
            initial_value: None,
        }
    }
}

impl PickerOptions {
    pub fn placeholder(&self) -> &str {
        self.placeholder
            .as_deref()
            .unwrap_or_else(|| self.kind.default_placeholder())
    }

    /// Whether `date` lies within `min_date..=max_date`.
    pub fn allows(&self, date: &JalaliDate) -> bool {
        self.min_date.is_none_or(|min| *date >= min) && self.max_date.is_none_or(|max| *date <= max)
    }

    /// Check that `min_date` does not come after `max_date`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidBounds`] for an empty range.
    pub fn validate(&self) -> Result<()> {
        match (self.min_date, self.max_date) {
            (Some(min), Some(max)) if min > max => Err(CalendarError::InvalidBounds(format!(
                "min_date {min} is after max_date {max}"
            ))),
            _ => Ok(()),
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds {
            min: self.min_date,
            max: self.max_date,
        }
    }
}

// ── Change notification ─────────────────────────────────────────────────────

/// Emitted whenever the selection changes; the caller writes `input_value`
/// into the attached input and fires its own change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub selected: Option<JalaliDate>,
    pub input_value: String,
}

// ── CalendarView ────────────────────────────────────────────────────────────

/// Widget state: viewed month, selection and open flag.
///
/// `view_date` is always day 1 of the viewed month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    options: PickerOptions,
    view_date: JalaliDate,
    selected_date: Option<JalaliDate>,
    is_open: bool,
}

impl CalendarView {
    /// Attach to an input, reading `options.initial_value` as the selection.
    ///
    /// Unparseable or out-of-bounds initial text is logged and ignored. The
    /// view starts on the selected month, or on `today`'s month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidBounds`] when `min_date` is after
    /// `max_date`.
    pub fn attach(options: PickerOptions, today: JalaliDate) -> Result<Self> {
        options.validate()?;
        let mut view = Self {
            view_date: today.first_of_month(),
            selected_date: None,
            is_open: false,
            options,
        };
        if let Some(text) = view.options.initial_value.clone() {
            view.set_from_input(&text);
        }
        if let Some(selected) = view.selected_date {
            view.view_date = selected.first_of_month();
        }
        tracing::debug!(view = %view.view_date, selected = ?view.selected_date, "picker attached");
        Ok(view)
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn view_date(&self) -> JalaliDate {
        self.view_date
    }

    pub fn selected_date(&self) -> Option<JalaliDate> {
        self.selected_date
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    // ── Open / close ────────────────────────────────────────────────────

    /// Show the picker on the selected month, or on `today`'s month when
    /// nothing is selected. Does nothing if already open, so the user's
    /// navigation is kept.
    pub fn open(&mut self, today: JalaliDate) {
        if self.is_open {
            return;
        }
        self.view_date = self.selected_date.unwrap_or(today).first_of_month();
        self.is_open = true;
        tracing::debug!(view = %self.view_date, "picker opened");
    }

    pub fn close(&mut self) {
        if self.is_open {
            tracing::debug!("picker closed");
        }
        self.is_open = false;
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] before the first supported month;
    /// the view is left unchanged.
    pub fn previous_month(&mut self) -> Result<()> {
        self.step(-1)
    }

    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] past the last supported month;
    /// the view is left unchanged.
    pub fn next_month(&mut self) -> Result<()> {
        self.step(1)
    }

    fn step(&mut self, delta: i32) -> Result<()> {
        self.view_date = step_month(&self.view_date, delta)?;
        tracing::debug!(view = %self.view_date, "picker navigated");
        Ok(())
    }

    // ── Selection ───────────────────────────────────────────────────────

    /// Select `date`, close the picker and report the new input text.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfBounds`] if `date` is outside
    /// `min_date..=max_date`; the state is left unchanged.
    pub fn select(&mut self, date: JalaliDate) -> Result<Change> {
        if !self.options.allows(&date) {
            return Err(CalendarError::OutOfBounds(date.to_string()));
        }
        self.selected_date = Some(date);
        self.close();
        tracing::debug!(selected = %date, "date selected");
        Ok(self.change())
    }

    /// Handle a click on a grid cell.
    ///
    /// Cells outside the viewed month and disabled cells are ignored and
    /// yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates [`select`](Self::select) errors.
    pub fn click_cell(&mut self, cell: &GridCell) -> Result<Option<Change>> {
        if !cell.in_current_month || cell.is_disabled {
            return Ok(None);
        }
        match cell.date() {
            Some(date) => self.select(date).map(Some),
            None => Ok(None),
        }
    }

    /// Select `today` (the "today" button).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfBounds`] if today is not selectable.
    pub fn select_today(&mut self, today: JalaliDate) -> Result<Change> {
        self.select(today)
    }

    /// Drop the selection, empty the input and close.
    pub fn clear(&mut self) -> Change {
        self.selected_date = None;
        self.close();
        tracing::debug!("selection cleared");
        self.change()
    }

    /// Re-read the input after the user typed into it.
    ///
    /// Empty text clears the selection. Text that parses to a selectable date
    /// replaces it. Anything else is logged and the previous selection kept,
    /// in which case `None` is returned.
    pub fn set_from_input(&mut self, text: &str) -> Option<Change> {
        if text.trim().is_empty() {
            self.selected_date = None;
            return Some(self.change());
        }
        match parse_date(text) {
            Some(date) if self.options.allows(&date) => {
                self.selected_date = Some(date);
                Some(self.change())
            }
            Some(date) => {
                tracing::warn!(%date, "input date outside picker bounds, keeping selection");
                None
            }
            None => {
                tracing::warn!(input = text, "invalid date format, keeping selection");
                None
            }
        }
    }

    // ── Rendering inputs ────────────────────────────────────────────────

    /// Text for the attached input; empty when nothing is selected.
    pub fn input_value(&self) -> String {
        self.selected_date
            .map(|date| format_date(&date, self.options.localized_digits))
            .unwrap_or_default()
    }

    /// The 42 cells of the viewed month with bounds applied.
    pub fn grid(&self, today: JalaliDate) -> Vec<GridCell> {
        build_grid(
            &self.view_date,
            self.selected_date.as_ref(),
            &today,
            self.options.bounds(),
        )
    }

    /// Header for the viewed month, e.g. `مهر ۱۴۰۳`.
    pub fn title(&self) -> String {
        month_title(&self.view_date, self.options.localized_digits)
    }

    fn change(&self) -> Change {
        Change {
            selected: self.selected_date,
            input_value: self.input_value(),
        }
    }
}
