//! WebAssembly bindings for `jalali-engine`.
//!
//! Dates cross the boundary as JSON strings (`{"year":1403,"month":7,"day":1}`)
//! and Gregorian dates as ISO `YYYY-MM-DD` strings. Engine errors surface in
//! JavaScript as thrown `Error`s.

use wasm_bindgen::prelude::*;

use jalali_engine::{JalaliDate, PickerOptions};

fn date_from_json(json: &str) -> Result<JalaliDate, JsError> {
    Ok(serde_json::from_str(json)?)
}

fn optional_date_from_json(json: Option<String>) -> Result<Option<JalaliDate>, JsError> {
    json.as_deref().map(date_from_json).transpose()
}

/// Today's local date as a JSON Jalali date.
#[wasm_bindgen]
pub fn today() -> Result<String, JsError> {
    Ok(serde_json::to_string(&jalali_engine::today()?)?)
}

#[wasm_bindgen(js_name = "gregorianToJalali")]
pub fn gregorian_to_jalali(year: i32, month: u32, day: u32) -> Result<String, JsError> {
    let date = jalali_engine::gregorian_to_jalali(year, month, day)?;
    Ok(serde_json::to_string(&date)?)
}

/// Returns the Gregorian date as `YYYY-MM-DD`.
#[wasm_bindgen(js_name = "jalaliToGregorian")]
pub fn jalali_to_gregorian(year: i32, month: u32, day: u32) -> Result<String, JsError> {
    let date = jalali_engine::jalali_to_gregorian(year, month, day)?;
    Ok(date.format("%Y-%m-%d").to_string())
}

#[wasm_bindgen(js_name = "isLeapYear")]
pub fn is_leap_year(year: i32) -> bool {
    jalali_engine::is_leap_year(year)
}

#[wasm_bindgen(js_name = "daysInMonth")]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    jalali_engine::days_in_month(year, month)
}

/// 0 = Saturday … 6 = Friday.
#[wasm_bindgen(js_name = "dayOfWeek")]
pub fn day_of_week(date_json: &str) -> Result<u32, JsError> {
    Ok(jalali_engine::day_of_week(&date_from_json(date_json)?))
}

/// The 42 cells of the month containing `view_json`, as a JSON array.
///
/// `selected_json` may be omitted. `options_json`, when given, is a
/// `PickerOptions` object whose `min_date`/`max_date` mark disabled cells;
/// a selection outside those bounds is still marked.
#[wasm_bindgen(js_name = "buildMonthGrid")]
pub fn build_month_grid(
    view_json: &str,
    selected_json: Option<String>,
    today_json: &str,
    options_json: Option<String>,
) -> Result<String, JsError> {
    let view = date_from_json(view_json)?;
    let selected = optional_date_from_json(selected_json)?;
    let today = date_from_json(today_json)?;
    let options: PickerOptions = match options_json {
        Some(json) => serde_json::from_str(&json)?,
        None => PickerOptions::default(),
    };
    let cells = jalali_engine::build_month_grid_with_bounds(
        &view,
        selected.as_ref(),
        &today,
        options.min_date,
        options.max_date,
    );
    Ok(serde_json::to_string(&cells)?)
}

#[wasm_bindgen(js_name = "stepMonth")]
pub fn step_month(view_json: &str, delta: i32) -> Result<String, JsError> {
    let view = date_from_json(view_json)?;
    Ok(serde_json::to_string(&jalali_engine::step_month(&view, delta)?)?)
}

#[wasm_bindgen(js_name = "formatDate")]
pub fn format_date(date_json: &str, localized_digits: bool) -> Result<String, JsError> {
    let date = date_from_json(date_json)?;
    Ok(jalali_engine::format_date(&date, localized_digits))
}

/// JSON Jalali date, or `undefined` when the text is not a valid date.
#[wasm_bindgen(js_name = "parseDate")]
pub fn parse_date(text: &str) -> Option<String> {
    jalali_engine::parse_date(text).and_then(|date| serde_json::to_string(&date).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Error paths construct a JS `Error` and can only run under wasm.
    fn ok<T>(result: Result<T, JsError>) -> T {
        match result {
            Ok(value) => value,
            Err(_) => panic!("binding returned an error"),
        }
    }

    #[test]
    fn test_gregorian_to_jalali() {
        let json = ok(gregorian_to_jalali(2024, 9, 22));
        assert_eq!(json, r#"{"year":1403,"month":7,"day":1}"#);
    }

    #[test]
    fn test_jalali_to_gregorian() {
        assert_eq!(ok(jalali_to_gregorian(1403, 1, 1)), "2024-03-20");
    }

    #[test]
    fn test_leap_and_month_length() {
        assert!(is_leap_year(1403));
        assert!(!is_leap_year(1404));
        assert_eq!(days_in_month(1403, 12), 30);
        assert_eq!(days_in_month(1404, 12), 29);
    }

    #[test]
    fn test_day_of_week() {
        // 1 Mehr 1403 is a Sunday.
        assert_eq!(ok(day_of_week(r#"{"year":1403,"month":7,"day":1}"#)), 1);
    }

    #[test]
    fn test_build_month_grid() {
        let view = r#"{"year":1403,"month":7,"day":1}"#;
        let json = ok(build_month_grid(view, None, view, None));
        let cells: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[1]["day"], 1);
        assert_eq!(cells[1]["is_today"], true);
    }

    #[test]
    fn test_build_month_grid_with_bounds() {
        let view = r#"{"year":1403,"month":7,"day":1}"#;
        let options = r#"{"min_date":{"year":1403,"month":7,"day":10}}"#.to_string();
        let json = ok(build_month_grid(view, None, view, Some(options)));
        let cells: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(cells[1]["is_disabled"], true);
        assert_eq!(cells[10]["is_disabled"], false);
    }

    #[test]
    fn test_build_month_grid_selection_outside_bounds() {
        let view = r#"{"year":1403,"month":7,"day":1}"#;
        let selected = r#"{"year":1403,"month":7,"day":2}"#.to_string();
        let options = r#"{"min_date":{"year":1403,"month":7,"day":10}}"#.to_string();
        let json = ok(build_month_grid(view, Some(selected), view, Some(options)));
        let cells: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[2]["day"], 2);
        assert_eq!(cells[2]["is_selected"], true);
        assert_eq!(cells[2]["is_disabled"], true);
    }

    #[test]
    fn test_step_month() {
        let json = ok(step_month(r#"{"year":1403,"month":1,"day":9}"#, -1));
        assert_eq!(json, r#"{"year":1402,"month":12,"day":1}"#);
    }

    #[test]
    fn test_format_and_parse() {
        let date = r#"{"year":1403,"month":7,"day":1}"#;
        assert_eq!(ok(format_date(date, true)), "۱۴۰۳/۰۷/۰۱");
        assert_eq!(parse_date("۱۴۰۳/۰۷/۰۱").as_deref(), Some(date));
        assert_eq!(parse_date("1403/07"), None);
    }
}
