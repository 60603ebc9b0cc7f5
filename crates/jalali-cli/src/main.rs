use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use jalali_engine::format::{
    month_name_latin, to_ascii_digits, to_persian_digits, WEEKDAY_INITIALS,
};
use jalali_engine::{
    build_month_grid, format_styled, is_leap_year, month_title, DateStyle, GridCell, JalaliDate,
    GRID_CELLS, GRID_COLUMNS, MAX_YEAR, MIN_YEAR,
};

/// Characters per rendered grid cell.
const CELL_WIDTH: usize = 4;

const LATIN_WEEKDAYS: [&str; GRID_COLUMNS] = ["Sa", "Su", "Mo", "Tu", "We", "Th", "Fr"];

/// Jalali (Persian) calendar conversions and month grids
#[derive(Parser)]
#[command(name = "jalali", version, about)]
struct Cli {
    /// Print ASCII digits and Latin month names
    #[arg(long, global = true)]
    ascii: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print today's Jalali date
    Today {
        #[arg(long, value_enum, default_value_t = Style::Numeric)]
        style: Style,
    },
    /// Convert a Gregorian date (YYYY-MM-DD) to Jalali
    ToJalali {
        date: String,
        #[arg(long, value_enum, default_value_t = Style::Numeric)]
        style: Style,
    },
    /// Convert a Jalali date (YYYY/MM/DD, Persian or ASCII digits) to Gregorian
    ToGregorian { date: String },
    /// Report whether a Jalali year is leap or common
    Leap { year: i32 },
    /// Print a month grid, Saturday first
    Month {
        /// Month to show as YYYY/MM (defaults to the selected or current month)
        month: Option<String>,
        /// Highlight this Jalali date (YYYY/MM/DD)
        #[arg(long)]
        select: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Style {
    Numeric,
    DayMonthYear,
    WeekdayDayMonthYear,
    MonthYear,
    DayMonth,
}

impl From<Style> for DateStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Numeric => DateStyle::Numeric,
            Style::DayMonthYear => DateStyle::DayMonthYear,
            Style::WeekdayDayMonthYear => DateStyle::WeekdayDayMonthYear,
            Style::MonthYear => DateStyle::MonthYear,
            Style::DayMonth => DateStyle::DayMonth,
        }
    }
}

#[derive(Serialize)]
struct Conversion {
    jalali: JalaliDate,
    gregorian: NaiveDate,
    text: String,
}

#[derive(Serialize)]
struct LeapReport {
    year: i32,
    leap: bool,
    days: u32,
}

#[derive(Serialize)]
struct MonthReport {
    title: String,
    cells: Vec<GridCell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let localized = !cli.ascii;
    match cli.command {
        Command::Today { style } => {
            let today = jalali_engine::today().context("system clock outside supported range")?;
            print_conversion(today, style, localized, cli.json)
        }
        Command::ToJalali { date, style } => {
            let gregorian = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .with_context(|| format!("invalid Gregorian date '{date}', expected YYYY-MM-DD"))?;
            let jalali = JalaliDate::from_gregorian(gregorian)
                .with_context(|| format!("cannot convert {gregorian}"))?;
            tracing::debug!(%gregorian, %jalali, "converted to Jalali");
            print_conversion(jalali, style, localized, cli.json)
        }
        Command::ToGregorian { date } => {
            let jalali: JalaliDate = date
                .parse()
                .with_context(|| format!("invalid Jalali date '{date}'"))?;
            let gregorian = jalali.to_gregorian();
            tracing::debug!(%jalali, %gregorian, "converted to Gregorian");
            if cli.json {
                print_json(&Conversion {
                    jalali,
                    gregorian,
                    text: gregorian.to_string(),
                })
            } else {
                println!("{}", gregorian.format("%Y-%m-%d"));
                Ok(())
            }
        }
        Command::Leap { year } => {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                bail!("year {year} outside supported range {MIN_YEAR}..={MAX_YEAR}");
            }
            let leap = is_leap_year(year);
            if cli.json {
                print_json(&LeapReport {
                    year,
                    leap,
                    days: if leap { 366 } else { 365 },
                })
            } else {
                println!("{}", if leap { "leap" } else { "common" });
                Ok(())
            }
        }
        Command::Month { month, select } => {
            let today = jalali_engine::today().context("system clock outside supported range")?;
            let selected = select
                .as_deref()
                .map(|text| {
                    text.parse::<JalaliDate>()
                        .with_context(|| format!("invalid --select date '{text}'"))
                })
                .transpose()?;
            let view = match month.as_deref() {
                Some(text) => parse_month(text)?,
                None => selected.unwrap_or(today).first_of_month(),
            };

            let cells = build_month_grid(&view, selected.as_ref(), &today);
            let title = if cli.ascii {
                format!("{} {}", month_name_latin(view.month()).unwrap_or_default(), view.year())
            } else {
                month_title(&view, true)
            };

            if cli.json {
                print_json(&MonthReport { title, cells })
            } else {
                print!("{}", render_grid(&title, &cells, localized));
                Ok(())
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_conversion(jalali: JalaliDate, style: Style, localized: bool, json: bool) -> Result<()> {
    let text = format_styled(&jalali, style.into(), localized);
    if json {
        print_json(&Conversion {
            jalali,
            gregorian: jalali.to_gregorian(),
            text,
        })
    } else {
        println!("{text}");
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Parse `YYYY/MM` into the first day of that month.
fn parse_month(text: &str) -> Result<JalaliDate> {
    let ascii = to_ascii_digits(text.trim());
    let Some((year, month)) = ascii.split_once('/') else {
        bail!("invalid month '{text}', expected YYYY/MM");
    };
    let year: i32 = year
        .parse()
        .with_context(|| format!("invalid year in '{text}'"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("invalid month in '{text}'"))?;
    JalaliDate::new(year, month, 1).with_context(|| format!("invalid month '{text}'"))
}

/// Render a `cal`-style grid: title line, weekday header, six week rows.
///
/// Each cell is four columns wide. Other-month cells are blank, today is
/// marked `*`, the selection is bracketed.
fn render_grid(title: &str, cells: &[GridCell], localized: bool) -> String {
    let width = CELL_WIDTH * GRID_COLUMNS;
    let mut out = format!("{title:^width$}").trim_end().to_string();
    out.push('\n');

    let header: Vec<String> = if localized {
        WEEKDAY_INITIALS.iter().map(|d| format!(" {d}  ")).collect()
    } else {
        LATIN_WEEKDAYS.iter().map(|d| format!(" {d} ")).collect()
    };
    out.push_str(header.concat().trim_end());
    out.push('\n');

    debug_assert_eq!(cells.len(), GRID_CELLS);
    for week in cells.chunks(GRID_COLUMNS) {
        let row: String = week.iter().map(|cell| render_cell(cell, localized)).collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

fn render_cell(cell: &GridCell, localized: bool) -> String {
    if !cell.in_current_month {
        return "    ".to_string();
    }
    let text = if cell.is_selected {
        format!("[{:>2}]", cell.day)
    } else if cell.is_today {
        format!("*{:>2} ", cell.day)
    } else {
        format!(" {:>2} ", cell.day)
    };
    if localized {
        to_persian_digits(&text)
    } else {
        text
    }
}
