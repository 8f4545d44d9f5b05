use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

/// Two-digit years below this pivot are read as 20xx, the rest as 19xx.
const TWO_DIGIT_YEAR_PIVOT: u16 = 69;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const US_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");
const ISO_DATE_TIMES: [&[BorrowedFormatItem<'static>]; 2] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"),
];

/// Parse an observation date from the forms seen in price tables.
///
/// Accepts `MM/DD/YY`, `MM/DD/YYYY`, `YYYY-MM-DD` and ISO date-times
/// separated by `T` or a space. Anything else yields `None` and the row is
/// excluded from period filters.
pub fn parse_observation_date(input: &str) -> Option<Date> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains('/') {
        return parse_us_date(trimmed);
    }

    Date::parse(trimmed, ISO_DATE).ok().or_else(|| {
        ISO_DATE_TIMES
            .iter()
            .find_map(|format| PrimitiveDateTime::parse(trimmed, *format).ok())
            .map(PrimitiveDateTime::date)
    })
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

fn parse_us_date(value: &str) -> Option<Date> {
    let (month_day, year) = value.rsplit_once('/')?;
    match year.len() {
        2 => {
            let short = year.parse::<u16>().ok()?;
            let century = if short < TWO_DIGIT_YEAR_PIVOT { 20 } else { 19 };
            let expanded = format!("{month_day}/{century}{year}");
            Date::parse(&expanded, US_DATE).ok()
        }
        _ => Date::parse(value, US_DATE).ok(),
    }
}
