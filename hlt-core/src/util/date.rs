//! Best-effort interpretation of human written event dates
//! like "24 - 27 Feb 2026", "Julio - Agosto" or "Pentecostés".
//!
//! The result is only meant for ordering: dates without a year
//! are placed into the current year and unknown dates are
//! sorted last.

use lazy_static::lazy_static;
use regex::Regex;
use time::{Date, Duration, Month, OffsetDateTime};

/// Sort key of entries without a recognizable date.
pub const UNKNOWN_DATE: i64 = 9_999_999_999_999;

// The order matters: the first key that is contained
// in a date string wins.
const MONTHS: &[(&str, Month)] = &[
    ("ene", Month::January),
    ("jan", Month::January),
    ("enero", Month::January),
    ("feb", Month::February),
    ("febrero", Month::February),
    ("mar", Month::March),
    ("marzo", Month::March),
    ("abr", Month::April),
    ("apr", Month::April),
    ("abril", Month::April),
    ("may", Month::May),
    ("mayo", Month::May),
    ("jun", Month::June),
    ("junio", Month::June),
    ("jul", Month::July),
    ("julio", Month::July),
    ("ago", Month::August),
    ("aug", Month::August),
    ("agosto", Month::August),
    ("sep", Month::September),
    ("septiembre", Month::September),
    ("oct", Month::October),
    ("octubre", Month::October),
    ("nov", Month::November),
    ("noviembre", Month::November),
    ("dic", Month::December),
    ("dec", Month::December),
    ("diciembre", Month::December),
];

lazy_static! {
    static ref DAY_MONTH_YEAR: Regex =
        Regex::new(r"([0-9]{1,2}).*?([a-zñ]{3,}).*?([0-9]{4})").unwrap();
}

fn month_by_key(key: &str) -> Option<Month> {
    MONTHS.iter().find(|(k, _)| *k == key).map(|(_, m)| *m)
}

/// Days beyond the end of the month roll over into the next one.
fn to_millis(year: i32, month: Month, day: i64) -> i64 {
    Date::from_calendar_date(year, month, 1)
        .ok()
        .and_then(|first| first.checked_add(Duration::days(day - 1)))
        .map(|date| date.midnight().assume_utc().unix_timestamp() * 1_000)
        .unwrap_or(UNKNOWN_DATE)
}

fn parse_day_month_year(s: &str) -> Option<i64> {
    let caps = DAY_MONTH_YEAR.captures(s)?;
    let day = caps[1].parse::<i64>().ok()?;
    let key: String = caps[2].chars().take(3).collect();
    let year = caps[3].parse::<i32>().ok()?;
    let month = month_by_key(&key).unwrap_or(Month::January);
    Some(to_millis(year, month, day))
}

/// Returns the approximate start of the given date
/// as milliseconds since the UNIX epoch (UTC).
pub fn parse_place_date(date: Option<&str>, current_year: i32) -> i64 {
    let Some(date) = date else {
        return UNKNOWN_DATE;
    };
    let s = date.trim().to_lowercase();
    if let Some(millis) = parse_day_month_year(&s) {
        return millis;
    }
    if let Some((_, month)) = MONTHS.iter().find(|(key, _)| s.contains(key)) {
        return to_millis(current_year, *month, 1);
    }
    if s.contains("pentecostés") || s.contains("rocío") {
        return to_millis(current_year, Month::June, 1);
    }
    if s.contains("semana santa") {
        return to_millis(current_year, Month::April, 1);
    }
    UNKNOWN_DATE
}

pub fn parse_place_date_now(date: Option<&str>) -> i64 {
    parse_place_date(date, OffsetDateTime::now_utc().year())
}
