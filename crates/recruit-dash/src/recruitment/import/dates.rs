use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d", "%d-%b-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses the date layouts seen in recruitment exports. Returns `None` for
/// anything else, including blanks.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
    {
        return Some(date);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|dt| dt.date())
}

fn is_month_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '/' | ',' | '\'')
}

/// Month number (1-12) for an English month name or abbreviation,
/// optionally followed by a year as in `Jan 2024` or `Jan-24`.
pub(crate) fn month_index(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let (name, rest) = trimmed
        .split_once(is_month_separator)
        .unwrap_or((trimmed, ""));
    let year = rest.trim_matches(is_month_separator);
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    month_number(name)
}

fn month_number(name: &str) -> Option<u32> {
    let token = name.trim_end_matches('.').to_ascii_lowercase();
    let month = match token.as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}
