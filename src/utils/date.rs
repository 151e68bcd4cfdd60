use crate::config::ShowWeekday;
use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    let first_next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)?
    };
    Some(first_next.pred_opt()?.day())
}

/// First and last day of a single period term: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn term_bounds(term: &str) -> Option<(NaiveDate, NaiveDate)> {
    match term.len() {
        4 => {
            let y: i32 = term.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let (ys, ms) = term.split_once('-')?;
            let y: i32 = ys.parse().ok()?;
            let m: u32 = ms.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, m, 1)?,
                NaiveDate::from_ymd_opt(y, m, month_last_day(y, m)?)?,
            ))
        }
        10 => {
            let d = parse_date(term)?;
            Some((d, d))
        }
        _ => None,
    }
}

/// Parse a period filter into inclusive date bounds.
///
/// Supports:
/// - YYYY, YYYY-MM, YYYY-MM-DD
/// - ranges of the same shape joined by `:` (e.g. `2025-06:2025-08`)
/// - `all` → `None` (no filtering)
pub fn parse_period(p: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let p = p.trim();
    if p.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let invalid = || AppError::InvalidPeriod(p.to_string());

    let bounds = if let Some((start, end)) = p.split_once(':') {
        let (start, end) = (start.trim(), end.trim());
        if start.len() != end.len() {
            return Err(invalid());
        }
        let (s, _) = term_bounds(start).ok_or_else(invalid)?;
        let (_, e) = term_bounds(end).ok_or_else(invalid)?;
        if e < s {
            return Err(invalid());
        }
        (s, e)
    } else {
        term_bounds(p).ok_or_else(invalid)?
    };

    Ok(Some(bounds))
}

pub fn current_month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    let last = month_last_day(today.year(), today.month())
        .and_then(|d| today.with_day(d))
        .unwrap_or(today);
    (first, last)
}

/// `2025-03-10` or `2025-03-10 (Mon)` depending on the config.
pub fn date_label(date: &NaiveDate, style: ShowWeekday) -> String {
    let base = date.format("%Y-%m-%d").to_string();
    match style {
        ShowWeekday::None => base,
        ShowWeekday::Short => {
            let mut wd = date.format("%a").to_string();
            wd.truncate(2);
            format!("{base} ({wd})")
        }
        ShowWeekday::Medium => format!("{base} ({})", date.format("%a")),
        ShowWeekday::Long => format!("{base} ({})", date.format("%A")),
    }
}
