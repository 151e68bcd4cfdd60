pub mod config;
pub mod db;
pub mod day;
pub mod evidence;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod status;
pub mod task;
pub mod transition;

use crate::config::Config;
use crate::core::clock::SessionClock;
use crate::core::navigator::Controls;
use crate::db::queries::viewed_date;
use crate::errors::{AppError, AppResult};
use crate::models::work_day::WorkDay;
use crate::ui::messages::header;
use crate::ui::render::status_block;
use crate::utils::date::{date_label, parse_date};
use crate::utils::time::parse_optional_timestamp;
use chrono::{DateTime, Duration, Local, NaiveDate};
use rusqlite::Connection;

/// Current instant of a command run. Fixed when `--now` was given, so that
/// repeated readings advance from it instead of following the wall clock.
#[derive(Debug, Clone, Copy)]
pub struct Now {
    at: DateTime<Local>,
    fixed: bool,
}

impl Now {
    pub fn from_arg(arg: Option<&String>) -> AppResult<Self> {
        Ok(match parse_optional_timestamp(arg)? {
            Some(at) => Self { at, fixed: true },
            None => Self {
                at: Local::now(),
                fixed: false,
            },
        })
    }

    pub fn at(&self) -> DateTime<Local> {
        self.at
    }

    /// Reading taken `secs` seconds after the start of the run.
    pub fn after(&self, secs: u32) -> DateTime<Local> {
        if self.fixed {
            self.at + Duration::seconds(i64::from(secs))
        } else {
            Local::now()
        }
    }
}

/// Day a command applies to: `--date`, else the viewed day, else today.
pub(crate) fn resolve_date(
    conn: &Connection,
    date: Option<&str>,
    now: DateTime<Local>,
) -> AppResult<NaiveDate> {
    if let Some(s) = date {
        return parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()));
    }
    Ok(viewed_date(conn)?.unwrap_or_else(|| now.date_naive()))
}

pub(crate) fn show_day(day: &WorkDay, cfg: &Config, now: DateTime<Local>) {
    header(date_label(&day.date, cfg.show_weekday));
    let tick = SessionClock::tick(day, now);
    print!("{}", status_block(day, &tick, &Controls::for_work_day(day)));
}
