use crate::db::pool::DbPool;
use crate::db::queries::list_work_days;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::WorkDayExport;
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use chrono::{DateTime, Local};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export stored work days.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None` or `all` for everything, otherwise a period such as
    ///   `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or a `start:end` range of those
    ///
    /// Returns the number of exported rows. Nothing is written when the range
    /// holds no work day.
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
        now: DateTime<Local>,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) => parse_period(r)?,
        };

        let rows: Vec<WorkDayExport> = list_work_days(&pool.conn, bounds)?
            .iter()
            .map(|d| WorkDayExport::from_work_day(d, now))
            .collect();

        if rows.is_empty() {
            warning("No work days found for selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
