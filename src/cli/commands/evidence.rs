use crate::cli::commands::{Now, resolve_date};
use crate::cli::parser::EvidenceAction;
use crate::config::Config;
use crate::core::activity::ActivityLogic;
use crate::db::initialize::open_db;
use crate::db::log::ttlog_quiet;
use crate::db::queries::list_evidences;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::absolutize;
use crate::utils::table::Table;

pub fn handle(action: &EvidenceAction, cfg: &Config, now: Now) -> AppResult<()> {
    let pool = open_db(cfg)?;

    match action {
        EvidenceAction::Add { path, note, date } => {
            let date = resolve_date(&pool.conn, date.as_deref(), now.at())?;
            let abs = absolutize(path)?;
            if !abs.exists() {
                warning(format!("{} does not exist (recorded anyway).", abs.display()));
            }

            let evidence = ActivityLogic::submit_evidence(
                &pool.conn,
                date,
                &abs.to_string_lossy(),
                note.as_deref(),
                now.at(),
            )?;

            success(format!("Evidence recorded on {}: {}", date, evidence.path));
            ttlog_quiet(&pool.conn, "evidence_add", &date.to_string(), &evidence.path);
        }
        EvidenceAction::List { date } => {
            let date = resolve_date(&pool.conn, date.as_deref(), now.at())?;
            let evidences = list_evidences(&pool.conn, &date)?;

            if evidences.is_empty() {
                info(format!("No evidences submitted on {date}."));
                return Ok(());
            }

            let mut table = Table::new(["ID", "Time", "File", "Note"]);
            for e in &evidences {
                table.add_row(vec![
                    e.id.to_string(),
                    e.submitted_at.format("%H:%M").to_string(),
                    e.path.clone(),
                    e.note.clone(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
