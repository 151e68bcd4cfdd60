use crate::cli::commands::Now;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config, now: Now) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let pool = open_db(cfg)?;
        let rows = ExportLogic::export(&pool, *format, file, range.as_deref(), *force, now.at())?;

        if rows > 0 {
            ttlog_quiet(
                &pool.conn,
                "export",
                file,
                &format!("{rows} work days exported as {}", format.as_str()),
            );
        }
    }
    Ok(())
}
