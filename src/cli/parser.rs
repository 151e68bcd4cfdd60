use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rWorkday
/// CLI application to track work days and their timesheet with SQLite
#[derive(Parser)]
#[command(
    name = "rworkday",
    version = env!("CARGO_PKG_VERSION"),
    about = "A work day tracker: start, pause and finish your day's timesheet, backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Pretend the current instant is this RFC 3339 timestamp
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "migrate",
            help = "Add missing fields to the configuration file with their defaults"
        )]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Move the viewed day
    Day {
        #[command(subcommand)]
        action: DayAction,
    },

    /// Show the viewed day, its timesheet and the available controls
    Status {
        /// Day to show (YYYY-MM-DD); defaults to the viewed day
        #[arg(long)]
        date: Option<String>,

        /// Keep refreshing the worked time once per second
        #[arg(long)]
        watch: bool,

        /// Stop the live view after this many refreshes
        #[arg(long, requires = "watch")]
        ticks: Option<u32>,
    },

    /// Start or resume the timesheet
    Start {
        #[arg(long, help = "Day to operate on (YYYY-MM-DD); defaults to the viewed day")]
        date: Option<String>,
    },

    /// Pause the running timesheet
    Pause {
        #[arg(long, help = "Day to operate on (YYYY-MM-DD); defaults to the viewed day")]
        date: Option<String>,
    },

    /// Finish the day; it becomes read-only
    Finish {
        #[arg(long, help = "Day to operate on (YYYY-MM-DD); defaults to the viewed day")]
        date: Option<String>,
    },

    /// Record or list completed tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Record or list submitted evidences (photo/video files)
    Evidence {
        #[command(subcommand)]
        action: EvidenceAction,
    },

    /// List work days
    List {
        /// Filter by period.
        ///
        /// Supported formats:
        /// - YYYY                  → entire year (e.g. "2025")
        /// - YYYY-MM              → entire month (e.g. "2025-06")
        /// - YYYY-MM-DD           → specific day (e.g. "2025-06-18")
        ///
        /// Ranges (start:end) in the same format, e.g. "2025-06:2025-08".
        ///
        /// Special value `all` lists the entire archive.
        ///
        /// If omitted, the current month is listed.
        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, or ranges)"
        )]
        period: Option<String>,
    },

    /// Export work days
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum DayAction {
    /// Previous calendar day
    #[command(alias = "previous")]
    Prev,
    /// Next calendar day
    Next,
    /// Back to today
    Today,
    /// Jump to a given day
    Goto {
        /// Date (YYYY-MM-DD)
        date: String,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Mark a task as done
    Done {
        title: String,

        #[arg(long, help = "Day to record on (YYYY-MM-DD); defaults to the viewed day")]
        date: Option<String>,
    },
    /// List tasks done on a day
    List {
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum EvidenceAction {
    /// Record an evidence file for the day
    Add {
        /// Path of the captured photo or video
        path: String,

        #[arg(long)]
        note: Option<String>,

        #[arg(long, help = "Day to record on (YYYY-MM-DD); defaults to the viewed day")]
        date: Option<String>,
    },
    /// List evidences submitted on a day
    List {
        #[arg(long)]
        date: Option<String>,
    },
}
