pub mod activity;
pub mod day_status;
pub mod timesheet;
pub mod work_day;
