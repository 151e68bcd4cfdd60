pub mod activity;
pub mod clock;
pub mod gateway;
pub mod log;
pub mod navigator;
pub mod timesheet;
pub mod tracker;
