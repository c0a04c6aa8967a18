//! Background cron jobs.
//!
//! - `maintenance`: response cache purge, low-stock sweep and notification cleanup

pub mod maintenance;
