//! Command handlers for mcc CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod analyze;
pub mod configure;
pub mod convert;
pub mod models;
