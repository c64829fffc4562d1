//! Command-line front end for the fuel-procurement planner.
//!
//! The binary (`coalplan`) solves the model for a TOML configuration and
//! renders the plan, KPIs and sensitivity tables; modules are exposed here
//! so integration tests can exercise them directly.

pub mod cli;
pub mod history;
pub mod report;
