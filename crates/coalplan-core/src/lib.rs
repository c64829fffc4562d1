//! # coalplan-core: domain types for fuel-procurement planning
//!
//! Typed reference data and configuration for a 1000 MW coal station
//! choosing a fuel mix over a June–October horizon. The optimization model
//! and sensitivity analysis live in `coalplan-algo`; this crate only defines
//! the vocabulary both sides share:
//!
//! - [`Fuel`] and [`FuelMap`]: the five fuels and total per-fuel tables
//! - [`Month`], [`Band`], [`Period`], [`PeriodMap`]: the 20 planning periods
//! - [`plant`]: nameplate capacity, efficiency, emission factors
//! - [`RunConfig`]: the immutable per-solve input bundle
//! - [`CoalplanError`]: unified error type at API boundaries

pub mod config;
pub mod error;
pub mod fuel;
pub mod period;
pub mod plant;

pub use config::{ConfigError, RunConfig};
pub use error::{CoalplanError, CoalplanResult};
pub use fuel::{Fuel, FuelMap};
pub use period::{Band, Month, Period, PeriodMap, PeriodMapError};
