//! # coalplan-algo: LP model and sensitivity analysis for fuel procurement
//!
//! This crate builds and solves the fuel-procurement linear program and
//! classifies its solution for decision support.
//!
//! ## Model
//!
//! [`run_model`] constructs a 100-column LP (five fuels over twenty
//! planning periods) from a [`RunConfig`](coalplan_core::RunConfig),
//! maximising horizon profit subject to:
//!
//! | Constraint | Rows | Kind |
//! |------------|------|------|
//! | Stockpile inventory | 1 | resource cap |
//! | Biomass blending limit | 20 | per-period energy share |
//! | Sulphur bubble | 1 | aggregate emission cap |
//! | Capacity limit | 20 | per-period energy cap |
//! | Summer coal ban | 36 | imported coals fixed to zero |
//!
//! The solve is a single HiGHS invocation; infeasible or unbounded models
//! fail fast with a typed [`SolveError`] before any primal or dual field
//! is read.
//!
//! ## Sensitivity
//!
//! [`analyse`] is a pure function over the raw [`SolveArtifacts`]: it
//! classifies variables (utilised / better_if / worse_if / neutral) and
//! constraints (binding_resource / binding_requirement / non_binding),
//! joins the coefficient matrix with both tables to attribute marginal
//! profit per (fuel, constraint), and estimates the profit effect of
//! tightening slack constraints.
//!
//! ## Export
//!
//! With the default `polars` feature, the [`export`] module converts the
//! plan and sensitivity tables to dataframes and writes them as CSV.

pub mod model;
pub mod sensitivity;
pub mod solution;
pub mod solver;

#[cfg(feature = "polars")]
pub mod export;

pub use model::{run_model, ModelError};
pub use sensitivity::{
    analyse, AttributionRow, ClassifiedConstraint, ClassifiedVariable, ConstraintStatus,
    SensitivityReport, TightenEstimate, VariableStatus,
};
pub use solution::{
    CoefficientEntry, ConstraintRecord, KpiSummary, ModelOutput, PlanEntry, SolveArtifacts,
    VariableRecord,
};
pub use solver::{solve_optimal, SolveError};
