//! Raw solver artifacts and solved-model outputs.
//!
//! Everything here is produced once per solve and immutable afterwards. The
//! sensitivity analyzer consumes [`SolveArtifacts`] as a pure function; the
//! presentation layer consumes [`KpiSummary`] and the per-period plan.

use coalplan_core::{Fuel, FuelMap, Period};
use serde::Serialize;

/// Raw per-variable solver output.
#[derive(Debug, Clone, Serialize)]
pub struct VariableRecord {
    /// Identifier of the form `x[fuel,month,band]`.
    pub name: String,
    pub fuel: Fuel,
    pub period: Period,
    /// Final value (tonnes burned).
    pub value: f64,
    /// Objective coefficient.
    pub objective_coeff: f64,
    /// Reduced cost: marginal objective change per unit increase at the
    /// current bound; zero for basic variables.
    pub reduced_cost: f64,
    /// How far the objective coefficient can rise before the optimal basis
    /// changes. Infinite where basis ranging would be required (see the
    /// degenerate-basis note in the crate docs).
    pub allowable_increase: f64,
    /// How far the objective coefficient can fall before the basis changes.
    pub allowable_decrease: f64,
}

/// Raw per-constraint solver output.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintRecord {
    pub name: String,
    /// Row activity at the optimum (the RHS-implied final value).
    pub activity: f64,
    /// RHS minus activity; zero for binding rows.
    pub slack: f64,
    /// Dual value: marginal objective change per unit RHS relaxation.
    pub dual: f64,
}

/// One non-zero entry of the constraint-row coefficient matrix.
#[derive(Debug, Clone, Serialize)]
pub struct CoefficientEntry {
    pub constraint: String,
    pub variable: String,
    pub coeff: f64,
}

/// The complete raw output of one solve, consumed by the sensitivity
/// analyzer and then discarded. No state persists across runs.
#[derive(Debug, Clone, Serialize)]
pub struct SolveArtifacts {
    /// Objective value, net of the one-time FGD fixed cost.
    pub objective: f64,
    pub variables: Vec<VariableRecord>,
    pub constraints: Vec<ConstraintRecord>,
    pub coefficients: Vec<CoefficientEntry>,
}

/// Profit and emission aggregates for one solved run.
#[derive(Debug, Clone, Serialize)]
pub struct KpiSummary {
    /// Net profit: the objective value.
    pub total_profit: f64,
    /// Revenue net of the transmission deduction.
    pub revenue_minus_transmission: f64,
    /// ROC payments earned on biomass generation.
    pub roc_incentive: f64,
    /// Total spend on fuel.
    pub total_fuel_cost: f64,
    /// Total CO2 cost at the configured price and exchange rate.
    pub total_co2_cost: f64,
    /// Direct SO2 cost (zero when the bubble cap is active instead).
    pub total_so2_cost: f64,
    /// CO2 emitted over the horizon, tonnes.
    pub co2_emissions: f64,
    /// Net SO2 emitted over the horizon (after FGD removal), tonnes.
    pub so2_emissions: f64,
    /// Energy generated over the horizon, MWh.
    pub total_generation: f64,
    /// Tonnes burned per fuel, summed over all periods.
    pub fuel_tonnage: FuelMap<f64>,
}

/// Tonnes burned per fuel in one period.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub period: Period,
    pub tonnes: FuelMap<f64>,
    pub total_tonnes: f64,
}

/// Everything the model builder returns for one configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ModelOutput {
    pub kpis: KpiSummary,
    /// Per-period fuel plan in (month, band) order.
    pub plan: Vec<PlanEntry>,
    /// Raw artifacts for the sensitivity analyzer.
    pub artifacts: SolveArtifacts,
}
