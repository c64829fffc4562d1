//! Model builder for the fuel-procurement LP.
//!
//! Constructs the 100-column linear program from a [`RunConfig`], invokes
//! the external solve capability once, and extracts primal values,
//! sensitivity fields and KPI aggregates. Construction rules:
//!
//! - one non-negative continuous column per (fuel, period), no upper bound
//!   at the column level;
//! - total stockpile tonnage capped by the fixed inventory;
//! - per-period biomass energy capped at a fraction of period energy;
//! - an aggregate sulphur bubble, net of FGD removal (lifted to infinity
//!   when a direct SO2 price replaces the cap);
//! - per-period energy capped by nameplate capacity times available hours;
//! - imported coals fixed to zero during the summer months.

use crate::solution::{
    CoefficientEntry, ConstraintRecord, KpiSummary, ModelOutput, PlanEntry, SolveArtifacts,
    VariableRecord,
};
use crate::solver::{solve_optimal, SolveError};
use coalplan_core::plant::{
    self, CAPACITY_MW, CO2_EMISSION_FACTOR, STOCKPILE_INVENTORY_T, TRANSMISSION_DEDUCTION,
};
use coalplan_core::{CoalplanError, ConfigError, Fuel, FuelMap, Period, RunConfig};
use highs::{RowProblem, Sense};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from building or solving the model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl From<ModelError> for CoalplanError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Config(e) => CoalplanError::Config(e.to_string()),
            ModelError::Solve(e) => CoalplanError::Solver(e.to_string()),
        }
    }
}

/// A constraint row staged for the solver, kept so the coefficient matrix
/// can be reported back alongside the duals.
struct RowSpec {
    name: String,
    /// Non-zero coefficients as (column index, coefficient).
    terms: Vec<(usize, f64)>,
    lower: f64,
    /// Upper bound; also the RHS used for slack reporting.
    upper: f64,
}

/// Build the LP for `config`, solve it, and extract all primal and
/// sensitivity fields.
///
/// Fails fast with a typed error when the solver reports infeasibility or
/// unboundedness; no primal or dual field is read in that case.
pub fn run_model(config: &RunConfig) -> Result<ModelOutput, ModelError> {
    config.validate()?;
    let cfg = config.normalise();

    // Decision variables in canonical fuel-major order. Column order is
    // the variable order everywhere downstream.
    let mut var_keys: Vec<(Fuel, Period)> = Vec::with_capacity(100);
    let mut var_index: HashMap<(Fuel, Period), usize> = HashMap::with_capacity(100);
    let mut obj_coeffs: Vec<f64> = Vec::with_capacity(100);
    for fuel in Fuel::ALL {
        for period in Period::all() {
            var_index.insert((fuel, period), var_keys.len());
            var_keys.push((fuel, period));
            obj_coeffs.push(objective_coeff(&cfg, fuel, period));
        }
    }

    let rows = build_rows(&cfg, &var_index);

    let mut problem = RowProblem::default();
    let cols: Vec<highs::Col> = obj_coeffs
        .iter()
        .map(|&c| problem.add_column(c, 0.0..))
        .collect();
    for row in &rows {
        let factors: Vec<(highs::Col, f64)> =
            row.terms.iter().map(|&(i, c)| (cols[i], c)).collect();
        problem.add_row(row.lower..=row.upper, &factors);
    }

    let solved = solve_optimal(problem.optimise(Sense::Maximise))?;
    let objective = solved.objective_value() - cfg.fgd_fixed_cost;
    let solution = solved.get_solution();

    let variables = extract_variables(&var_keys, &obj_coeffs, &solution);
    let constraints = extract_constraints(&rows, &solution);
    let coefficients = rows
        .iter()
        .flat_map(|row| {
            row.terms.iter().map(|&(i, c)| CoefficientEntry {
                constraint: row.name.clone(),
                variable: variables[i].name.clone(),
                coeff: c,
            })
        })
        .collect();

    let kpis = compute_kpis(&cfg, &variables, objective);
    let plan = build_plan(&variables);

    Ok(ModelOutput {
        kpis,
        plan,
        artifacts: SolveArtifacts {
            objective,
            variables,
            constraints,
            coefficients,
        },
    })
}

/// Profit contribution of one tonne of `fuel` burned in `period`.
fn objective_coeff(cfg: &RunConfig, fuel: Fuel, period: Period) -> f64 {
    let energy = plant::energy_mwh_per_tonne(fuel);
    let price = *cfg.power_price.get(period);
    let mut coeff = (price - TRANSMISSION_DEDUCTION) * energy
        - cfg.fuel_cost[fuel]
        - cfg.co2_price * cfg.exchange_rate * CO2_EMISSION_FACTOR * energy
        - (1.0 - cfg.so2_removal_eff) * fuel.sulphur_t_per_t() * cfg.so2_price;
    if fuel == Fuel::Biomass {
        coeff += cfg.roc_rate * energy;
    }
    coeff
}

fn build_rows(cfg: &RunConfig, var_index: &HashMap<(Fuel, Period), usize>) -> Vec<RowSpec> {
    let mut rows = Vec::new();
    let idx = |fuel, period| var_index[&(fuel, period)];

    rows.push(RowSpec {
        name: "Stockpile_Inventory".to_string(),
        terms: Period::all().map(|p| (idx(Fuel::Stockpile, p), 1.0)).collect(),
        lower: f64::NEG_INFINITY,
        upper: STOCKPILE_INVENTORY_T,
    });

    for period in Period::all() {
        let mut terms = Vec::new();
        for fuel in Fuel::ALL {
            let energy = plant::energy_mwh_per_tonne(fuel);
            let coeff = if fuel == Fuel::Biomass {
                (1.0 - cfg.biomass_limit) * energy
            } else {
                -cfg.biomass_limit * energy
            };
            if coeff != 0.0 {
                terms.push((idx(fuel, period), coeff));
            }
        }
        rows.push(RowSpec {
            name: format!("Biomass_Limit[{}]", period),
            terms,
            lower: f64::NEG_INFINITY,
            upper: 0.0,
        });
    }

    // Kept even when the direct SO2 price lifts the cap to infinity, so the
    // constraint still appears (non-binding) in the sensitivity tables.
    let net = 1.0 - cfg.so2_removal_eff;
    let mut sulphur_terms = Vec::new();
    for fuel in Fuel::ALL {
        let coeff = net * fuel.sulphur_t_per_t();
        if coeff == 0.0 {
            continue;
        }
        for period in Period::all() {
            sulphur_terms.push((idx(fuel, period), coeff));
        }
    }
    rows.push(RowSpec {
        name: "Sulphur_Bubble_Limit".to_string(),
        terms: sulphur_terms,
        lower: f64::NEG_INFINITY,
        upper: cfg.so2_bubble_limit,
    });

    for period in Period::all() {
        let terms = Fuel::ALL
            .iter()
            .map(|&fuel| (idx(fuel, period), plant::energy_mwh_per_tonne(fuel)))
            .collect();
        rows.push(RowSpec {
            name: format!("CapacityLimit[{}]", period),
            terms,
            lower: f64::NEG_INFINITY,
            upper: CAPACITY_MW * period.available_hours(),
        });
    }

    for fuel in Fuel::ALL.into_iter().filter(Fuel::is_imported_coal) {
        for period in Period::all().filter(|p| p.month.is_summer()) {
            rows.push(RowSpec {
                name: format!("No_Coal_Summer[{},{}]", fuel, period),
                terms: vec![(idx(fuel, period), 1.0)],
                lower: 0.0,
                upper: 0.0,
            });
        }
    }

    rows
}

fn extract_variables(
    var_keys: &[(Fuel, Period)],
    obj_coeffs: &[f64],
    solution: &highs::Solution,
) -> Vec<VariableRecord> {
    var_keys
        .iter()
        .zip(solution.columns())
        .zip(solution.dual_columns())
        .zip(obj_coeffs)
        .map(|(((&(fuel, period), &value), &reduced_cost), &objective_coeff)| {
            // Objective-coefficient ranging from the reduced cost. A column
            // away from its bound is basic; its true range needs basis
            // ranging, which the solve capability does not expose, so it is
            // reported as unbounded. Degenerate bases can make these
            // figures optimistic (known limitation).
            let (allowable_increase, allowable_decrease) = if value > 1e-6 {
                (f64::INFINITY, f64::INFINITY)
            } else if reduced_cost <= 0.0 {
                (-reduced_cost, f64::INFINITY)
            } else {
                (f64::INFINITY, reduced_cost)
            };
            VariableRecord {
                name: format!("x[{},{}]", fuel, period),
                fuel,
                period,
                value,
                objective_coeff,
                reduced_cost,
                allowable_increase,
                allowable_decrease,
            }
        })
        .collect()
}

fn extract_constraints(rows: &[RowSpec], solution: &highs::Solution) -> Vec<ConstraintRecord> {
    rows.iter()
        .zip(solution.rows())
        .zip(solution.dual_rows())
        .map(|((row, &activity), &dual)| ConstraintRecord {
            name: row.name.clone(),
            activity,
            slack: row.upper - activity,
            dual,
        })
        .collect()
}

fn compute_kpis(cfg: &RunConfig, variables: &[VariableRecord], objective: f64) -> KpiSummary {
    let mut revenue_minus_transmission = 0.0;
    let mut total_fuel_cost = 0.0;
    let mut total_generation = 0.0;
    let mut biomass_energy = 0.0;
    let mut gross_so2 = 0.0;
    let mut fuel_tonnage = FuelMap::splat(0.0);

    for var in variables {
        let energy = plant::energy_mwh(var.fuel, var.value);
        revenue_minus_transmission +=
            (*cfg.power_price.get(var.period) - TRANSMISSION_DEDUCTION) * energy;
        total_fuel_cost += cfg.fuel_cost[var.fuel] * var.value;
        total_generation += energy;
        gross_so2 += var.fuel.sulphur_t_per_t() * var.value;
        fuel_tonnage[var.fuel] += var.value;
        if var.fuel == Fuel::Biomass {
            biomass_energy += energy;
        }
    }

    let so2_emissions = (1.0 - cfg.so2_removal_eff) * gross_so2;
    KpiSummary {
        total_profit: objective,
        revenue_minus_transmission,
        roc_incentive: cfg.roc_rate * biomass_energy,
        total_fuel_cost,
        total_co2_cost: cfg.co2_price * cfg.exchange_rate * CO2_EMISSION_FACTOR * total_generation,
        total_so2_cost: so2_emissions * cfg.so2_price,
        co2_emissions: CO2_EMISSION_FACTOR * total_generation,
        so2_emissions,
        total_generation,
        fuel_tonnage,
    }
}

fn build_plan(variables: &[VariableRecord]) -> Vec<PlanEntry> {
    Period::all()
        .map(|period| {
            let mut tonnes = FuelMap::splat(0.0);
            for var in variables.iter().filter(|v| v.period == period) {
                tonnes[var.fuel] += var.value;
            }
            let total_tonnes = tonnes.iter().map(|(_, t)| t).sum();
            PlanEntry {
                period,
                tonnes,
                total_tonnes,
            }
        })
        .collect()
}
