//! Post-solve sensitivity analysis.
//!
//! Pure functions over the raw solver artifacts: no solver re-invocation,
//! no shared state. Three classified views are produced:
//!
//! 1. per-variable status (utilised / better_if / worse_if / neutral);
//! 2. per-constraint status (binding_resource / binding_requirement /
//!    non_binding);
//! 3. a variable×constraint attribution joining the coefficient matrix with
//!    both classified tables, aggregated to marginal profit gain per
//!    (fuel, constraint).
//!
//! Degenerate rows (value and reduced cost both below tolerance, or dual
//! below tolerance with sub-granularity slack) are dropped entirely; an
//! empty table is a valid result. All reported figures are rounded to five
//! decimal places to avoid spurious precision downstream.

use crate::solution::SolveArtifacts;
use coalplan_core::{Band, Fuel, Month, Period};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Tolerance for value, reduced-cost and slack comparisons.
pub const VALUE_TOLERANCE: f64 = 1e-6;

/// Tolerance below which a dual value counts as zero.
pub const DUAL_TOLERANCE: f64 = 1e-8;

/// Minimum slack worth reporting for a constraint with a zero dual.
pub const SLACK_MIN_STEP: f64 = 0.1;

/// Classification of a decision variable at the optimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableStatus {
    /// In the optimal mix (positive value, zero reduced cost).
    Utilised,
    /// At zero with negative reduced cost.
    BetterIf,
    /// At zero with positive reduced cost.
    WorseIf,
    /// Anything else (degenerate or off-pattern).
    Neutral,
}

impl fmt::Display for VariableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VariableStatus::Utilised => "utilised",
            VariableStatus::BetterIf => "better_if",
            VariableStatus::WorseIf => "worse_if",
            VariableStatus::Neutral => "neutral",
        };
        write!(f, "{}", s)
    }
}

/// Classification of a constraint at the optimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintStatus {
    /// Binding with a positive dual: a scarce resource; relaxing it gains
    /// profit.
    BindingResource,
    /// Binding with a negative dual: an imposed requirement; relaxing it
    /// gains profit in the other direction.
    BindingRequirement,
    /// Slack at the optimum.
    NonBinding,
}

impl fmt::Display for ConstraintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConstraintStatus::BindingResource => "binding_resource",
            ConstraintStatus::BindingRequirement => "binding_requirement",
            ConstraintStatus::NonBinding => "non_binding",
        };
        write!(f, "{}", s)
    }
}

/// One row of the classified variable table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedVariable {
    pub name: String,
    pub fuel: Fuel,
    pub period: Period,
    pub value: f64,
    pub objective_coeff: f64,
    pub reduced_cost: f64,
    pub allowable_increase: f64,
    pub allowable_decrease: f64,
    /// Zero reduced cost within tolerance.
    pub binding: bool,
    pub status: VariableStatus,
}

/// One row of the classified constraint table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedConstraint {
    pub name: String,
    /// Row activity at the optimum.
    pub final_value: f64,
    pub slack: f64,
    pub dual: f64,
    /// Zero slack within tolerance.
    pub binding: bool,
    pub status: ConstraintStatus,
}

/// Marginal profit attribution for one (fuel, constraint) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributionRow {
    pub fuel: Fuel,
    pub constraint: String,
    /// Sum of coefficient × dual over the pair's matrix entries.
    pub total_margin_profit_gain: f64,
    pub mean_dual: f64,
    /// Distinct months touched, in horizon order.
    pub months: Vec<Month>,
    /// Distinct bands touched, in canonical order.
    pub bands: Vec<Band>,
}

/// Estimated profit change from tightening a currently non-binding
/// constraint by one unit. Only meaningful for zero-dual rows; linear
/// ranging assumptions apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TightenEstimate {
    pub constraint: String,
    pub profit_change_per_unit_tighten: f64,
}

/// The three classified tables plus the tightening estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityReport {
    pub variables: Vec<ClassifiedVariable>,
    pub constraints: Vec<ClassifiedConstraint>,
    pub attribution: Vec<AttributionRow>,
    pub tighten_estimates: Vec<TightenEstimate>,
}

/// Round to five decimal places; infinities pass through.
fn round5(x: f64) -> f64 {
    (x * 1e5).round() / 1e5
}

/// Classify the raw solver output into the three sensitivity tables.
///
/// With `summary` set, both classified tables keep only binding rows (zero
/// reduced cost for variables, zero slack for constraints); the attribution
/// join runs over whichever rows survive.
pub fn analyse(artifacts: &SolveArtifacts, summary: bool) -> SensitivityReport {
    let variables = classify_variables(artifacts, summary);
    let constraints = classify_constraints(artifacts, summary);
    let (attribution, tighten_estimates) =
        cross_attribution(artifacts, &variables, &constraints);

    SensitivityReport {
        variables,
        constraints,
        attribution,
        tighten_estimates,
    }
}

fn classify_variables(artifacts: &SolveArtifacts, summary: bool) -> Vec<ClassifiedVariable> {
    let mut out = Vec::new();
    for var in &artifacts.variables {
        // Degenerate and uninformative: at zero with zero reduced cost.
        if var.value.abs() <= VALUE_TOLERANCE && var.reduced_cost.abs() <= VALUE_TOLERANCE {
            continue;
        }
        let status = if var.value > 0.0 && var.reduced_cost.abs() < VALUE_TOLERANCE {
            VariableStatus::Utilised
        } else if var.value == 0.0 && var.reduced_cost < 0.0 {
            VariableStatus::BetterIf
        } else if var.value == 0.0 && var.reduced_cost > 0.0 {
            VariableStatus::WorseIf
        } else {
            VariableStatus::Neutral
        };
        let binding = var.reduced_cost.abs() < VALUE_TOLERANCE;
        if summary && !binding {
            continue;
        }
        out.push(ClassifiedVariable {
            name: var.name.clone(),
            fuel: var.fuel,
            period: var.period,
            value: round5(var.value),
            objective_coeff: round5(var.objective_coeff),
            reduced_cost: round5(var.reduced_cost),
            allowable_increase: round5(var.allowable_increase),
            allowable_decrease: round5(var.allowable_decrease),
            binding,
            status,
        });
    }
    out
}

fn classify_constraints(artifacts: &SolveArtifacts, summary: bool) -> Vec<ClassifiedConstraint> {
    let mut out = Vec::new();
    for con in &artifacts.constraints {
        // Zero dual and sub-granularity slack carries no information.
        if con.dual.abs() <= DUAL_TOLERANCE && con.slack < SLACK_MIN_STEP {
            continue;
        }
        let status = if con.slack.abs() < VALUE_TOLERANCE && con.dual > VALUE_TOLERANCE {
            ConstraintStatus::BindingResource
        } else if con.slack.abs() < VALUE_TOLERANCE && con.dual < -VALUE_TOLERANCE {
            ConstraintStatus::BindingRequirement
        } else {
            ConstraintStatus::NonBinding
        };
        let binding = con.slack.abs() < VALUE_TOLERANCE;
        if summary && !binding {
            continue;
        }
        out.push(ClassifiedConstraint {
            name: con.name.clone(),
            final_value: round5(con.activity),
            slack: round5(con.slack),
            dual: round5(con.dual),
            binding,
            status,
        });
    }
    out
}

/// Join the coefficient matrix with both classified tables and aggregate.
fn cross_attribution(
    artifacts: &SolveArtifacts,
    variables: &[ClassifiedVariable],
    constraints: &[ClassifiedConstraint],
) -> (Vec<AttributionRow>, Vec<TightenEstimate>) {
    let var_by_name: HashMap<&str, &ClassifiedVariable> =
        variables.iter().map(|v| (v.name.as_str(), v)).collect();
    let con_by_name: HashMap<&str, &ClassifiedConstraint> =
        constraints.iter().map(|c| (c.name.as_str(), c)).collect();

    struct Group {
        total_gain: f64,
        dual_sum: f64,
        count: usize,
        months: BTreeSet<Month>,
        bands: BTreeSet<Band>,
    }

    let mut groups: BTreeMap<(Fuel, String), Group> = BTreeMap::new();
    let mut tighten: BTreeMap<String, f64> = BTreeMap::new();

    for entry in &artifacts.coefficients {
        // Inner join: pairs whose variable or constraint was filtered out of
        // the classified tables contribute nothing.
        let (Some(var), Some(con)) = (
            var_by_name.get(entry.variable.as_str()),
            con_by_name.get(entry.constraint.as_str()),
        ) else {
            continue;
        };

        let coeff = round5(entry.coeff);
        let gain = coeff * con.dual;

        let group = groups
            .entry((var.fuel, con.name.clone()))
            .or_insert_with(|| Group {
                total_gain: 0.0,
                dual_sum: 0.0,
                count: 0,
                months: BTreeSet::new(),
                bands: BTreeSet::new(),
            });
        group.total_gain += gain;
        group.dual_sum += con.dual;
        group.count += 1;
        group.months.insert(var.period.month);
        group.bands.insert(var.period.band);

        // Profit sensitivity to tightening a currently slack constraint by
        // one unit, estimated from the objective coefficient.
        if con.dual == 0.0 && coeff != 0.0 {
            *tighten.entry(con.name.clone()).or_insert(0.0) +=
                -var.objective_coeff / coeff;
        }
    }

    let mut attribution: Vec<AttributionRow> = groups
        .into_iter()
        .map(|((fuel, constraint), g)| AttributionRow {
            fuel,
            constraint,
            total_margin_profit_gain: round5(g.total_gain),
            mean_dual: round5(g.dual_sum / g.count as f64),
            months: g.months.into_iter().collect(),
            bands: g.bands.into_iter().collect(),
        })
        .collect();
    // Descending by total gain; the BTreeMap origin makes ties stable by
    // (fuel, constraint).
    attribution.sort_by(|a, b| {
        b.total_margin_profit_gain
            .partial_cmp(&a.total_margin_profit_gain)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let tighten_estimates = tighten
        .into_iter()
        .map(|(constraint, sum)| TightenEstimate {
            constraint,
            profit_change_per_unit_tighten: round5(sum),
        })
        .collect();

    (attribution, tighten_estimates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::{CoefficientEntry, ConstraintRecord, VariableRecord};
    use coalplan_core::{Band, Month, Period};

    fn var(name: &str, fuel: Fuel, value: f64, reduced_cost: f64) -> VariableRecord {
        VariableRecord {
            name: name.to_string(),
            fuel,
            period: Period::new(Month::June, Band::WdPeak),
            value,
            objective_coeff: 10.0,
            reduced_cost,
            allowable_increase: f64::INFINITY,
            allowable_decrease: f64::INFINITY,
        }
    }

    fn con(name: &str, slack: f64, dual: f64) -> ConstraintRecord {
        ConstraintRecord {
            name: name.to_string(),
            activity: 100.0 - slack,
            slack,
            dual,
        }
    }

    fn artifacts(
        variables: Vec<VariableRecord>,
        constraints: Vec<ConstraintRecord>,
        coefficients: Vec<CoefficientEntry>,
    ) -> SolveArtifacts {
        SolveArtifacts {
            objective: 0.0,
            variables,
            constraints,
            coefficients,
        }
    }

    #[test]
    fn variable_classification_covers_all_cases() {
        let arts = artifacts(
            vec![
                var("a", Fuel::Stockpile, 5.0, 0.0),
                var("b", Fuel::Columbian, 0.0, -3.0),
                var("c", Fuel::Russian, 0.0, 3.0),
                var("d", Fuel::Scottish, 5.0, 2.0),
            ],
            vec![],
            vec![],
        );
        let report = analyse(&arts, false);
        let statuses: Vec<VariableStatus> = report.variables.iter().map(|v| v.status).collect();
        assert_eq!(
            statuses,
            vec![
                VariableStatus::Utilised,
                VariableStatus::BetterIf,
                VariableStatus::WorseIf,
                VariableStatus::Neutral,
            ]
        );
    }

    #[test]
    fn degenerate_variable_rows_are_dropped() {
        let arts = artifacts(
            vec![
                var("zero", Fuel::Biomass, 0.0, 0.0),
                var("tiny", Fuel::Biomass, 1e-9, -1e-9),
                var("kept", Fuel::Biomass, 1.0, 0.0),
            ],
            vec![],
            vec![],
        );
        let report = analyse(&arts, false);
        assert_eq!(report.variables.len(), 1);
        assert_eq!(report.variables[0].name, "kept");
    }

    #[test]
    fn constraint_classification_covers_all_cases() {
        let arts = artifacts(
            vec![],
            vec![
                con("scarce", 0.0, 42.0),
                con("forced", 0.0, -42.0),
                con("loose", 50.0, 0.0),
            ],
            vec![],
        );
        let report = analyse(&arts, false);
        let statuses: Vec<ConstraintStatus> =
            report.constraints.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                ConstraintStatus::BindingResource,
                ConstraintStatus::BindingRequirement,
                ConstraintStatus::NonBinding,
            ]
        );
    }

    #[test]
    fn zero_dual_sub_granularity_slack_is_dropped() {
        let arts = artifacts(
            vec![],
            vec![con("noise", 0.05, 0.0), con("kept", 0.05, 1.0)],
            vec![],
        );
        let report = analyse(&arts, false);
        assert_eq!(report.constraints.len(), 1);
        assert_eq!(report.constraints[0].name, "kept");
    }

    #[test]
    fn summary_keeps_only_binding_rows() {
        let arts = artifacts(
            vec![
                var("in_mix", Fuel::Stockpile, 5.0, 0.0),
                var("blocked", Fuel::Scottish, 0.0, -3.0),
            ],
            vec![con("tight", 0.0, 7.0), con("loose", 50.0, 0.0)],
            vec![],
        );
        let full = analyse(&arts, false);
        assert_eq!(full.variables.len(), 2);
        assert_eq!(full.constraints.len(), 2);

        let summary = analyse(&arts, true);
        assert_eq!(summary.variables.len(), 1);
        assert_eq!(summary.variables[0].name, "in_mix");
        assert_eq!(summary.constraints.len(), 1);
        assert_eq!(summary.constraints[0].name, "tight");
    }

    #[test]
    fn figures_are_rounded_to_five_decimals() {
        let arts = artifacts(
            vec![var("a", Fuel::Stockpile, 1.2345678, 0.0)],
            vec![con("c", 0.0, 3.9999999)],
            vec![],
        );
        let report = analyse(&arts, false);
        assert_eq!(report.variables[0].value, 1.23457);
        assert_eq!(report.constraints[0].dual, 4.0);
    }

    #[test]
    fn analyse_is_idempotent() {
        let arts = artifacts(
            vec![
                var("a", Fuel::Stockpile, 5.0, 0.0),
                var("b", Fuel::Biomass, 0.0, -1.5),
            ],
            vec![con("cap", 0.0, 11.0), con("inv", 25.0, 0.0)],
            vec![
                CoefficientEntry {
                    constraint: "cap".to_string(),
                    variable: "a".to_string(),
                    coeff: 2.5,
                },
                CoefficientEntry {
                    constraint: "inv".to_string(),
                    variable: "b".to_string(),
                    coeff: 1.0,
                },
            ],
        );
        assert_eq!(analyse(&arts, false), analyse(&arts, false));
        assert_eq!(analyse(&arts, true), analyse(&arts, true));
    }

    #[test]
    fn attribution_joins_and_aggregates() {
        let mut v1 = var("x[Stockpile,June,WD_peak]", Fuel::Stockpile, 5.0, 0.0);
        v1.period = Period::new(Month::June, Band::WdPeak);
        let mut v2 = var("x[Stockpile,July,WE_peak]", Fuel::Stockpile, 3.0, 0.0);
        v2.period = Period::new(Month::July, Band::WePeak);
        let mut v3 = var("x[Biomass,June,WD_peak]", Fuel::Biomass, 2.0, 0.0);
        v3.period = Period::new(Month::June, Band::WdPeak);

        let arts = artifacts(
            vec![v1, v2, v3],
            vec![con("Sulphur", 0.0, 100.0)],
            vec![
                CoefficientEntry {
                    constraint: "Sulphur".to_string(),
                    variable: "x[Stockpile,June,WD_peak]".to_string(),
                    coeff: 0.0138,
                },
                CoefficientEntry {
                    constraint: "Sulphur".to_string(),
                    variable: "x[Stockpile,July,WE_peak]".to_string(),
                    coeff: 0.0138,
                },
                CoefficientEntry {
                    constraint: "Sulphur".to_string(),
                    variable: "x[Biomass,June,WD_peak]".to_string(),
                    coeff: 0.0001,
                },
            ],
        );
        let report = analyse(&arts, false);
        assert_eq!(report.attribution.len(), 2);

        // Stockpile contributes 2 × 0.0138 × 100 = 2.76, biomass 0.01;
        // descending by gain puts stockpile first.
        let stockpile = &report.attribution[0];
        assert_eq!(stockpile.fuel, Fuel::Stockpile);
        assert!((stockpile.total_margin_profit_gain - 2.76).abs() < 1e-9);
        assert_eq!(stockpile.mean_dual, 100.0);
        assert_eq!(stockpile.months, vec![Month::June, Month::July]);
        assert_eq!(stockpile.bands, vec![Band::WdPeak, Band::WePeak]);

        let biomass = &report.attribution[1];
        assert_eq!(biomass.fuel, Fuel::Biomass);
        assert!((biomass.total_margin_profit_gain - 0.01).abs() < 1e-9);
    }

    #[test]
    fn tighten_estimate_sums_over_zero_dual_rows() {
        let mut v = var("a", Fuel::Stockpile, 5.0, 0.0);
        v.objective_coeff = 12.0;
        let arts = artifacts(
            vec![v],
            vec![con("loose", 40.0, 0.0)],
            vec![CoefficientEntry {
                constraint: "loose".to_string(),
                variable: "a".to_string(),
                coeff: 4.0,
            }],
        );
        let report = analyse(&arts, false);
        assert_eq!(report.tighten_estimates.len(), 1);
        let est = &report.tighten_estimates[0];
        assert_eq!(est.constraint, "loose");
        // -obj/coeff = -12/4
        assert_eq!(est.profit_change_per_unit_tighten, -3.0);
        // Binding constraints contribute no tightening estimate.
        assert!(report
            .tighten_estimates
            .iter()
            .all(|t| t.constraint != "tight"));
    }

    #[test]
    fn empty_input_is_a_valid_empty_report() {
        let report = analyse(&artifacts(vec![], vec![], vec![]), false);
        assert!(report.variables.is_empty());
        assert!(report.constraints.is_empty());
        assert!(report.attribution.is_empty());
        assert!(report.tighten_estimates.is_empty());
    }
}
