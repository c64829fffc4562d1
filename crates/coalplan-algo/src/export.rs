//! Dataframe conversion and CSV persistence for the solved-run tables.
//!
//! The classified tables are plain records; downstream analytics and the
//! CLI want them as dataframes. Conversion is one-way (the analyzer never
//! reads these back).

use crate::sensitivity::SensitivityReport;
use crate::solution::ModelOutput;
use anyhow::{Context, Result};
use coalplan_core::Fuel;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// Classified variable table as a dataframe.
pub fn variables_to_dataframe(report: &SensitivityReport) -> Result<DataFrame> {
    let vars = &report.variables;
    Ok(DataFrame::new(vec![
        Series::new("variable", vars.iter().map(|v| v.name.clone()).collect::<Vec<_>>()),
        Series::new("final_value", vars.iter().map(|v| v.value).collect::<Vec<_>>()),
        Series::new("obj", vars.iter().map(|v| v.objective_coeff).collect::<Vec<_>>()),
        Series::new("reduced_cost", vars.iter().map(|v| v.reduced_cost).collect::<Vec<_>>()),
        Series::new(
            "allowable_increase",
            vars.iter().map(|v| v.allowable_increase).collect::<Vec<_>>(),
        ),
        Series::new(
            "allowable_decrease",
            vars.iter().map(|v| v.allowable_decrease).collect::<Vec<_>>(),
        ),
        Series::new("binding", vars.iter().map(|v| v.binding).collect::<Vec<_>>()),
        Series::new(
            "variable_status",
            vars.iter().map(|v| v.status.to_string()).collect::<Vec<_>>(),
        ),
    ])?)
}

/// Classified constraint table as a dataframe.
pub fn constraints_to_dataframe(report: &SensitivityReport) -> Result<DataFrame> {
    let cons = &report.constraints;
    Ok(DataFrame::new(vec![
        Series::new("constraint", cons.iter().map(|c| c.name.clone()).collect::<Vec<_>>()),
        Series::new("final_value", cons.iter().map(|c| c.final_value).collect::<Vec<_>>()),
        Series::new("slack", cons.iter().map(|c| c.slack).collect::<Vec<_>>()),
        Series::new("dual", cons.iter().map(|c| c.dual).collect::<Vec<_>>()),
        Series::new("binding", cons.iter().map(|c| c.binding).collect::<Vec<_>>()),
        Series::new(
            "constraint_status",
            cons.iter().map(|c| c.status.to_string()).collect::<Vec<_>>(),
        ),
    ])?)
}

/// Attribution table as a dataframe. Month and band sets are joined into
/// single space-separated columns.
pub fn attribution_to_dataframe(report: &SensitivityReport) -> Result<DataFrame> {
    let rows = &report.attribution;
    let months: Vec<String> = rows
        .iter()
        .map(|r| {
            r.months
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    let bands: Vec<String> = rows
        .iter()
        .map(|r| {
            r.bands
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    Ok(DataFrame::new(vec![
        Series::new("fuel", rows.iter().map(|r| r.fuel.to_string()).collect::<Vec<_>>()),
        Series::new("constraint", rows.iter().map(|r| r.constraint.clone()).collect::<Vec<_>>()),
        Series::new(
            "total_margin_profit_gain",
            rows.iter().map(|r| r.total_margin_profit_gain).collect::<Vec<_>>(),
        ),
        Series::new("avg_dual", rows.iter().map(|r| r.mean_dual).collect::<Vec<_>>()),
        Series::new("months", months),
        Series::new("bands", bands),
    ])?)
}

/// Tightening estimates as a dataframe.
pub fn tighten_to_dataframe(report: &SensitivityReport) -> Result<DataFrame> {
    let rows = &report.tighten_estimates;
    Ok(DataFrame::new(vec![
        Series::new("constraint", rows.iter().map(|r| r.constraint.clone()).collect::<Vec<_>>()),
        Series::new(
            "profit_change_per_unit_tighten",
            rows.iter()
                .map(|r| r.profit_change_per_unit_tighten)
                .collect::<Vec<_>>(),
        ),
    ])?)
}

/// Single-row KPI dataframe.
pub fn kpis_to_dataframe(output: &ModelOutput) -> Result<DataFrame> {
    let k = &output.kpis;
    let mut columns = vec![
        Series::new("total_profit", vec![k.total_profit]),
        Series::new("revenue_minus_transmission", vec![k.revenue_minus_transmission]),
        Series::new("roc_incentive", vec![k.roc_incentive]),
        Series::new("total_fuel_cost", vec![k.total_fuel_cost]),
        Series::new("total_co2_cost", vec![k.total_co2_cost]),
        Series::new("total_so2_cost", vec![k.total_so2_cost]),
        Series::new("co2_emissions", vec![k.co2_emissions]),
        Series::new("so2_emissions", vec![k.so2_emissions]),
        Series::new("total_generation", vec![k.total_generation]),
    ];
    for (fuel, &tonnes) in k.fuel_tonnage.iter() {
        columns.push(Series::new(&format!("tonnes_{}", fuel), vec![tonnes]));
    }
    Ok(DataFrame::new(columns)?)
}

/// Per-period fuel plan as a dataframe with one column per fuel.
pub fn plan_to_dataframe(output: &ModelOutput) -> Result<DataFrame> {
    let plan = &output.plan;
    let mut columns = vec![
        Series::new(
            "month",
            plan.iter().map(|e| e.period.month.to_string()).collect::<Vec<_>>(),
        ),
        Series::new(
            "band",
            plan.iter().map(|e| e.period.band.to_string()).collect::<Vec<_>>(),
        ),
    ];
    for fuel in Fuel::ALL {
        columns.push(Series::new(
            &fuel.to_string(),
            plan.iter().map(|e| e.tonnes[fuel]).collect::<Vec<_>>(),
        ));
    }
    columns.push(Series::new(
        "total_tonnes",
        plan.iter().map(|e| e.total_tonnes).collect::<Vec<_>>(),
    ));
    Ok(DataFrame::new(columns)?)
}

/// Write the plan and the four sensitivity tables as CSV files under `dir`.
pub fn write_report_csv(
    dir: &Path,
    output: &ModelOutput,
    report: &SensitivityReport,
) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory '{}'", dir.display()))?;

    let tables = [
        ("kpis.csv", kpis_to_dataframe(output)?),
        ("fuel_plan.csv", plan_to_dataframe(output)?),
        ("variables.csv", variables_to_dataframe(report)?),
        ("constraints.csv", constraints_to_dataframe(report)?),
        ("attribution.csv", attribution_to_dataframe(report)?),
        ("tighten_estimates.csv", tighten_to_dataframe(report)?),
    ];
    for (name, mut df) in tables {
        let path = dir.join(name);
        let mut file = File::create(&path)
            .with_context(|| format!("creating output file '{}'", path.display()))?;
        CsvWriter::new(&mut file)
            .finish(&mut df)
            .with_context(|| format!("writing CSV to '{}'", path.display()))?;
    }
    Ok(())
}
