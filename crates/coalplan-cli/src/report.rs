//! Table rendering for solve results and run history.

use anyhow::Result;
use coalplan_algo::{ModelOutput, SensitivityReport};
use coalplan_core::Fuel;
use std::io::Write;
use tabwriter::TabWriter;

use crate::history::RunRecord;

/// Render the KPI block, the fuel plan and the sensitivity tables.
pub fn render(out: &mut impl Write, output: &ModelOutput, report: &SensitivityReport) -> Result<()> {
    render_kpis(out, output)?;
    writeln!(out)?;
    render_plan(out, output)?;
    writeln!(out)?;
    render_constraints(out, report)?;
    writeln!(out)?;
    render_attribution(out, report)?;
    Ok(())
}

fn render_kpis(out: &mut impl Write, output: &ModelOutput) -> Result<()> {
    let k = &output.kpis;
    let mut tw = TabWriter::new(&mut *out);
    writeln!(tw, "Total profit\t{:.2}", k.total_profit)?;
    writeln!(tw, "Revenue (net of transmission)\t{:.2}", k.revenue_minus_transmission)?;
    writeln!(tw, "ROC incentive\t{:.2}", k.roc_incentive)?;
    writeln!(tw, "Fuel cost\t{:.2}", k.total_fuel_cost)?;
    writeln!(tw, "CO2 cost\t{:.2}", k.total_co2_cost)?;
    writeln!(tw, "SO2 cost\t{:.2}", k.total_so2_cost)?;
    writeln!(tw, "Generation (MWh)\t{:.0}", k.total_generation)?;
    writeln!(tw, "CO2 emitted (t)\t{:.0}", k.co2_emissions)?;
    writeln!(tw, "SO2 emitted (t)\t{:.1}", k.so2_emissions)?;
    tw.flush()?;
    Ok(())
}

fn render_plan(out: &mut impl Write, output: &ModelOutput) -> Result<()> {
    let mut tw = TabWriter::new(&mut *out);
    write!(tw, "MONTH\tBAND")?;
    for fuel in Fuel::ALL {
        write!(tw, "\t{}", fuel)?;
    }
    writeln!(tw, "\tTOTAL")?;
    for entry in &output.plan {
        write!(tw, "{}\t{}", entry.period.month, entry.period.band)?;
        for fuel in Fuel::ALL {
            write!(tw, "\t{:.1}", entry.tonnes[fuel])?;
        }
        writeln!(tw, "\t{:.1}", entry.total_tonnes)?;
    }
    tw.flush()?;
    Ok(())
}

fn render_constraints(out: &mut impl Write, report: &SensitivityReport) -> Result<()> {
    let mut tw = TabWriter::new(&mut *out);
    writeln!(tw, "CONSTRAINT\tFINAL VALUE\tSLACK\tDUAL\tSTATUS")?;
    for con in &report.constraints {
        writeln!(
            tw,
            "{}\t{:.5}\t{:.5}\t{:.5}\t{}",
            con.name, con.final_value, con.slack, con.dual, con.status
        )?;
    }
    tw.flush()?;
    Ok(())
}

fn render_attribution(out: &mut impl Write, report: &SensitivityReport) -> Result<()> {
    let mut tw = TabWriter::new(&mut *out);
    writeln!(tw, "FUEL\tCONSTRAINT\tMARGIN PROFIT GAIN\tAVG DUAL\tMONTHS")?;
    for row in &report.attribution {
        let months = row
            .months
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            tw,
            "{}\t{}\t{:.5}\t{:.5}\t{}",
            row.fuel, row.constraint, row.total_margin_profit_gain, row.mean_dual, months
        )?;
    }
    tw.flush()?;
    Ok(())
}

/// Render the run-history table.
pub fn render_history(out: &mut impl Write, records: &[RunRecord]) -> Result<()> {
    let mut tw = TabWriter::new(&mut *out);
    writeln!(tw, "RUN ID\tTIMESTAMP\tPROFIT\tGENERATION (MWh)\tSO2 (t)")?;
    for record in records {
        writeln!(
            tw,
            "{}\t{}\t{:.2}\t{:.0}\t{:.1}",
            record.run_id,
            record.timestamp.to_rfc3339(),
            record.total_profit,
            record.total_generation,
            record.so2_emissions
        )?;
    }
    tw.flush()?;
    Ok(())
}
