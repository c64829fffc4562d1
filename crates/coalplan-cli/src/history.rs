//! Run history: one JSON line per solve, appended to a shared file so
//! scenario runs can be compared afterwards.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use coalplan_algo::ModelOutput;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use uuid::Uuid;

/// One recorded solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    /// Whether the sensitivity tables were restricted to binding rows.
    pub summary: bool,
    pub total_profit: f64,
    pub total_generation: f64,
    pub co2_emissions: f64,
    pub so2_emissions: f64,
}

impl RunRecord {
    pub fn from_output(output: &ModelOutput, summary: bool) -> Self {
        RunRecord {
            run_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            summary,
            total_profit: output.kpis.total_profit,
            total_generation: output.kpis.total_generation,
            co2_emissions: output.kpis.co2_emissions,
            so2_emissions: output.kpis.so2_emissions,
        }
    }
}

/// Append one record to `path`, creating the file if needed.
pub fn append_record(path: &Path, record: &RunRecord) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening history file {}", path.display()))?;
    let line = serde_json::to_string(record)?;
    writeln!(file, "{line}")
        .with_context(|| format!("appending to history file {}", path.display()))?;
    Ok(())
}

/// Read every record from `path`. A missing file is an empty history.
pub fn read_records(path: &Path) -> Result<Vec<RunRecord>> {
    if !path.exists() {
        return Ok(vec![]);
    }
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening history file {}", path.display()))?;
    let mut records = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: RunRecord = serde_json::from_str(&line).with_context(|| {
            format!("parsing history line {} of {}", number + 1, path.display())
        })?;
        records.push(record);
    }
    Ok(records)
}
