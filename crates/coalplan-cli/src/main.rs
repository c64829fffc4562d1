use anyhow::{Context, Result};
use clap::Parser;
use coalplan_algo::{analyse, export, run_model};
use coalplan_cli::cli::{Cli, Commands};
use coalplan_cli::{history, report};
use coalplan_core::{CoalplanError, RunConfig};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so `--json` output stays machine-readable.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Solve {
            config,
            summary,
            out,
            json,
            history: history_path,
        } => {
            let cfg = load_config(config.as_deref())?;
            let summary = summary || cfg.summary;

            let output = run_model(&cfg).map_err(CoalplanError::from)?;
            let sensitivity = analyse(&output.artifacts, summary);
            info!(
                profit = output.kpis.total_profit,
                generation_mwh = output.kpis.total_generation,
                "solve complete"
            );

            if json {
                let stdout = io::stdout();
                serde_json::to_writer_pretty(
                    stdout.lock(),
                    &serde_json::json!({
                        "kpis": output.kpis,
                        "plan": output.plan,
                        "sensitivity": sensitivity,
                    }),
                )?;
                println!();
            } else {
                report::render(&mut io::stdout(), &output, &sensitivity)?;
            }

            if let Some(dir) = out {
                export::write_report_csv(&dir, &output, &sensitivity)?;
                info!(dir = %dir.display(), "CSV tables written");
            }
            if let Some(path) = history_path {
                history::append_record(&path, &history::RunRecord::from_output(&output, summary))?;
            }
            Ok(())
        }
        Commands::History { file, json } => {
            let records = history::read_records(&file)?;
            if json {
                let stdout = io::stdout();
                serde_json::to_writer_pretty(stdout.lock(), &records)?;
                println!();
            } else {
                report::render_history(&mut io::stdout(), &records)?;
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        None => Ok(RunConfig::default()),
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            let cfg: RunConfig = toml::from_str(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?;
            Ok(cfg)
        }
    }
}
