//! Per-run configuration
//!
//! A [`RunConfig`] bundles every economic and regulatory input a single solve
//! depends on. The bundle is immutable once handed to the model builder; two
//! of its fields are coupled and resolved deterministically by
//! [`RunConfig::normalise`] before the model is built.

use crate::{Band, Fuel, FuelMap, Month, Period, PeriodMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error: the bundle is malformed or internally inconsistent.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("biomass blending limit {0} outside [0, 1]")]
    BiomassLimit(f64),
    #[error("SO2 removal efficiency {0} outside [0, 1]")]
    RemovalEfficiency(f64),
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Inputs for one solve of the fuel-procurement model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// ROC incentive rate, currency per MWh of biomass generation.
    pub roc_rate: f64,
    /// Unit cost per tonne for each fuel.
    pub fuel_cost: FuelMap<f64>,
    /// Electricity sale price per period, currency per MWh.
    pub power_price: PeriodMap<f64>,
    /// CO2 price, currency per tonne.
    pub co2_price: f64,
    /// Fraction of sulphur removed by FGD (0 when no FGD investment).
    pub so2_removal_eff: f64,
    /// One-time fixed cost of the FGD investment.
    pub fgd_fixed_cost: f64,
    /// Aggregate cap on net SO2 emission across the horizon, tonnes.
    pub so2_bubble_limit: f64,
    /// Direct SO2 price, currency per tonne. Non-zero disables the bubble cap.
    pub so2_price: f64,
    /// Currency exchange rate applied to the CO2 price.
    pub exchange_rate: f64,
    /// Maximum biomass share of period energy, fraction.
    pub biomass_limit: f64,
    /// Restrict sensitivity tables to binding rows only.
    pub summary: bool,
}

impl Default for RunConfig {
    /// The documented base case.
    fn default() -> Self {
        RunConfig {
            roc_rate: 45.0,
            fuel_cost: base_fuel_costs(),
            power_price: base_power_prices(),
            co2_price: 15.0,
            so2_removal_eff: 0.0,
            fgd_fixed_cost: 0.0,
            so2_bubble_limit: 9000.0,
            so2_price: 0.0,
            exchange_rate: 0.87,
            biomass_limit: 0.1,
            summary: false,
        }
    }
}

impl RunConfig {
    /// Resolve the two coupled input pairs into a consistent bundle.
    ///
    /// A direct SO2 price replaces the bubble cap, never both: any non-zero
    /// `so2_price` lifts `so2_bubble_limit` to infinity. The FGD investment
    /// only exists as a pair: if either the fixed cost or the removal
    /// efficiency is zero, both are zeroed.
    pub fn normalise(&self) -> RunConfig {
        let mut cfg = self.clone();
        if cfg.so2_price != 0.0 {
            cfg.so2_bubble_limit = f64::INFINITY;
        }
        if cfg.fgd_fixed_cost == 0.0 || cfg.so2_removal_eff == 0.0 {
            cfg.fgd_fixed_cost = 0.0;
            cfg.so2_removal_eff = 0.0;
        }
        cfg
    }

    /// Check structural invariants. Value ranges beyond these are a
    /// presentation-layer concern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.biomass_limit) {
            return Err(ConfigError::BiomassLimit(self.biomass_limit));
        }
        if !(0.0..=1.0).contains(&self.so2_removal_eff) {
            return Err(ConfigError::RemovalEfficiency(self.so2_removal_eff));
        }
        for (field, value) in [
            ("roc_rate", self.roc_rate),
            ("co2_price", self.co2_price),
            ("fgd_fixed_cost", self.fgd_fixed_cost),
            ("so2_price", self.so2_price),
            ("exchange_rate", self.exchange_rate),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        Ok(())
    }
}

fn base_fuel_costs() -> FuelMap<f64> {
    FuelMap::from_fn(|fuel| match fuel {
        Fuel::Stockpile => 42.56,
        Fuel::Columbian => 43.93,
        Fuel::Russian => 43.80,
        Fuel::Scottish => 42.00,
        Fuel::Biomass => 73.77,
    })
}

fn base_power_prices() -> PeriodMap<f64> {
    PeriodMap::from_fn(|Period { month, band }| match (month, band) {
        (Month::June, Band::WdPeak) => 36.00,
        (Month::June, Band::WdOffpeak) => 27.00,
        (Month::June, Band::WePeak) => 33.50,
        (Month::June, Band::WeOffpeak) => 26.20,
        (Month::July, Band::WdPeak) => 36.35,
        (Month::July, Band::WdOffpeak) => 27.00,
        (Month::July, Band::WePeak) => 34.30,
        (Month::July, Band::WeOffpeak) => 26.30,
        (Month::August, Band::WdPeak) => 37.65,
        (Month::August, Band::WdOffpeak) => 28.20,
        (Month::August, Band::WePeak) => 35.65,
        (Month::August, Band::WeOffpeak) => 27.50,
        (Month::September, Band::WdPeak) => 38.35,
        (Month::September, Band::WdOffpeak) => 28.50,
        (Month::September, Band::WePeak) => 35.80,
        (Month::September, Band::WeOffpeak) => 27.65,
        (Month::October, Band::WdPeak) => 43.70,
        (Month::October, Band::WdOffpeak) => 31.70,
        (Month::October, Band::WePeak) => 38.70,
        (Month::October, Band::WeOffpeak) => 30.10,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn so2_price_disables_bubble_cap() {
        let cfg = RunConfig {
            so2_price: 250.0,
            so2_bubble_limit: 9000.0,
            ..RunConfig::default()
        };
        let resolved = cfg.normalise();
        assert!(resolved.so2_bubble_limit.is_infinite());
    }

    #[test]
    fn fgd_pair_zeroed_together() {
        let eff_only = RunConfig {
            so2_removal_eff: 0.9,
            fgd_fixed_cost: 0.0,
            ..RunConfig::default()
        }
        .normalise();
        assert_eq!(eff_only.so2_removal_eff, 0.0);

        let cost_only = RunConfig {
            so2_removal_eff: 0.0,
            fgd_fixed_cost: 1.0e6,
            ..RunConfig::default()
        }
        .normalise();
        assert_eq!(cost_only.fgd_fixed_cost, 0.0);

        let both = RunConfig {
            so2_removal_eff: 0.9,
            fgd_fixed_cost: 1.0e6,
            ..RunConfig::default()
        }
        .normalise();
        assert_eq!(both.so2_removal_eff, 0.9);
        assert_eq!(both.fgd_fixed_cost, 1.0e6);
    }

    #[test]
    fn normalise_keeps_bubble_when_no_so2_price() {
        let resolved = RunConfig::default().normalise();
        assert_eq!(resolved.so2_bubble_limit, 9000.0);
    }

    #[test]
    fn validate_rejects_bad_fractions() {
        let cfg = RunConfig {
            biomass_limit: 1.2,
            ..RunConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::BiomassLimit(_))));

        let cfg = RunConfig {
            so2_removal_eff: -0.1,
            ..RunConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::RemovalEfficiency(_))));
    }

    #[test]
    fn base_case_round_trips_through_json() {
        let cfg = RunConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
