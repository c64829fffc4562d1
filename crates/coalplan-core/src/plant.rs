//! Plant-level constants and energy conversion.

use crate::Fuel;

/// Nameplate capacity of the station in MW.
pub const CAPACITY_MW: f64 = 1000.0;

/// Thermal efficiency of the steam cycle.
pub const THERMAL_EFFICIENCY: f64 = 0.35;

/// Reference conversion factor, GJ per MWh.
pub const GJ_PER_MWH: f64 = 3.6;

/// Transmission charge deducted from the sale price, currency per MWh.
pub const TRANSMISSION_DEDUCTION: f64 = 0.65;

/// CO2 emitted per MWh generated, tonnes.
pub const CO2_EMISSION_FACTOR: f64 = 0.8;

/// Tonnes of coal held in the on-site stockpile at the start of the horizon.
pub const STOCKPILE_INVENTORY_T: f64 = 600_000.0;

/// Electrical energy in MWh obtained from burning `tonnes` of `fuel`.
pub fn energy_mwh(fuel: Fuel, tonnes: f64) -> f64 {
    energy_mwh_per_tonne(fuel) * tonnes
}

/// Efficiency-scaled calorific value: MWh generated per tonne burned.
pub fn energy_mwh_per_tonne(fuel: Fuel) -> f64 {
    (THERMAL_EFFICIENCY / GJ_PER_MWH) * fuel.calorific_value_gj_per_t()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biomass_yields_1_75_mwh_per_tonne() {
        let e = energy_mwh_per_tonne(Fuel::Biomass);
        assert!((e - 1.75).abs() < 1e-12);
    }

    #[test]
    fn energy_scales_linearly_with_tonnage() {
        let one = energy_mwh(Fuel::Stockpile, 1.0);
        let thousand = energy_mwh(Fuel::Stockpile, 1000.0);
        assert!((thousand - 1000.0 * one).abs() < 1e-6);
    }
}
