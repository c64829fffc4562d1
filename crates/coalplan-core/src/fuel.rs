//! Fuel reference data
//!
//! The plant burns five fuels: coal drawn from the on-site stockpile, three
//! imported coals, and biomass. Calorific value and sulphur intensity are
//! static reference data; unit costs are per-run inputs (see
//! [`RunConfig`](crate::RunConfig)).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the five fuels the plant can burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fuel {
    /// Coal already held in the on-site stockpile (limited inventory)
    Stockpile,
    /// Imported Columbian coal
    Columbian,
    /// Imported Russian coal (lowest-sulphur coal)
    Russian,
    /// Imported Scottish coal (highest-sulphur coal)
    Scottish,
    /// Biomass (earns the ROC incentive, capped by the blending limit)
    Biomass,
}

impl Fuel {
    /// All fuels in canonical order. Decision variables are laid out in this
    /// order everywhere downstream.
    pub const ALL: [Fuel; 5] = [
        Fuel::Stockpile,
        Fuel::Columbian,
        Fuel::Russian,
        Fuel::Scottish,
        Fuel::Biomass,
    ];

    /// Calorific value in GJ per tonne.
    pub fn calorific_value_gj_per_t(&self) -> f64 {
        match self {
            Fuel::Stockpile => 25.81,
            Fuel::Columbian => 25.12,
            Fuel::Russian => 24.50,
            Fuel::Scottish => 26.20,
            Fuel::Biomass => 18.00,
        }
    }

    /// Sulphur intensity in tonnes of SO2 emitted per tonne of fuel burned
    /// (before any FGD removal).
    pub fn sulphur_t_per_t(&self) -> f64 {
        match self {
            Fuel::Stockpile => 0.0138,
            Fuel::Columbian => 0.0070,
            Fuel::Russian => 0.0035,
            Fuel::Scottish => 0.0172,
            Fuel::Biomass => 0.0001,
        }
    }

    /// The three imported coals are banned during the summer months.
    pub fn is_imported_coal(&self) -> bool {
        matches!(self, Fuel::Columbian | Fuel::Russian | Fuel::Scottish)
    }

    fn index(&self) -> usize {
        match self {
            Fuel::Stockpile => 0,
            Fuel::Columbian => 1,
            Fuel::Russian => 2,
            Fuel::Scottish => 3,
            Fuel::Biomass => 4,
        }
    }
}

impl fmt::Display for Fuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fuel::Stockpile => "Stockpile",
            Fuel::Columbian => "Columbian",
            Fuel::Russian => "Russian",
            Fuel::Scottish => "Scottish",
            Fuel::Biomass => "Biomass",
        };
        write!(f, "{}", name)
    }
}

/// Total map keyed by [`Fuel`]. Every fuel always has a value, so lookups
/// cannot fail and partial fuel tables cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelMap<T>([T; 5]);

impl<T> FuelMap<T> {
    /// Build a map by evaluating `f` for every fuel in canonical order.
    pub fn from_fn(mut f: impl FnMut(Fuel) -> T) -> Self {
        FuelMap(Fuel::ALL.map(&mut f))
    }

    /// Iterate over `(fuel, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Fuel, &T)> {
        Fuel::ALL.iter().copied().zip(self.0.iter())
    }
}

impl<T: Clone> FuelMap<T> {
    /// A map holding the same value for every fuel.
    pub fn splat(value: T) -> Self {
        FuelMap::from_fn(|_| value.clone())
    }
}

impl<T> Index<Fuel> for FuelMap<T> {
    type Output = T;

    fn index(&self, fuel: Fuel) -> &T {
        &self.0[fuel.index()]
    }
}

impl<T> IndexMut<Fuel> for FuelMap<T> {
    fn index_mut(&mut self, fuel: Fuel) -> &mut T {
        &mut self.0[fuel.index()]
    }
}
