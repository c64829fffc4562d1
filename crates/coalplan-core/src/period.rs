//! Planning periods
//!
//! The five-month horizon (June through October) is split into four load
//! bands per month, giving 20 periods. Each period carries a fixed
//! available-hours figure; electricity sale prices are per-run inputs keyed
//! by period.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Months covered by the planning horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Month {
    June,
    July,
    August,
    September,
    October,
}

impl Month {
    /// Months in horizon order.
    pub const ALL: [Month; 5] = [
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
    ];

    /// June through August, when the imported-coal ban applies.
    pub fn is_summer(&self) -> bool {
        matches!(self, Month::June | Month::July | Month::August)
    }

    fn index(&self) -> usize {
        match self {
            Month::June => 0,
            Month::July => 1,
            Month::August => 2,
            Month::September => 3,
            Month::October => 4,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
        };
        write!(f, "{}", name)
    }
}

/// Load band within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    WdPeak,
    WdOffpeak,
    WePeak,
    WeOffpeak,
}

impl Band {
    /// Bands in canonical order.
    pub const ALL: [Band; 4] = [Band::WdPeak, Band::WdOffpeak, Band::WePeak, Band::WeOffpeak];

    fn index(&self) -> usize {
        match self {
            Band::WdPeak => 0,
            Band::WdOffpeak => 1,
            Band::WePeak => 2,
            Band::WeOffpeak => 3,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Band::WdPeak => "WD_peak",
            Band::WdOffpeak => "WD_offpeak",
            Band::WePeak => "WE_peak",
            Band::WeOffpeak => "WE_offpeak",
        };
        write!(f, "{}", name)
    }
}

/// A (month, band) pair identifying one of the 20 planning periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub month: Month,
    pub band: Band,
}

impl Period {
    pub fn new(month: Month, band: Band) -> Self {
        Period { month, band }
    }

    /// All 20 periods in canonical (month, band) order.
    pub fn all() -> impl Iterator<Item = Period> {
        Month::ALL
            .iter()
            .flat_map(|&month| Band::ALL.iter().map(move |&band| Period { month, band }))
    }

    /// Hours the plant is available to run in this period.
    pub fn available_hours(&self) -> f64 {
        let (weekday, weekend) = match self.month {
            Month::June | Month::September => (264.0, 96.0),
            Month::July | Month::August => (264.0, 108.0),
            Month::October => (252.0, 120.0),
        };
        match self.band {
            Band::WdPeak | Band::WdOffpeak => weekday,
            Band::WePeak | Band::WeOffpeak => weekend,
        }
    }

    fn index(&self) -> usize {
        self.month.index() * Band::ALL.len() + self.band.index()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.month, self.band)
    }
}

/// Errors raised when building a [`PeriodMap`] from loose pairs.
#[derive(Debug, Clone, Error)]
pub enum PeriodMapError {
    #[error("missing value for period {0}")]
    Missing(Period),
    #[error("duplicate value for period {0}")]
    Duplicate(Period),
}

/// Total map keyed by [`Period`].
///
/// Construction validates coverage of all 20 periods, so a partially
/// specified price or hours table fails fast instead of surfacing as a
/// lookup error mid-solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodMap<T>(Vec<T>);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PeriodMap<T> {
    /// Deserializes from a plain sequence in canonical period order, with
    /// the same totality check as the constructors: exactly one value per
    /// period, so a truncated price table is rejected instead of panicking
    /// at lookup time.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<T>::deserialize(deserializer)?;
        let expected = Month::ALL.len() * Band::ALL.len();
        if values.len() != expected {
            return Err(serde::de::Error::invalid_length(
                values.len(),
                &"one value per planning period (20)",
            ));
        }
        Ok(PeriodMap(values))
    }
}

impl<T> PeriodMap<T> {
    /// Build a map by evaluating `f` for every period in canonical order.
    pub fn from_fn(mut f: impl FnMut(Period) -> T) -> Self {
        PeriodMap(Period::all().map(&mut f).collect())
    }

    /// Build a map from `(period, value)` pairs, requiring exactly one value
    /// per period.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Period, T)>) -> Result<Self, PeriodMapError> {
        let mut slots: Vec<Option<T>> = Period::all().map(|_| None).collect();
        for (period, value) in pairs {
            let slot = &mut slots[period.index()];
            if slot.is_some() {
                return Err(PeriodMapError::Duplicate(period));
            }
            *slot = Some(value);
        }
        let mut values = Vec::with_capacity(slots.len());
        for (period, slot) in Period::all().zip(slots) {
            values.push(slot.ok_or(PeriodMapError::Missing(period))?);
        }
        Ok(PeriodMap(values))
    }

    pub fn get(&self, period: Period) -> &T {
        &self.0[period.index()]
    }

    /// Iterate over `(period, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Period, &T)> {
        Period::all().zip(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_periods_in_canonical_order() {
        let periods: Vec<Period> = Period::all().collect();
        assert_eq!(periods.len(), 20);
        assert_eq!(periods[0], Period::new(Month::June, Band::WdPeak));
        assert_eq!(periods[19], Period::new(Month::October, Band::WeOffpeak));
        for (i, p) in periods.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn available_hours_sum_to_horizon_total() {
        let total: f64 = Period::all().map(|p| p.available_hours()).sum();
        assert_eq!(total, 3672.0);
    }

    #[test]
    fn summer_months() {
        assert!(Month::June.is_summer());
        assert!(Month::August.is_summer());
        assert!(!Month::September.is_summer());
        assert!(!Month::October.is_summer());
    }

    #[test]
    fn from_pairs_rejects_missing_period() {
        let mut pairs: Vec<(Period, f64)> = Period::all().map(|p| (p, 1.0)).collect();
        pairs.pop();
        let err = PeriodMap::from_pairs(pairs).unwrap_err();
        assert!(matches!(err, PeriodMapError::Missing(_)));
    }

    #[test]
    fn from_pairs_rejects_duplicate_period() {
        let mut pairs: Vec<(Period, f64)> = Period::all().map(|p| (p, 1.0)).collect();
        pairs.push((Period::new(Month::June, Band::WdPeak), 2.0));
        let err = PeriodMap::from_pairs(pairs).unwrap_err();
        assert!(matches!(err, PeriodMapError::Duplicate(_)));
    }

    #[test]
    fn from_pairs_accepts_complete_cover() {
        let pairs: Vec<(Period, f64)> = Period::all().map(|p| (p, p.available_hours())).collect();
        let map = PeriodMap::from_pairs(pairs).unwrap();
        assert_eq!(*map.get(Period::new(Month::October, Band::WePeak)), 120.0);
    }

    #[test]
    fn deserialize_rejects_a_truncated_table() {
        let err = serde_json::from_str::<PeriodMap<f64>>("[36.0, 27.0]").unwrap_err();
        assert!(err.to_string().contains("invalid length"));
    }

    #[test]
    fn deserialize_rejects_an_overlong_table() {
        let values: Vec<f64> = (0..21).map(f64::from).collect();
        let json = serde_json::to_string(&values).unwrap();
        assert!(serde_json::from_str::<PeriodMap<f64>>(&json).is_err());
    }

    #[test]
    fn deserialize_round_trips_a_complete_table() {
        let map = PeriodMap::from_fn(|p| p.available_hours());
        let json = serde_json::to_string(&map).unwrap();
        let back: PeriodMap<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
