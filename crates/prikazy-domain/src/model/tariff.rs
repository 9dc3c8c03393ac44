//! Tariff (price list) definitions
//!
//! The table carries two parallel ladders: the per-km distance rates and the
//! duration-bucketed meal/work allowances.

use serde::{Deserialize, Serialize};

/// A duration bucket `[from, to)` carrying a fixed amount
pub trait DurationBucket {
    /// Lower bound in hours (inclusive)
    fn from_hours(&self) -> f64;
    /// Upper bound in hours (exclusive); `None` means unbounded
    fn to_hours(&self) -> Option<f64>;
    /// Amount paid when the bucket applies
    fn amount(&self) -> f64;

    fn contains(&self, hours: f64) -> bool {
        hours >= self.from_hours() && self.to_hours().map_or(true, |to| hours < to)
    }
}

/// Meal allowance bucket (stravné)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTariff {
    #[serde(rename = "Trvani_Od")]
    pub from: f64,
    #[serde(rename = "Trvani_Do", default)]
    pub to: Option<f64>,
    #[serde(rename = "Stravne")]
    pub amount: f64,
}

/// Work allowance bucket (náhrada za práci)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkTariff {
    #[serde(rename = "Trvani_Od")]
    pub from: f64,
    #[serde(rename = "Trvani_Do", default)]
    pub to: Option<f64>,
    #[serde(rename = "Nahrada")]
    pub amount: f64,
}

impl DurationBucket for MealTariff {
    fn from_hours(&self) -> f64 {
        self.from
    }
    fn to_hours(&self) -> Option<f64> {
        self.to
    }
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl DurationBucket for WorkTariff {
    fn from_hours(&self) -> f64 {
        self.from
    }
    fn to_hours(&self) -> Option<f64> {
        self.to
    }
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Price list used for compensation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TariffTable {
    /// Standard rate per km (jízdné)
    #[serde(rename = "jizdne")]
    pub km_rate: f64,
    /// Higher rate per km for the designated main driver (zvýšená sazba)
    #[serde(rename = "jizdneZvysene")]
    pub km_rate_higher: f64,
    #[serde(rename = "stravneTariffs", default)]
    pub meal_tariffs: Vec<MealTariff>,
    #[serde(rename = "nahradyTariffs", default)]
    pub work_tariffs: Vec<WorkTariff>,
}
