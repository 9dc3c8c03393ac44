//! Work order report (hlášení příkazu) definitions

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use prikazy_types::IntAdr;
use serde::{Deserialize, Serialize};

use super::{TeamMember, TimReport, TravelGroup};

/// Night spent during the work order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    #[serde(rename = "Datum", default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Misto", default)]
    pub place: Option<String>,
    #[serde(rename = "Zarizeni", default)]
    pub facility: Option<String>,
    #[serde(rename = "Zaplatil", default)]
    pub paid_by: Option<IntAdr>,
    #[serde(rename = "Castka", default)]
    pub amount: f64,
}

/// Additional expense (vedlejší výdaj)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "Datum", default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Polozka", default)]
    pub description: Option<String>,
    #[serde(rename = "Zaplatil", default)]
    pub paid_by: Option<IntAdr>,
    #[serde(rename = "Castka", default)]
    pub amount: f64,
}

/// Form data entered for a work order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportForm {
    #[serde(rename = "Datum_Provedeni", default)]
    pub execution_date: Option<NaiveDate>,
    #[serde(rename = "Skupiny_Cest", default)]
    pub travel_groups: Vec<TravelGroup>,
    #[serde(rename = "Noclehy", default)]
    pub accommodations: Vec<Accommodation>,
    #[serde(rename = "Vydaje", default)]
    pub expenses: Vec<Expense>,
    /// member -> member whose payout receives the member's total
    #[serde(rename = "Presmerovani_Vyplaty", default)]
    pub payment_redirects: BTreeMap<IntAdr, IntAdr>,
    /// Member designated for the higher per-km rate
    #[serde(rename = "Hlavni_Ridic", default)]
    pub main_driver: Option<IntAdr>,
    #[serde(rename = "higherKmRate", default)]
    pub higher_km_rate: bool,
    #[serde(rename = "Timy", default)]
    pub tims: Vec<TimReport>,
}

/// Report lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportState {
    #[default]
    Draft,
    Send,
    Submitted,
    Approved,
    Rejected,
}

impl ReportState {
    pub fn label(&self) -> &'static str {
        match self {
            ReportState::Draft => "draft",
            ReportState::Send => "send",
            ReportState::Submitted => "submitted",
            ReportState::Approved => "approved",
            ReportState::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ReportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ReportState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(ReportState::Draft),
            "send" => Ok(ReportState::Send),
            "submitted" => Ok(ReportState::Submitted),
            "approved" => Ok(ReportState::Approved),
            "rejected" => Ok(ReportState::Rejected),
            other => Err(format!("unknown report state: {}", other)),
        }
    }
}

/// Stored report for one work order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReport {
    #[serde(rename = "ID_Prikazu")]
    pub order_id: String,
    #[serde(rename = "Nazev", default)]
    pub title: Option<String>,
    #[serde(rename = "Stav", default)]
    pub state: ReportState,
    #[serde(rename = "Clenove", default)]
    pub team: Vec<TeamMember>,
    #[serde(rename = "Data", default)]
    pub form: ReportForm,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderReport {
    /// Create an empty draft report
    pub fn new(order_id: impl Into<String>, team: Vec<TeamMember>) -> Self {
        Self {
            order_id: order_id.into(),
            title: None,
            state: ReportState::Draft,
            team,
            form: ReportForm::default(),
            updated_at: None,
        }
    }

    pub fn member(&self, int_adr: IntAdr) -> Option<&TeamMember> {
        self.team.iter().find(|m| m.int_adr == int_adr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip_from_str() {
        assert_eq!("Submitted".parse::<ReportState>(), Ok(ReportState::Submitted));
        assert!("archived".parse::<ReportState>().is_err());
    }

    #[test]
    fn test_minimal_report_defaults() {
        let report: OrderReport = serde_json::from_str(r#"{"ID_Prikazu": "123/24"}"#).unwrap();
        assert_eq!(report.state, ReportState::Draft);
        assert!(report.team.is_empty());
        assert!(!report.form.higher_km_rate);
        assert!(report.form.payment_redirects.is_empty());
    }
}
