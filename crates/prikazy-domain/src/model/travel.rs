//! Travel groups and segments

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use prikazy_types::IntAdr;
use serde::{Deserialize, Serialize};

/// Transport mode of a segment (Druh_Dopravy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    /// Own car (auto vlastní)
    #[serde(rename = "AUV", alias = "own_car")]
    OwnCar,
    /// Employer car (auto služební)
    #[serde(rename = "AUS", alias = "employer_car")]
    EmployerCar,
    /// Public transport (veřejná doprava)
    #[serde(rename = "V", alias = "public")]
    Public,
    /// Walk (pěšky)
    #[serde(rename = "P", alias = "walk")]
    Walk,
    /// Bike (kolo)
    #[serde(rename = "K", alias = "bike")]
    Bike,
}

impl TransportMode {
    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::OwnCar => "auto vlastní",
            TransportMode::EmployerCar => "auto služební",
            TransportMode::Public => "veřejná doprava",
            TransportMode::Walk => "pěšky",
            TransportMode::Bike => "kolo",
        }
    }
}

/// One leg of a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelSegment {
    #[serde(rename = "Datum", default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Misto_Odjezdu", default)]
    pub departure_place: Option<String>,
    #[serde(rename = "Cas_Odjezdu", default)]
    pub departure_time: Option<String>,
    #[serde(rename = "Misto_Prijezdu", default)]
    pub arrival_place: Option<String>,
    #[serde(rename = "Cas_Prijezdu", default)]
    pub arrival_time: Option<String>,
    #[serde(rename = "Druh_Dopravy")]
    pub mode: TransportMode,
    #[serde(rename = "Kilometry", default)]
    pub kilometers: Option<f64>,
    /// Ticket cost per member, entered independently for each passenger
    #[serde(rename = "Naklady", default)]
    pub costs: BTreeMap<IntAdr, f64>,
}

impl TravelSegment {
    pub fn departure(&self) -> Option<NaiveTime> {
        self.departure_time.as_deref().and_then(parse_time)
    }

    pub fn arrival(&self) -> Option<NaiveTime> {
        self.arrival_time.as_deref().and_then(parse_time)
    }
}

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    ["%H:%M", "%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// Members travelling together with one driver and one vehicle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TravelGroup {
    #[serde(rename = "Ridic", default)]
    pub driver: Option<IntAdr>,
    #[serde(rename = "Cestujici", default)]
    pub passengers: Vec<IntAdr>,
    #[serde(rename = "SPZ", default)]
    pub license_plate: Option<String>,
    #[serde(rename = "Cesty", default)]
    pub segments: Vec<TravelSegment>,
}

impl TravelGroup {
    pub fn is_driver(&self, member: IntAdr) -> bool {
        self.driver == Some(member)
    }

    /// Driver and passengers
    pub fn has_participant(&self, member: IntAdr) -> bool {
        self.is_driver(member) || self.passengers.contains(&member)
    }

    /// Whether the member travels on a given segment of this group
    pub fn travels_on(&self, member: IntAdr, segment: &TravelSegment) -> bool {
        self.has_participant(member) || segment.costs.contains_key(&member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("08:00"), NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(parse_time("17:30:15"), NaiveTime::from_hms_opt(17, 30, 15));
        assert_eq!(parse_time(" 7:05 "), NaiveTime::from_hms_opt(7, 5, 0));
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("noon"), None);
    }

    #[test]
    fn test_segment_from_portal_json() {
        let json = r#"{
            "Datum": "2024-05-11",
            "Misto_Odjezdu": "Brno",
            "Cas_Odjezdu": "07:15",
            "Misto_Prijezdu": "Tišnov",
            "Cas_Prijezdu": "08:00",
            "Druh_Dopravy": "V",
            "Naklady": {"4132": 52, "5120": 26}
        }"#;
        let segment: TravelSegment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.mode, TransportMode::Public);
        assert_eq!(segment.costs.get(&4132), Some(&52.0));
        assert_eq!(segment.kilometers, None);
        assert_eq!(segment.departure(), NaiveTime::from_hms_opt(7, 15, 0));
    }

    #[test]
    fn test_public_cost_entry_counts_as_travelling() {
        let segment = TravelSegment {
            date: None,
            departure_place: None,
            departure_time: None,
            arrival_place: None,
            arrival_time: None,
            mode: TransportMode::Public,
            kilometers: None,
            costs: BTreeMap::from([(7, 40.0)]),
        };
        let group = TravelGroup {
            driver: Some(1),
            passengers: vec![2],
            license_plate: None,
            segments: vec![segment.clone()],
        };
        assert!(group.travels_on(1, &segment));
        assert!(group.travels_on(2, &segment));
        assert!(group.travels_on(7, &segment));
        assert!(!group.travels_on(9, &segment));
    }
}
