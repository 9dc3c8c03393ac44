//! Transport cost (jízdné) calculation

use prikazy_types::IntAdr;
use serde::{Deserialize, Serialize};

use super::issue::{Issue, SegmentRef};
use super::work_hours::member_segments;
use crate::model::{ReportForm, TariffTable, TransportMode};

/// Cost accrued by one member on one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentCost {
    pub segment: SegmentRef,
    pub mode: TransportMode,
    pub kilometers: Option<f64>,
    /// Per-km rate used, own-car driver only
    pub rate: Option<f64>,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransportCost {
    pub amount: f64,
    pub higher_rate_applied: bool,
    pub segments: Vec<SegmentCost>,
    pub issues: Vec<Issue>,
}

/// Whether the member drives at least one own-car segment in the order
pub fn drives_own_car(form: &ReportForm, member: IntAdr) -> bool {
    form.travel_groups.iter().any(|group| {
        group.is_driver(member)
            && group
                .segments
                .iter()
                .any(|s| s.mode == TransportMode::OwnCar)
    })
}

/// Higher per-km rate eligibility
///
/// Requires the order flag, the member being the designated main driver, and
/// the member driving an own-car segment somewhere in the order.
pub fn is_higher_rate_eligible(form: &ReportForm, member: IntAdr) -> bool {
    form.higher_km_rate && form.main_driver == Some(member) && drives_own_car(form, member)
}

pub fn compute_transport_cost(
    form: &ReportForm,
    member: IntAdr,
    tariffs: &TariffTable,
) -> TransportCost {
    let higher = is_higher_rate_eligible(form, member);
    let rate = if higher {
        tariffs.km_rate_higher
    } else {
        tariffs.km_rate
    };

    let mut result = TransportCost::default();

    for (segment_ref, group, segment) in member_segments(form, member) {
        let cost = match segment.mode {
            TransportMode::OwnCar if group.is_driver(member) => match segment.kilometers {
                Some(km) => {
                    result.higher_rate_applied |= higher;
                    SegmentCost {
                        segment: segment_ref,
                        mode: segment.mode,
                        kilometers: Some(km),
                        rate: Some(rate),
                        amount: km * rate,
                    }
                }
                None => {
                    result.issues.push(Issue::MissingKilometers {
                        segment: segment_ref,
                    });
                    zero_cost(segment_ref, segment.mode)
                }
            },
            TransportMode::Public => {
                let amount = match segment.costs.get(&member) {
                    Some(&amount) => amount,
                    None => {
                        result.issues.push(Issue::MissingTicketCosts {
                            segment: segment_ref,
                        });
                        0.0
                    }
                };
                SegmentCost {
                    amount,
                    ..zero_cost(segment_ref, segment.mode)
                }
            }
            TransportMode::OwnCar
            | TransportMode::EmployerCar
            | TransportMode::Walk
            | TransportMode::Bike => zero_cost(segment_ref, segment.mode),
        };
        result.amount += cost.amount;
        result.segments.push(cost);
    }

    result
}

fn zero_cost(segment: SegmentRef, mode: TransportMode) -> SegmentCost {
    SegmentCost {
        segment,
        mode,
        kilometers: None,
        rate: None,
        amount: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TravelGroup, TravelSegment};
    use std::collections::BTreeMap;

    const A: IntAdr = 1001;
    const B: IntAdr = 1002;
    const C: IntAdr = 1003;

    fn tariffs() -> TariffTable {
        TariffTable {
            km_rate: 6.0,
            km_rate_higher: 8.0,
            meal_tariffs: vec![],
            work_tariffs: vec![],
        }
    }

    fn leg(mode: TransportMode, km: Option<f64>, costs: &[(IntAdr, f64)]) -> TravelSegment {
        TravelSegment {
            date: None,
            departure_place: None,
            departure_time: None,
            arrival_place: None,
            arrival_time: None,
            mode,
            kilometers: km,
            costs: costs.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    fn group(driver: IntAdr, passengers: &[IntAdr], segments: Vec<TravelSegment>) -> TravelGroup {
        TravelGroup {
            driver: Some(driver),
            passengers: passengers.to_vec(),
            license_plate: Some("1B2 3456".to_string()),
            segments,
        }
    }

    #[test]
    fn test_passenger_in_own_car_costs_nothing() {
        let form = ReportForm {
            travel_groups: vec![group(A, &[B, C], vec![leg(TransportMode::OwnCar, Some(120.0), &[])])],
            ..Default::default()
        };
        assert_eq!(compute_transport_cost(&form, A, &tariffs()).amount, 720.0);
        assert_eq!(compute_transport_cost(&form, B, &tariffs()).amount, 0.0);
        assert_eq!(compute_transport_cost(&form, C, &tariffs()).amount, 0.0);
    }

    #[test]
    fn test_public_transport_uses_per_member_costs() {
        let form = ReportForm {
            travel_groups: vec![group(
                A,
                &[B],
                vec![leg(TransportMode::Public, None, &[(A, 50.0), (B, 30.0)])],
            )],
            ..Default::default()
        };
        assert_eq!(compute_transport_cost(&form, A, &tariffs()).amount, 50.0);
        assert_eq!(compute_transport_cost(&form, B, &tariffs()).amount, 30.0);
    }

    #[test]
    fn test_public_transport_without_ticket_flagged() {
        let form = ReportForm {
            travel_groups: vec![TravelGroup {
                driver: None,
                passengers: vec![A, B],
                license_plate: None,
                segments: vec![leg(TransportMode::Public, None, &[(A, 42.0)])],
            }],
            ..Default::default()
        };
        let a = compute_transport_cost(&form, A, &tariffs());
        assert_eq!(a.amount, 42.0);
        assert!(a.issues.is_empty());

        let b = compute_transport_cost(&form, B, &tariffs());
        assert_eq!(b.amount, 0.0);
        assert_eq!(
            b.issues,
            vec![Issue::MissingTicketCosts {
                segment: SegmentRef { group: 0, segment: 0 }
            }]
        );
    }

    #[test]
    fn test_higher_rate_only_for_designated_driver() {
        let form = ReportForm {
            travel_groups: vec![
                group(A, &[], vec![leg(TransportMode::OwnCar, Some(100.0), &[])]),
                group(B, &[], vec![leg(TransportMode::OwnCar, Some(100.0), &[])]),
            ],
            higher_km_rate: true,
            main_driver: Some(A),
            ..Default::default()
        };
        let a = compute_transport_cost(&form, A, &tariffs());
        let b = compute_transport_cost(&form, B, &tariffs());
        assert_eq!(a.amount, 800.0);
        assert!(a.higher_rate_applied);
        assert_eq!(b.amount, 600.0);
        assert!(!b.higher_rate_applied);
    }

    #[test]
    fn test_higher_rate_requires_flag() {
        let form = ReportForm {
            travel_groups: vec![group(A, &[], vec![leg(TransportMode::OwnCar, Some(100.0), &[])])],
            higher_km_rate: false,
            main_driver: Some(A),
            ..Default::default()
        };
        assert_eq!(compute_transport_cost(&form, A, &tariffs()).amount, 600.0);
    }

    #[test]
    fn test_higher_rate_requires_own_car_driving() {
        let form = ReportForm {
            travel_groups: vec![
                group(B, &[A], vec![leg(TransportMode::OwnCar, Some(100.0), &[])]),
                group(A, &[], vec![leg(TransportMode::EmployerCar, Some(50.0), &[])]),
            ],
            higher_km_rate: true,
            main_driver: Some(A),
            ..Default::default()
        };
        assert!(!is_higher_rate_eligible(&form, A));
        assert_eq!(compute_transport_cost(&form, A, &tariffs()).amount, 0.0);
    }

    #[test]
    fn test_walk_bike_employer_car_are_free() {
        let form = ReportForm {
            travel_groups: vec![group(
                A,
                &[],
                vec![
                    leg(TransportMode::Walk, Some(12.0), &[]),
                    leg(TransportMode::Bike, Some(30.0), &[]),
                    leg(TransportMode::EmployerCar, Some(80.0), &[]),
                ],
            )],
            ..Default::default()
        };
        let cost = compute_transport_cost(&form, A, &tariffs());
        assert_eq!(cost.amount, 0.0);
        assert_eq!(cost.segments.len(), 3);
    }

    #[test]
    fn test_missing_kilometers_flagged() {
        let form = ReportForm {
            travel_groups: vec![group(A, &[], vec![leg(TransportMode::OwnCar, None, &[])])],
            ..Default::default()
        };
        let cost = compute_transport_cost(&form, A, &tariffs());
        assert_eq!(cost.amount, 0.0);
        assert_eq!(
            cost.issues,
            vec![Issue::MissingKilometers {
                segment: SegmentRef { group: 0, segment: 0 }
            }]
        );
    }
}
