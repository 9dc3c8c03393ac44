//! Inline data issues
//!
//! Issues mark missing or inconsistent input on a single item. They are
//! collected next to the computed values and never abort a calculation.

use prikazy_types::IntAdr;
use serde::{Deserialize, Serialize};

/// Position of a segment inside the report (zero-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentRef {
    pub group: usize,
    pub segment: usize,
}

impl std::fmt::Display for SegmentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skupina {}, cesta {}", self.group + 1, self.segment + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    MissingExecutionDate,
    NoTravel,
    SegmentMissingDate { segment: SegmentRef },
    SegmentMissingTime { segment: SegmentRef },
    SegmentMissingPlace { segment: SegmentRef },
    SegmentInvalidTimeRange { segment: SegmentRef },
    MissingKilometers { segment: SegmentRef },
    MissingDriver { segment: SegmentRef },
    MissingTicketCosts { segment: SegmentRef },
    WorkHoursUnknown { member: IntAdr },
    MissingMealTariff { member: IntAdr, hours: f64 },
    MissingWorkTariff { member: IntAdr, hours: f64 },
    AccommodationMissingPayer { index: usize },
    AccommodationMissingDate { index: usize },
    ExpenseMissingPayer { index: usize },
    ExpenseMissingDescription { index: usize },
    TimItemNotAssessed { tim: String, item: String },
    RedirectToSelf { member: IntAdr },
    RedirectUnknownMember { member: IntAdr },
    RedirectUnknownTarget { member: IntAdr, target: IntAdr },
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Issue::MissingExecutionDate => write!(f, "missing execution date"),
            Issue::NoTravel => write!(f, "no travel recorded"),
            Issue::SegmentMissingDate { segment } => write!(f, "missing date ({})", segment),
            Issue::SegmentMissingTime { segment } => write!(f, "missing time ({})", segment),
            Issue::SegmentMissingPlace { segment } => write!(f, "missing place ({})", segment),
            Issue::SegmentInvalidTimeRange { segment } => {
                write!(f, "arrival before departure ({})", segment)
            }
            Issue::MissingKilometers { segment } => {
                write!(f, "missing kilometers ({})", segment)
            }
            Issue::MissingDriver { segment } => write!(f, "missing driver ({})", segment),
            Issue::MissingTicketCosts { segment } => {
                write!(f, "missing ticket costs ({})", segment)
            }
            Issue::WorkHoursUnknown { member } => {
                write!(f, "cannot compute work hours for {}", member)
            }
            Issue::MissingMealTariff { member, hours } => write!(
                f,
                "missing data for calculation: no meal tariff for {:.2} h ({})",
                hours, member
            ),
            Issue::MissingWorkTariff { member, hours } => write!(
                f,
                "missing data for calculation: no work tariff for {:.2} h ({})",
                hours, member
            ),
            Issue::AccommodationMissingPayer { index } => {
                write!(f, "missing payer (nocleh {})", index + 1)
            }
            Issue::AccommodationMissingDate { index } => {
                write!(f, "missing date (nocleh {})", index + 1)
            }
            Issue::ExpenseMissingPayer { index } => write!(f, "missing payer (výdaj {})", index + 1),
            Issue::ExpenseMissingDescription { index } => {
                write!(f, "missing description (výdaj {})", index + 1)
            }
            Issue::TimItemNotAssessed { tim, item } => {
                write!(f, "missing condition (TIM {}, předmět {})", tim, item)
            }
            Issue::RedirectToSelf { member } => {
                write!(f, "payment redirect of {} targets the member themself", member)
            }
            Issue::RedirectUnknownMember { member } => {
                write!(f, "payment redirect from {} who is not in the team", member)
            }
            Issue::RedirectUnknownTarget { member, target } => write!(
                f,
                "payment redirect of {} targets {} who is not in the team",
                member, target
            ),
        }
    }
}
