//! Domain model types

pub mod member;
pub mod report;
pub mod tariff;
pub mod tim;
pub mod travel;

pub use member::TeamMember;
pub use report::{Accommodation, Expense, OrderReport, ReportForm, ReportState};
pub use tariff::{DurationBucket, MealTariff, TariffTable, WorkTariff};
pub use tim::{TimItem, TimItemCondition, TimReport};
pub use travel::{TransportMode, TravelGroup, TravelSegment};
