//! Domain services

pub mod compensation;
pub mod completion;
pub mod issue;
pub mod lifecycle;
pub mod tariff_lookup;
pub mod transport_cost;
pub mod work_hours;

pub use compensation::{
    compute_for_member, compute_member, compute_team, generate_compensation_report, Calculation,
    MemberCompensation, Payout, TeamCompensation, UnavailableReason,
};
pub use completion::{completion, tim_summaries, Completion, TimSummary};
pub use issue::{Issue, SegmentRef};
pub use lifecycle::{can_transition, transition};
pub use tariff_lookup::{lookup, validate_buckets, validate_table, Ladder, TariffFinding};
pub use transport_cost::{compute_transport_cost, is_higher_rate_eligible, TransportCost};
pub use work_hours::{compute_work_hours, DaySpan, WorkHours};
