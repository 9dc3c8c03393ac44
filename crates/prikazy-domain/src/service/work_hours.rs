//! Work-hours aggregation
//!
//! Work time is a span, not a sum: for every day the member travels, the
//! duration runs from the earliest departure to the latest arrival. Legs
//! without a date or without both times contribute nothing and are listed
//! as incomplete.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use prikazy_types::IntAdr;
use serde::{Deserialize, Serialize};

use super::issue::{Issue, SegmentRef};
use crate::model::{ReportForm, TravelGroup, TravelSegment};

/// Start and end of work on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySpan {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DaySpan {
    pub fn hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}

/// Work hours of one member
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkHours {
    pub hours: f64,
    pub days: Vec<DaySpan>,
    pub incomplete: Vec<Issue>,
}

impl WorkHours {
    /// At least one leg had a usable date and times
    pub fn is_known(&self) -> bool {
        !self.days.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.is_known() && self.incomplete.is_empty()
    }
}

/// Segments the member travels on, in report order
pub fn member_segments(
    form: &ReportForm,
    member: IntAdr,
) -> Vec<(SegmentRef, &TravelGroup, &TravelSegment)> {
    form.travel_groups
        .iter()
        .enumerate()
        .flat_map(|(g, group)| {
            group
                .segments
                .iter()
                .enumerate()
                .filter(move |(_, segment)| group.travels_on(member, segment))
                .map(move |(s, segment)| {
                    (
                        SegmentRef {
                            group: g,
                            segment: s,
                        },
                        group,
                        segment,
                    )
                })
        })
        .collect()
}

pub fn compute_work_hours(form: &ReportForm, member: IntAdr) -> WorkHours {
    let mut spans: BTreeMap<NaiveDate, (NaiveTime, NaiveTime)> = BTreeMap::new();
    let mut incomplete = Vec::new();

    for (segment_ref, _, segment) in member_segments(form, member) {
        let Some(date) = segment.date.or(form.execution_date) else {
            incomplete.push(Issue::SegmentMissingDate {
                segment: segment_ref,
            });
            continue;
        };
        let (Some(departure), Some(arrival)) = (segment.departure(), segment.arrival()) else {
            incomplete.push(Issue::SegmentMissingTime {
                segment: segment_ref,
            });
            continue;
        };
        if arrival < departure {
            incomplete.push(Issue::SegmentInvalidTimeRange {
                segment: segment_ref,
            });
            continue;
        }

        spans
            .entry(date)
            .and_modify(|(start, end)| {
                *start = (*start).min(departure);
                *end = (*end).max(arrival);
            })
            .or_insert((departure, arrival));
    }

    let days: Vec<DaySpan> = spans
        .into_iter()
        .map(|(date, (start, end))| DaySpan { date, start, end })
        .collect();
    let hours: f64 = days.iter().map(DaySpan::hours).sum();

    WorkHours {
        hours,
        days,
        incomplete,
    }
}
