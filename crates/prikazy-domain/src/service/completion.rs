//! Report completion flags and TIM grouping
//!
//! Each section of the report form is complete when none of its items is
//! missing data. A report can only be sent once every section is complete.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::issue::{Issue, SegmentRef};
use crate::model::{OrderReport, ReportForm, TimItemCondition, TransportMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub execution_date: bool,
    pub travel: bool,
    pub accommodation: bool,
    pub expenses: bool,
    pub tims: bool,
    pub issues: Vec<Issue>,
}

impl Completion {
    pub fn is_complete(&self) -> bool {
        self.execution_date && self.travel && self.accommodation && self.expenses && self.tims
    }
}

pub fn completion(report: &OrderReport) -> Completion {
    let form = &report.form;
    let mut issues = Vec::new();

    let execution_date = form.execution_date.is_some();
    if !execution_date {
        issues.push(Issue::MissingExecutionDate);
    }

    let travel_issues = travel_issues(form);
    let travel = travel_issues.is_empty();
    issues.extend(travel_issues);

    let mut accommodation = true;
    for (index, a) in form.accommodations.iter().enumerate() {
        if a.paid_by.is_none() {
            issues.push(Issue::AccommodationMissingPayer { index });
            accommodation = false;
        }
        if a.date.is_none() {
            issues.push(Issue::AccommodationMissingDate { index });
            accommodation = false;
        }
    }

    let mut expenses = true;
    for (index, e) in form.expenses.iter().enumerate() {
        if e.paid_by.is_none() {
            issues.push(Issue::ExpenseMissingPayer { index });
            expenses = false;
        }
        if e.description.as_deref().map_or(true, |d| d.trim().is_empty()) {
            issues.push(Issue::ExpenseMissingDescription { index });
            expenses = false;
        }
    }

    let mut tims = true;
    for tim in &form.tims {
        for item in tim.items.iter().filter(|i| i.condition.is_none()) {
            issues.push(Issue::TimItemNotAssessed {
                tim: tim.tim_id.clone(),
                item: item.item_id.clone(),
            });
            tims = false;
        }
    }

    Completion {
        execution_date,
        travel,
        accommodation,
        expenses,
        tims,
        issues,
    }
}

fn travel_issues(form: &ReportForm) -> Vec<Issue> {
    let mut issues = Vec::new();
    if form.travel_groups.iter().all(|g| g.segments.is_empty()) {
        issues.push(Issue::NoTravel);
        return issues;
    }

    for (g, group) in form.travel_groups.iter().enumerate() {
        for (s, segment) in group.segments.iter().enumerate() {
            let at = SegmentRef {
                group: g,
                segment: s,
            };
            if segment.date.or(form.execution_date).is_none() {
                issues.push(Issue::SegmentMissingDate { segment: at });
            }
            if is_blank(&segment.departure_place) || is_blank(&segment.arrival_place) {
                issues.push(Issue::SegmentMissingPlace { segment: at });
            }
            match (segment.departure(), segment.arrival()) {
                (Some(dep), Some(arr)) if arr < dep => {
                    issues.push(Issue::SegmentInvalidTimeRange { segment: at })
                }
                (Some(_), Some(_)) => {}
                _ => issues.push(Issue::SegmentMissingTime { segment: at }),
            }
            match segment.mode {
                TransportMode::OwnCar | TransportMode::EmployerCar => {
                    if group.driver.is_none() {
                        issues.push(Issue::MissingDriver { segment: at });
                    }
                    if segment.kilometers.map_or(true, |km| km <= 0.0) {
                        issues.push(Issue::MissingKilometers { segment: at });
                    }
                }
                TransportMode::Public => {
                    if segment.costs.is_empty() {
                        issues.push(Issue::MissingTicketCosts { segment: at });
                    }
                }
                TransportMode::Walk | TransportMode::Bike => {}
            }
        }
    }
    issues
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Assessment progress of one TIM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimSummary {
    pub tim_id: String,
    pub name: Option<String>,
    pub total_items: usize,
    pub assessed: usize,
    pub needing_replacement: usize,
    pub by_condition: BTreeMap<u8, usize>,
    pub by_kind: BTreeMap<String, usize>,
}

pub fn tim_summaries(form: &ReportForm) -> Vec<TimSummary> {
    form.tims
        .iter()
        .map(|tim| {
            let mut by_condition = BTreeMap::new();
            let mut by_kind = BTreeMap::new();
            for item in &tim.items {
                if let Some(condition) = item.condition {
                    *by_condition.entry(u8::from(condition)).or_insert(0) += 1;
                }
                let kind = item.kind.clone().unwrap_or_else(|| "?".to_string());
                *by_kind.entry(kind).or_insert(0) += 1;
            }
            TimSummary {
                tim_id: tim.tim_id.clone(),
                name: tim.name.clone(),
                total_items: tim.items.len(),
                assessed: tim.items.iter().filter(|i| i.condition.is_some()).count(),
                needing_replacement: tim
                    .items
                    .iter()
                    .filter_map(|i| i.condition)
                    .filter(TimItemCondition::needs_replacement)
                    .count(),
                by_condition,
                by_kind,
            }
        })
        .collect()
}
