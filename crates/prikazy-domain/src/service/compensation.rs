//! Compensation calculation for one member and for the whole team
//!
//! Payment redirects only annotate where a member's total is paid out;
//! they never move amounts between computed totals.

use std::collections::BTreeMap;

use prikazy_types::IntAdr;
use serde::{Deserialize, Serialize};

use super::issue::Issue;
use super::tariff_lookup::allowance;
use super::transport_cost::compute_transport_cost;
use super::work_hours::{compute_work_hours, WorkHours};
use crate::model::{OrderReport, ReportForm, TariffTable, TeamMember};

/// Compensation of one team member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberCompensation {
    pub int_adr: IntAdr,
    pub name: String,
    pub is_leader: bool,
    pub work_hours: WorkHours,
    pub transport: f64,
    pub meal_allowance: f64,
    pub work_allowance: f64,
    pub accommodation: f64,
    pub expenses: f64,
    pub total: f64,
    pub higher_rate_applied: bool,
    /// Member whose payout receives this total
    pub paid_to: IntAdr,
    pub issues: Vec<Issue>,
}

impl MemberCompensation {
    pub fn is_redirected(&self) -> bool {
        self.paid_to != self.int_adr
    }
}

/// Why a calculation cannot be shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnavailableReason {
    MissingTariffs,
    NoMemberSelected,
    UnknownMember { int_adr: IntAdr },
    EmptyTeam,
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnavailableReason::MissingTariffs => write!(f, "tariff table not available"),
            UnavailableReason::NoMemberSelected => write!(f, "no member selected"),
            UnavailableReason::UnknownMember { int_adr } => {
                write!(f, "member {} is not in the team", int_adr)
            }
            UnavailableReason::EmptyTeam => write!(f, "the order has no team members"),
        }
    }
}

/// Calculation result or the reason it is unavailable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Calculation<T> {
    Ready { result: T },
    Unavailable { reason: UnavailableReason },
}

impl<T> Calculation<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Calculation::Ready { result } => Some(result),
            Calculation::Unavailable { .. } => None,
        }
    }

    fn unavailable(reason: UnavailableReason) -> Self {
        Calculation::Unavailable { reason }
    }
}

/// Totals grouped by payout recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub recipient: IntAdr,
    pub name: String,
    pub amount: f64,
    pub members: Vec<IntAdr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamCompensation {
    pub order_id: String,
    pub members: Vec<MemberCompensation>,
    pub redirect_issues: Vec<Issue>,
}

impl TeamCompensation {
    pub fn member(&self, int_adr: IntAdr) -> Option<&MemberCompensation> {
        self.members.iter().find(|m| m.int_adr == int_adr)
    }

    pub fn total(&self) -> f64 {
        self.members.iter().map(|m| m.total).sum()
    }

    /// Group member totals by the member they are paid to
    pub fn payouts(&self) -> Vec<Payout> {
        let mut by_recipient: BTreeMap<IntAdr, Payout> = BTreeMap::new();
        for member in &self.members {
            let name = self
                .member(member.paid_to)
                .map(|m| m.name.clone())
                .unwrap_or_default();
            let payout = by_recipient.entry(member.paid_to).or_insert_with(|| Payout {
                recipient: member.paid_to,
                name,
                amount: 0.0,
                members: Vec::new(),
            });
            payout.amount += member.total;
            payout.members.push(member.int_adr);
        }
        by_recipient.into_values().collect()
    }
}

/// Compute the compensation of one member
pub fn compute_member(
    form: &ReportForm,
    member: &TeamMember,
    tariffs: &TariffTable,
) -> MemberCompensation {
    let id = member.int_adr;
    let mut issues = Vec::new();

    let work_hours = compute_work_hours(form, id);
    issues.extend(work_hours.incomplete.iter().cloned());

    let transport = compute_transport_cost(form, id, tariffs);
    issues.extend(transport.issues.iter().cloned());

    let (meal_allowance, work_allowance) = if work_hours.is_known() {
        let hours = work_hours.hours;
        let meal = allowance(&tariffs.meal_tariffs, hours).unwrap_or_else(|| {
            issues.push(Issue::MissingMealTariff { member: id, hours });
            0.0
        });
        let work = allowance(&tariffs.work_tariffs, hours).unwrap_or_else(|| {
            issues.push(Issue::MissingWorkTariff { member: id, hours });
            0.0
        });
        (meal, work)
    } else {
        issues.push(Issue::WorkHoursUnknown { member: id });
        (0.0, 0.0)
    };

    let accommodation: f64 = form
        .accommodations
        .iter()
        .filter(|a| a.paid_by == Some(id))
        .map(|a| a.amount)
        .sum();
    let expenses: f64 = form
        .expenses
        .iter()
        .filter(|e| e.paid_by == Some(id))
        .map(|e| e.amount)
        .sum();

    let total = transport.amount + meal_allowance + work_allowance + accommodation + expenses;

    MemberCompensation {
        int_adr: id,
        name: member.name.clone(),
        is_leader: member.is_leader,
        work_hours,
        transport: transport.amount,
        meal_allowance,
        work_allowance,
        accommodation,
        expenses,
        total,
        higher_rate_applied: transport.higher_rate_applied,
        paid_to: id,
        issues,
    }
}

/// Compute compensation for every team member and annotate payment redirects
pub fn compute_team(
    report: &OrderReport,
    tariffs: Option<&TariffTable>,
) -> Calculation<TeamCompensation> {
    let Some(tariffs) = tariffs else {
        return Calculation::unavailable(UnavailableReason::MissingTariffs);
    };
    if report.team.is_empty() {
        return Calculation::unavailable(UnavailableReason::EmptyTeam);
    }

    let mut members: Vec<MemberCompensation> = report
        .team
        .iter()
        .map(|member| compute_member(&report.form, member, tariffs))
        .collect();

    let mut redirect_issues = Vec::new();
    for (&from, &to) in &report.form.payment_redirects {
        if from == to {
            redirect_issues.push(Issue::RedirectToSelf { member: from });
            continue;
        }
        if report.member(to).is_none() {
            redirect_issues.push(Issue::RedirectUnknownTarget {
                member: from,
                target: to,
            });
            continue;
        }
        match members.iter_mut().find(|m| m.int_adr == from) {
            Some(member) => member.paid_to = to,
            None => redirect_issues.push(Issue::RedirectUnknownMember { member: from }),
        }
    }

    Calculation::Ready {
        result: TeamCompensation {
            order_id: report.order_id.clone(),
            members,
            redirect_issues,
        },
    }
}

/// Compute compensation of the selected member, with redirects applied
pub fn compute_for_member(
    report: &OrderReport,
    tariffs: Option<&TariffTable>,
    member: Option<IntAdr>,
) -> Calculation<MemberCompensation> {
    let Some(int_adr) = member else {
        return Calculation::unavailable(UnavailableReason::NoMemberSelected);
    };
    if report.member(int_adr).is_none() {
        return Calculation::unavailable(UnavailableReason::UnknownMember { int_adr });
    }
    match compute_team(report, tariffs) {
        Calculation::Ready { result } => match result.member(int_adr) {
            Some(member) => Calculation::Ready {
                result: member.clone(),
            },
            None => Calculation::unavailable(UnavailableReason::UnknownMember { int_adr }),
        },
        Calculation::Unavailable { reason } => Calculation::unavailable(reason),
    }
}

/// Render the team compensation as a plain-text report
pub fn generate_compensation_report(team: &TeamCompensation) -> String {
    let mut report = String::new();
    report.push_str("==========================================================================\n");
    report.push_str(&format!("  Vyúčtování příkazu {}\n", team.order_id));
    report.push_str("==========================================================================\n\n");

    report.push_str(&format!(
        "{:<8} {:<20} {:>6} {:>9} {:>8} {:>8} {:>8} {:>8} {:>10}\n",
        "INT_ADR", "Jméno", "Hodiny", "Jízdné", "Stravné", "Náhrada", "Nocleh", "Výdaje", "Celkem"
    ));
    report.push_str("-".repeat(92).as_str());
    report.push('\n');

    for m in &team.members {
        let hours = if m.work_hours.is_known() {
            format!("{:.2}", m.work_hours.hours)
        } else {
            "?".to_string()
        };
        report.push_str(&format!(
            "{:<8} {:<20} {:>6} {:>9.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>10.2}\n",
            m.int_adr,
            truncate_str(&m.name, 19),
            hours,
            m.transport,
            m.meal_allowance,
            m.work_allowance,
            m.accommodation,
            m.expenses,
            m.total
        ));
    }
    report.push_str("-".repeat(92).as_str());
    report.push('\n');
    report.push_str(&format!("{:<81} {:>10.2}\n\n", "Celkem / Total", team.total()));

    let redirected: Vec<_> = team.members.iter().filter(|m| m.is_redirected()).collect();
    if !redirected.is_empty() {
        report.push_str("[Přesměrování výplaty / Payment redirects]\n");
        for m in redirected {
            report.push_str(&format!("  {} -> {}\n", m.int_adr, m.paid_to));
        }
        report.push('\n');
    }

    let issues: Vec<String> = team
        .members
        .iter()
        .flat_map(|m| m.issues.iter())
        .chain(team.redirect_issues.iter())
        .map(|i| i.to_string())
        .collect();
    if !issues.is_empty() {
        report.push_str("[Chybějící údaje / Missing data]\n");
        for issue in issues {
            report.push_str(&format!("  ! {}\n", issue));
        }
        report.push('\n');
    }

    report.push_str("==========================================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
