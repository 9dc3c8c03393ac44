//! Compensation Service - report use cases
//!
//! Ties the report repository and the tariff table to the domain services:
//! - team and per-member compensation
//! - work hours overview
//! - completion status and state transitions

use std::path::{Path, PathBuf};

use prikazy_domain::model::{OrderReport, ReportState, TariffTable, TeamMember};
use prikazy_domain::repository::ReportRepository;
use prikazy_domain::service::{
    self, Calculation, Completion, MemberCompensation, TeamCompensation, TimSummary, WorkHours,
};
use prikazy_infra::tariff_loader::TariffLoader;
use prikazy_types::{Error, IntAdr, Result, StoreError};

/// Where a report is read from
#[derive(Debug, Clone)]
pub enum ReportSource {
    /// A report JSON file
    File(PathBuf),
    /// A report stored under its order ID
    Stored(String),
}

/// Completion status of a stored report
#[derive(Debug, Clone)]
pub struct ReportStatus {
    pub report: OrderReport,
    pub completion: Completion,
    pub tims: Vec<TimSummary>,
}

/// Load the tariff table; `None` when no tariff file is configured
pub fn load_tariffs(path: Option<&Path>, strict: bool) -> Result<Option<TariffTable>> {
    let Some(path) = path else {
        tracing::warn!("no tariff table configured, compensation will be unavailable");
        return Ok(None);
    };
    let loader = TariffLoader::load_from_file(path)?;
    let table = if strict {
        loader.into_strict()?
    } else {
        loader.into_table()
    };
    Ok(Some(table))
}

pub struct CompensationService<R: ReportRepository> {
    repo: R,
    tariffs: Option<TariffTable>,
}

impl<R: ReportRepository> CompensationService<R> {
    pub fn new(repo: R, tariffs: Option<TariffTable>) -> Self {
        Self { repo, tariffs }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn tariffs(&self) -> Option<&TariffTable> {
        self.tariffs.as_ref()
    }

    pub fn load_report(&self, source: &ReportSource) -> Result<OrderReport> {
        match source {
            ReportSource::File(path) => {
                if !path.exists() {
                    return Err(Error::FileNotFound(format!(
                        "Report file not found: {}",
                        path.display()
                    )));
                }
                let content = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&content)?)
            }
            ReportSource::Stored(order_id) => self.find_stored(order_id),
        }
    }

    fn find_stored(&self, order_id: &str) -> Result<OrderReport> {
        self.repo
            .find_by_id(order_id)?
            .ok_or_else(|| StoreError::NotFound(order_id.to_string()).into())
    }

    /// Compensation of the whole team
    pub fn team_compensation(&self, report: &OrderReport) -> Calculation<TeamCompensation> {
        let calculation = service::compute_team(report, self.tariffs.as_ref());
        match &calculation {
            Calculation::Ready { result } => {
                for issue in &result.redirect_issues {
                    tracing::warn!(order = %report.order_id, "ignored redirect: {}", issue);
                }
                tracing::info!(
                    order = %report.order_id,
                    members = result.members.len(),
                    total = result.total(),
                    "computed compensation"
                );
            }
            Calculation::Unavailable { reason } => {
                tracing::warn!(order = %report.order_id, "compensation unavailable: {}", reason);
            }
        }
        calculation
    }

    /// Compensation of one selected member
    pub fn member_compensation(
        &self,
        report: &OrderReport,
        member: Option<IntAdr>,
    ) -> Calculation<MemberCompensation> {
        service::compute_for_member(report, self.tariffs.as_ref(), member)
    }

    /// Work hours of every team member
    pub fn work_hours(&self, report: &OrderReport) -> Vec<(TeamMember, WorkHours)> {
        report
            .team
            .iter()
            .map(|m| (m.clone(), service::compute_work_hours(&report.form, m.int_adr)))
            .collect()
    }

    pub fn status(&self, order_id: &str) -> Result<ReportStatus> {
        let report = self.find_stored(order_id)?;
        let completion = service::completion(&report);
        let tims = service::tim_summaries(&report.form);
        Ok(ReportStatus {
            report,
            completion,
            tims,
        })
    }

    /// Move a stored report to another state and save it
    pub fn transition(&self, order_id: &str, to: ReportState) -> Result<OrderReport> {
        let mut report = self.find_stored(order_id)?;
        let from = report.state;
        service::transition(&mut report, to)?;
        self.repo.save(&report)?;
        tracing::info!(order = %order_id, %from, %to, "report state changed");
        Ok(report)
    }
}
