//! Report state transitions

use prikazy_types::{Error, Result};

use super::completion::completion;
use crate::model::{OrderReport, ReportState};

pub fn can_transition(from: ReportState, to: ReportState) -> bool {
    use ReportState::*;
    matches!(
        (from, to),
        (Draft, Send)
            | (Send, Draft)
            | (Send, Submitted)
            | (Submitted, Approved)
            | (Submitted, Rejected)
            | (Rejected, Draft)
    )
}

/// Move the report to `to`; sending requires a complete report
pub fn transition(report: &mut OrderReport, to: ReportState) -> Result<()> {
    if !can_transition(report.state, to) {
        return Err(Error::InvalidTransition {
            from: report.state.to_string(),
            to: to.to_string(),
        });
    }

    if to == ReportState::Send {
        let status = completion(report);
        if !status.is_complete() {
            let missing: Vec<String> = status.issues.iter().map(|i| i.to_string()).collect();
            return Err(Error::IncompleteReport(missing.join("; ")));
        }
    }

    report.state = to;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(can_transition(ReportState::Draft, ReportState::Send));
        assert!(can_transition(ReportState::Submitted, ReportState::Rejected));
        assert!(can_transition(ReportState::Rejected, ReportState::Draft));
        assert!(!can_transition(ReportState::Draft, ReportState::Approved));
        assert!(!can_transition(ReportState::Approved, ReportState::Draft));
        assert!(!can_transition(ReportState::Send, ReportState::Send));
    }

    #[test]
    fn test_send_requires_complete_report() {
        let mut report = OrderReport::new("1", vec![]);
        let err = transition(&mut report, ReportState::Send).unwrap_err();
        assert!(matches!(err, Error::IncompleteReport(_)));
        assert_eq!(report.state, ReportState::Draft);
    }

    #[test]
    fn test_invalid_transition_keeps_state() {
        let mut report = OrderReport::new("1", vec![]);
        report.state = ReportState::Approved;
        assert!(matches!(
            transition(&mut report, ReportState::Draft),
            Err(Error::InvalidTransition { .. })
        ));
        assert_eq!(report.state, ReportState::Approved);
    }

    #[test]
    fn test_review_flow() {
        let mut report = OrderReport::new("1", vec![]);
        report.state = ReportState::Send;
        transition(&mut report, ReportState::Submitted).unwrap();
        transition(&mut report, ReportState::Rejected).unwrap();
        transition(&mut report, ReportState::Draft).unwrap();
        assert_eq!(report.state, ReportState::Draft);
    }
}
