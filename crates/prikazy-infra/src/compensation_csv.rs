//! CSV export of team compensation

use std::io::Write;
use std::path::Path;

use prikazy_domain::service::TeamCompensation;
use prikazy_types::{Error, IntAdr, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CompensationRow<'a> {
    #[serde(rename = "ID_Prikazu")]
    order_id: &'a str,
    #[serde(rename = "INT_ADR")]
    int_adr: IntAdr,
    name: &'a str,
    hours: Option<f64>,
    transport: f64,
    meal_allowance: f64,
    work_allowance: f64,
    accommodation: f64,
    expenses: f64,
    total: f64,
    paid_to: IntAdr,
    issues: usize,
}

/// Write one row per member to `writer`
pub fn write_compensation_csv<W: Write>(team: &TeamCompensation, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for m in &team.members {
        let row = CompensationRow {
            order_id: &team.order_id,
            int_adr: m.int_adr,
            name: &m.name,
            hours: m.work_hours.is_known().then_some(m.work_hours.hours),
            transport: m.transport,
            meal_allowance: m.meal_allowance,
            work_allowance: m.work_allowance,
            accommodation: m.accommodation,
            expenses: m.expenses,
            total: m.total,
            paid_to: m.paid_to,
            issues: m.issues.len(),
        };
        csv_writer
            .serialize(row)
            .map_err(|e| Error::Csv(e.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export team compensation to a CSV file
pub fn export_compensation_csv(team: &TeamCompensation, output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_compensation_csv(team, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prikazy_domain::service::{MemberCompensation, WorkHours};

    fn team() -> TeamCompensation {
        TeamCompensation {
            order_id: "2024/118".to_string(),
            members: vec![MemberCompensation {
                int_adr: 4132,
                name: "Jana Nováková".to_string(),
                is_leader: true,
                work_hours: WorkHours::default(),
                transport: 540.0,
                meal_allowance: 0.0,
                work_allowance: 0.0,
                accommodation: 0.0,
                expenses: 120.5,
                total: 660.5,
                higher_rate_applied: false,
                paid_to: 4132,
                issues: vec![],
            }],
            redirect_issues: vec![],
        }
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        write_compensation_csv(&team(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID_Prikazu,INT_ADR,name,hours,transport,meal_allowance,work_allowance,accommodation,expenses,total,paid_to,issues"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024/118,4132,Jana Nováková,,540.0,0.0,0.0,0.0,120.5,660.5,4132,0"
        );
    }
}
