//! Excel export functionality

use prikazy_domain::service::TeamCompensation;
use prikazy_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Export team compensation to an Excel file
pub fn export_to_excel(team: &TeamCompensation, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, team)?;

    let members_sheet = workbook.add_worksheet();
    write_members_sheet(members_sheet, team)?;

    let payouts_sheet = workbook.add_worksheet();
    write_payouts_sheet(payouts_sheet, team)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    tracing::info!(path = %output_path.display(), "exported compensation workbook");
    Ok(())
}

fn xl<T>(result: std::result::Result<T, rust_xlsxwriter::XlsxError>) -> Result<T> {
    result.map_err(|e| Error::Excel(e.to_string()))
}

fn write_summary_sheet(sheet: &mut Worksheet, team: &TeamCompensation) -> Result<()> {
    xl(sheet.set_name("Souhrn"))?;

    let header_format = Format::new().set_bold();

    xl(sheet.write_string_with_format(0, 0, "Vyúčtování příkazu", &header_format))?;
    xl(sheet.write_string(0, 1, &team.order_id))?;

    xl(sheet.write_string(2, 0, "Členů:"))?;
    xl(sheet.write_number(2, 1, team.members.len() as f64))?;

    xl(sheet.write_string(3, 0, "Celkem:"))?;
    xl(sheet.write_number(3, 1, team.total()))?;

    let issue_count: usize = team.members.iter().map(|m| m.issues.len()).sum::<usize>()
        + team.redirect_issues.len();
    xl(sheet.write_string(4, 0, "Chybějící údaje:"))?;
    xl(sheet.write_number(4, 1, issue_count as f64))?;

    let mut row = 6;
    if issue_count > 0 {
        xl(sheet.write_string_with_format(row, 0, "Upozornění", &header_format))?;
        row += 1;
        for m in &team.members {
            for issue in &m.issues {
                xl(sheet.write_number(row, 0, m.int_adr as f64))?;
                xl(sheet.write_string(row, 1, issue.to_string()))?;
                row += 1;
            }
        }
        for issue in &team.redirect_issues {
            xl(sheet.write_string(row, 1, issue.to_string()))?;
            row += 1;
        }
    }

    xl(sheet.set_column_width(0, 20))?;
    xl(sheet.set_column_width(1, 60))?;
    Ok(())
}

fn write_members_sheet(sheet: &mut Worksheet, team: &TeamCompensation) -> Result<()> {
    xl(sheet.set_name("Členové"))?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0.00");

    let headers = [
        "INT_ADR",
        "Jméno",
        "Hodiny",
        "Jízdné",
        "Stravné",
        "Náhrada",
        "Nocleh",
        "Výdaje",
        "Celkem",
        "Vyplatit",
    ];
    for (col, header) in headers.iter().enumerate() {
        xl(sheet.write_string_with_format(0, col as u16, *header, &header_format))?;
    }

    for (idx, m) in team.members.iter().enumerate() {
        let row = (idx + 1) as u32;
        xl(sheet.write_number(row, 0, m.int_adr as f64))?;
        xl(sheet.write_string(row, 1, &m.name))?;
        if m.work_hours.is_known() {
            xl(sheet.write_number(row, 2, m.work_hours.hours))?;
        }
        let amounts = [
            m.transport,
            m.meal_allowance,
            m.work_allowance,
            m.accommodation,
            m.expenses,
            m.total,
        ];
        for (offset, amount) in amounts.iter().enumerate() {
            xl(sheet.write_number_with_format(row, 3 + offset as u16, *amount, &money_format))?;
        }
        xl(sheet.write_number(row, 9, m.paid_to as f64))?;
    }

    xl(sheet.set_column_width(1, 24))?;
    Ok(())
}

fn write_payouts_sheet(sheet: &mut Worksheet, team: &TeamCompensation) -> Result<()> {
    xl(sheet.set_name("Výplaty"))?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0.00");

    for (col, header) in ["INT_ADR", "Jméno", "Částka", "Za členy"].iter().enumerate() {
        xl(sheet.write_string_with_format(0, col as u16, *header, &header_format))?;
    }

    for (idx, payout) in team.payouts().iter().enumerate() {
        let row = (idx + 1) as u32;
        let members: Vec<String> = payout.members.iter().map(|m| m.to_string()).collect();
        xl(sheet.write_number(row, 0, payout.recipient as f64))?;
        xl(sheet.write_string(row, 1, &payout.name))?;
        xl(sheet.write_number_with_format(row, 2, payout.amount, &money_format))?;
        xl(sheet.write_string(row, 3, members.join(", ")))?;
    }

    xl(sheet.set_column_width(1, 24))?;
    Ok(())
}
