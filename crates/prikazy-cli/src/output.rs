//! Output formatting module

use prikazy_app::compensation_service::ReportStatus;
use prikazy_domain::model::{OrderReport, TariffTable, TeamMember};
use prikazy_domain::service::{
    generate_compensation_report, Calculation, MemberCompensation, TeamCompensation, WorkHours,
};
use prikazy_types::{OutputFormat, Result};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn flag(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "incomplete"
    }
}

pub fn output_team(format: OutputFormat, calculation: &Calculation<TeamCompensation>) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(calculation);
    }
    match calculation {
        Calculation::Ready { result } => {
            println!("{}", generate_compensation_report(result));
            let payouts = result.payouts();
            if result.members.iter().any(|m| m.is_redirected()) {
                println!("Výplaty / Payouts");
                println!("=================");
                for p in payouts {
                    println!("  {:<8} {:<20} {:>10.2}", p.recipient, p.name, p.amount);
                }
            }
        }
        Calculation::Unavailable { reason } => {
            println!("Compensation unavailable: {}", reason);
        }
    }
    Ok(())
}

pub fn output_member(
    format: OutputFormat,
    calculation: &Calculation<MemberCompensation>,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(calculation);
    }
    let m = match calculation {
        Calculation::Ready { result } => result,
        Calculation::Unavailable { reason } => {
            println!("Compensation unavailable: {}", reason);
            return Ok(());
        }
    };

    println!("\n{} ({})", m.name, m.int_adr);
    println!("===============");
    if m.work_hours.is_known() {
        println!("Work hours:      {:.2} h", m.work_hours.hours);
    } else {
        println!("Work hours:      cannot compute");
    }
    println!(
        "Transport:       {:>10.2}{}",
        m.transport,
        if m.higher_rate_applied {
            " (higher rate)"
        } else {
            ""
        }
    );
    println!("Meal allowance:  {:>10.2}", m.meal_allowance);
    println!("Work allowance:  {:>10.2}", m.work_allowance);
    println!("Accommodation:   {:>10.2}", m.accommodation);
    println!("Expenses:        {:>10.2}", m.expenses);
    println!("-----------------------------");
    println!("Total:           {:>10.2}", m.total);
    if m.is_redirected() {
        println!("Paid to:         {}", m.paid_to);
    }
    if !m.issues.is_empty() {
        println!("\nMissing data:");
        for issue in &m.issues {
            println!("  ! {}", issue);
        }
    }
    Ok(())
}

pub fn output_hours(format: OutputFormat, hours: &[(TeamMember, WorkHours)]) -> Result<()> {
    if format == OutputFormat::Json {
        #[derive(Serialize)]
        struct Row<'a> {
            member: &'a TeamMember,
            work_hours: &'a WorkHours,
        }
        let rows: Vec<Row> = hours
            .iter()
            .map(|(member, work_hours)| Row { member, work_hours })
            .collect();
        return print_json(&rows);
    }

    for (member, wh) in hours {
        if wh.is_known() {
            println!("{:<8} {:<24} {:>6.2} h", member.int_adr, member.name, wh.hours);
        } else {
            println!("{:<8} {:<24} {:>8}", member.int_adr, member.name, "?");
        }
        for day in &wh.days {
            println!(
                "           {}  {} - {}",
                day.date,
                day.start.format("%H:%M"),
                day.end.format("%H:%M")
            );
        }
        for issue in &wh.incomplete {
            println!("           ! {}", issue);
        }
    }
    Ok(())
}

pub fn output_tariffs(format: OutputFormat, table: &TariffTable) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(table);
    }
    println!("Jízdné:          {:.2} / km", table.km_rate);
    println!("Jízdné zvýšené:  {:.2} / km", table.km_rate_higher);
    println!("\nStravné");
    for t in &table.meal_tariffs {
        println!("  [{:>5}, {:>5})  {:>8.2}", t.from, fmt_upper(t.to), t.amount);
    }
    println!("\nNáhrada za práci");
    for t in &table.work_tariffs {
        println!("  [{:>5}, {:>5})  {:>8.2}", t.from, fmt_upper(t.to), t.amount);
    }
    Ok(())
}

fn fmt_upper(to: Option<f64>) -> String {
    to.map(|t| t.to_string()).unwrap_or_else(|| "∞".to_string())
}

pub fn output_reports(format: OutputFormat, reports: &[OrderReport]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&reports);
    }
    if reports.is_empty() {
        println!("No stored reports");
        return Ok(());
    }
    println!("{:<16} {:<10} {:>7}  {}", "Order", "State", "Members", "Title");
    println!("{}", "-".repeat(60));
    for r in reports {
        println!(
            "{:<16} {:<10} {:>7}  {}",
            r.order_id,
            r.state,
            r.team.len(),
            r.title.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

pub fn output_report(format: OutputFormat, report: &OrderReport) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(report);
    }
    println!("Order:           {}", report.order_id);
    if let Some(ref title) = report.title {
        println!("Title:           {}", title);
    }
    println!("State:           {}", report.state);
    if let Some(date) = report.form.execution_date {
        println!("Executed:        {}", date);
    }
    if let Some(ts) = report.updated_at {
        println!("Updated:         {}", ts.to_rfc3339());
    }
    println!("\nTeam:");
    for m in &report.team {
        println!(
            "  {:<8} {}{}",
            m.int_adr,
            m.name,
            if m.is_leader { " (vedoucí)" } else { "" }
        );
    }
    println!("\nTravel groups:");
    for (idx, group) in report.form.travel_groups.iter().enumerate() {
        println!(
            "  {}. driver {} / {} passengers / {} legs{}",
            idx + 1,
            group
                .driver
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            group.passengers.len(),
            group.segments.len(),
            group
                .license_plate
                .as_deref()
                .map(|p| format!(" / {}", p))
                .unwrap_or_default()
        );
        for segment in &group.segments {
            println!(
                "       {} {} {} -> {} {} ({})",
                segment.departure_place.as_deref().unwrap_or("?"),
                segment.departure_time.as_deref().unwrap_or("?"),
                segment.arrival_place.as_deref().unwrap_or("?"),
                segment.arrival_time.as_deref().unwrap_or("?"),
                segment
                    .kilometers
                    .map(|km| format!("{} km", km))
                    .unwrap_or_default(),
                segment.mode.label()
            );
        }
    }
    println!(
        "\nAccommodations: {}   Expenses: {}   TIMs: {}",
        report.form.accommodations.len(),
        report.form.expenses.len(),
        report.form.tims.len()
    );
    Ok(())
}

pub fn output_status(format: OutputFormat, status: &ReportStatus) -> Result<()> {
    if format == OutputFormat::Json {
        #[derive(Serialize)]
        struct Out<'a> {
            order_id: &'a str,
            state: String,
            complete: bool,
            completion: &'a prikazy_domain::service::Completion,
            tims: &'a [prikazy_domain::service::TimSummary],
        }
        return print_json(&Out {
            order_id: &status.report.order_id,
            state: status.report.state.to_string(),
            complete: status.completion.is_complete(),
            completion: &status.completion,
            tims: &status.tims,
        });
    }

    let c = &status.completion;
    println!("Order {} ({})", status.report.order_id, status.report.state);
    println!("  Execution date:  {}", flag(c.execution_date));
    println!("  Travel:          {}", flag(c.travel));
    println!("  Accommodation:   {}", flag(c.accommodation));
    println!("  Expenses:        {}", flag(c.expenses));
    println!("  TIM assessment:  {}", flag(c.tims));
    for tim in &status.tims {
        println!(
            "    {} {}: {}/{} assessed, {} to replace",
            tim.tim_id,
            tim.name.as_deref().unwrap_or(""),
            tim.assessed,
            tim.total_items,
            tim.needing_replacement
        );
    }
    if c.is_complete() {
        println!("\nReady to send.");
    } else {
        println!("\nMissing data:");
        for issue in &c.issues {
            println!("  ! {}", issue);
        }
    }
    Ok(())
}
