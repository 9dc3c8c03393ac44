//! Command handlers

use crate::cli::{Cli, Commands, ReportAction, ReportArgs, TariffAction};
use crate::output::{
    output_hours, output_member, output_report, output_reports, output_status, output_tariffs,
    output_team,
};
use prikazy_app::compensation_service::{load_tariffs, CompensationService, ReportSource};
use prikazy_app::config::Config;
use prikazy_app::export::export_by_extension;
use prikazy_app::repository::open_report_repo;
use prikazy_domain::model::OrderReport;
use prikazy_domain::repository::ReportRepository;
use prikazy_domain::service::{lookup, validate_table, Calculation};
use prikazy_infra::persistence::FileReportRepository;
use prikazy_infra::tariff_loader::TariffLoader;
use prikazy_infra::team_csv::load_team_from_csv;
use prikazy_types::{Error, IntAdr, OutputFormat, Result};
use std::path::PathBuf;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    execute_with_config(cli, config)
}

/// Execute CLI command against an already loaded configuration
pub fn execute_with_config(cli: Cli, mut config: Config) -> Result<()> {
    apply_overrides(&mut config, &cli);
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Compute { source, member } => cmd_compute(&config, &source, member, output_format),
        Commands::Hours { source } => cmd_hours(&config, &source, output_format),
        Commands::Tariff { action } => cmd_tariff(&config, action, output_format),
        Commands::Report { action } => cmd_report(&config, action, output_format),
        Commands::Export { source, output } => cmd_export(&config, &source, output),
        Commands::Config {
            show,
            set_tariffs,
            set_store_dir,
            set_output,
            set_strict_tariffs,
            reset,
        } => cmd_config(
            show,
            set_tariffs,
            set_store_dir,
            set_output,
            set_strict_tariffs,
            reset,
        ),
    }
}

/// CLI arguments take precedence over config values
pub fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref tariffs) = cli.tariffs {
        config.tariffs_path = Some(tariffs.clone());
    }
}

fn open_service(config: &Config, with_tariffs: bool) -> Result<CompensationService<FileReportRepository>> {
    let repo = open_report_repo(config)?;
    let tariffs = if with_tariffs {
        load_tariffs(config.tariffs_path.as_deref(), config.strict_tariffs)?
    } else {
        None
    };
    Ok(CompensationService::new(repo, tariffs))
}

/// Load the report named by the arguments, replacing its team when `--team` is given
pub fn load_source(
    service: &CompensationService<FileReportRepository>,
    args: &ReportArgs,
) -> Result<OrderReport> {
    let source = match (&args.report, &args.order) {
        (_, Some(order)) => ReportSource::Stored(order.clone()),
        (Some(path), None) => ReportSource::File(path.clone()),
        (None, None) => {
            return Err(Error::FileNotFound(
                "Specify a report file or --order".to_string(),
            ))
        }
    };
    let mut report = service.load_report(&source)?;
    if let Some(ref team_path) = args.team {
        report.team = load_team_from_csv(team_path)?;
    }
    Ok(report)
}

fn cmd_compute(
    config: &Config,
    source: &ReportArgs,
    member: Option<IntAdr>,
    output_format: OutputFormat,
) -> Result<()> {
    let service = open_service(config, true)?;
    let report = load_source(&service, source)?;

    if member.is_some() {
        let calculation = service.member_compensation(&report, member);
        output_member(output_format, &calculation)
    } else {
        let calculation = service.team_compensation(&report);
        output_team(output_format, &calculation)
    }
}

fn cmd_hours(config: &Config, source: &ReportArgs, output_format: OutputFormat) -> Result<()> {
    let service = open_service(config, false)?;
    let report = load_source(&service, source)?;
    output_hours(output_format, &service.work_hours(&report))
}

fn cmd_tariff(config: &Config, action: TariffAction, output_format: OutputFormat) -> Result<()> {
    let loader = TariffLoader::load_from_file(config.tariffs_path()?)?;

    match action {
        TariffAction::Show => output_tariffs(output_format, loader.table()),
        TariffAction::Validate => {
            let findings = validate_table(loader.table());
            if output_format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&findings)?);
            } else if findings.is_empty() {
                println!("Tariff ladders are sorted, contiguous, and non-overlapping.");
            } else {
                for (ladder, finding) in &findings {
                    println!("  ! {}: {}", ladder.label(), finding);
                }
            }
            Ok(())
        }
        TariffAction::Lookup { hours } => {
            let table = loader.table();
            let meal = lookup(&table.meal_tariffs, hours);
            let work = lookup(&table.work_tariffs, hours);
            if output_format == OutputFormat::Json {
                let value = serde_json::json!({
                    "hours": hours,
                    "meal": meal,
                    "work": work,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Hours:           {:.2}", hours);
                match meal {
                    Some(t) => println!("Stravné:         {:.2}", t.amount),
                    None => println!("Stravné:         missing data for calculation"),
                }
                match work {
                    Some(t) => println!("Náhrada:         {:.2}", t.amount),
                    None => println!("Náhrada:         missing data for calculation"),
                }
            }
            Ok(())
        }
    }
}

fn cmd_report(config: &Config, action: ReportAction, output_format: OutputFormat) -> Result<()> {
    let service = open_service(config, false)?;

    match action {
        ReportAction::Import { file } => {
            let report = service.repo().import_file(&file)?;
            println!(
                "Imported report {} ({} members, state {})",
                report.order_id,
                report.team.len(),
                report.state
            );
            Ok(())
        }
        ReportAction::List => {
            let reports = service.repo().find_all()?;
            output_reports(output_format, &reports)
        }
        ReportAction::Show { order } => {
            let report = service.load_report(&ReportSource::Stored(order))?;
            output_report(output_format, &report)
        }
        ReportAction::Status { order } => {
            let status = service.status(&order)?;
            output_status(output_format, &status)
        }
        ReportAction::Transition { order, to } => {
            let report = service.transition(&order, to)?;
            println!("Report {} is now {}", report.order_id, report.state);
            Ok(())
        }
        ReportAction::Delete { order } => {
            if service.repo().delete(&order)? {
                println!("Deleted report {}", order);
            } else {
                println!("No stored report {}", order);
            }
            Ok(())
        }
    }
}

fn cmd_export(config: &Config, source: &ReportArgs, output: PathBuf) -> Result<()> {
    let service = open_service(config, true)?;
    let report = load_source(&service, source)?;

    let team = match service.team_compensation(&report) {
        Calculation::Ready { result } => result,
        Calculation::Unavailable { reason } => return Err(Error::Unavailable(reason.to_string())),
    };

    export_by_extension(&team, &output)?;
    println!("Exported to: {}", output.display());
    Ok(())
}

fn cmd_config(
    show: bool,
    set_tariffs: Option<PathBuf>,
    set_store_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_strict_tariffs: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(path) = set_tariffs {
        // Fail early on unreadable tariff files
        TariffLoader::load_from_file(&path)?;
        config.tariffs_path = Some(path);
        modified = true;
    }

    if let Some(dir) = set_store_dir {
        config.store_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(strict) = set_strict_tariffs {
        config.strict_tariffs = strict;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
