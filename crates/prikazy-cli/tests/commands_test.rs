//! Command dispatch against the fixture work order

use std::path::{Path, PathBuf};

use clap::Parser;
use prikazy_app::compensation_service::CompensationService;
use prikazy_app::config::Config;
use prikazy_app::repository::open_report_repo_at;
use prikazy_cli::cli::{Cli, Commands, ReportArgs};
use prikazy_cli::commands::{apply_overrides, execute_with_config, load_source};
use prikazy_domain::repository::ReportRepository;
use prikazy_types::{Error, OutputFormat};
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("fixtures")
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).display().to_string()
}

fn config_in(dir: &Path) -> Config {
    Config {
        tariffs_path: Some(fixtures_dir().join("tariffs.toml")),
        store_dir: Some(dir.join("store")),
        output_format: OutputFormat::Json,
        strict_tariffs: true,
    }
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("prikazy").chain(args.iter().copied())).unwrap()
}

#[test]
fn report_file_and_order_are_exclusive() {
    let result = Cli::try_parse_from(["prikazy", "compute", "report.json", "--order", "2024/118"]);
    assert!(result.is_err());
    assert!(Cli::try_parse_from(["prikazy", "compute"]).is_err());
}

#[test]
fn tariffs_flag_overrides_config() {
    let dir = tempdir().unwrap();
    let mut config = config_in(dir.path());
    apply_overrides(&mut config, &parse(&["hours", "r.json", "-t", "/srv/tarify.json"]));
    assert_eq!(config.tariffs_path, Some(PathBuf::from("/srv/tarify.json")));

    let mut config = config_in(dir.path());
    apply_overrides(&mut config, &parse(&["hours", "r.json"]));
    assert_eq!(config.tariffs_path, Some(fixtures_dir().join("tariffs.toml")));
}

#[test]
fn overridden_tariffs_are_used_by_compute() {
    let dir = tempdir().unwrap();
    let report = fixture("report_2024_118.json");

    execute_with_config(parse(&["compute", &report]), config_in(dir.path())).unwrap();

    let result = execute_with_config(
        parse(&["compute", &report, "--tariffs", "/nonexistent/tarify.toml"]),
        config_in(dir.path()),
    );
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}

#[test]
fn load_source_from_file_with_team_override() {
    let dir = tempdir().unwrap();
    let repo = open_report_repo_at(dir.path().to_path_buf()).unwrap();
    let service = CompensationService::new(repo, None);

    let args = ReportArgs {
        report: Some(fixtures_dir().join("report_2024_118.json")),
        order: None,
        team: None,
    };
    assert_eq!(load_source(&service, &args).unwrap().team.len(), 4);

    let args = ReportArgs {
        team: Some(fixtures_dir().join("team.csv")),
        ..args
    };
    let report = load_source(&service, &args).unwrap();
    assert_eq!(report.team.len(), 2);
    assert_eq!(report.order_id, "2024/118");
}

#[test]
fn load_source_from_store() {
    let dir = tempdir().unwrap();
    let repo = open_report_repo_at(dir.path().to_path_buf()).unwrap();
    repo.import_file(&fixtures_dir().join("report_2024_118.json"))
        .unwrap();
    let service = CompensationService::new(repo, None);

    let cli = parse(&["hours", "--order", "2024/118"]);
    let Commands::Hours { source } = cli.command else {
        panic!("expected hours command");
    };
    let report = load_source(&service, &source).unwrap();
    assert_eq!(report.team.len(), 4);

    let missing = ReportArgs {
        report: None,
        order: Some("1999/1".to_string()),
        team: None,
    };
    assert!(load_source(&service, &missing).is_err());
}

#[test]
fn import_transition_and_export() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());

    execute_with_config(
        parse(&["report", "import", &fixture("report_2024_118.json")]),
        config.clone(),
    )
    .unwrap();
    execute_with_config(
        parse(&["report", "transition", "2024/118", "--to", "send"]),
        config.clone(),
    )
    .unwrap();

    let output = dir.path().join("vyuctovani.csv");
    let output_arg = output.display().to_string();
    execute_with_config(
        parse(&["export", "--order", "2024/118", "-O", &output_arg]),
        config.clone(),
    )
    .unwrap();
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 5);

    let repo = open_report_repo_at(dir.path().join("store")).unwrap();
    let stored = repo.find_by_id("2024/118").unwrap().unwrap();
    assert_eq!(stored.state.to_string(), "send");
}
