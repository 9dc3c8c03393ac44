//! Repository adapters for persistence layer

use std::path::PathBuf;

use prikazy_infra::persistence::FileReportRepository;
use prikazy_types::Result;

use crate::config::Config;

/// Open file-based report repository
pub fn open_report_repo(config: &Config) -> Result<FileReportRepository> {
    let store_dir = config.store_dir()?;
    FileReportRepository::open(store_dir)
}

/// Open report repository at a custom directory
pub fn open_report_repo_at(store_dir: PathBuf) -> Result<FileReportRepository> {
    FileReportRepository::open(store_dir)
}
