//! Persistence implementations
//!
//! File-based implementations of the repository traits.

mod file_report_repo;

pub use file_report_repo::FileReportRepository;
