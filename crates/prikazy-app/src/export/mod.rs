//! Export of compensation results

pub mod excel;

pub use excel::export_to_excel;
pub use prikazy_infra::compensation_csv::export_compensation_csv;

use std::path::Path;

use prikazy_domain::service::TeamCompensation;
use prikazy_types::Result;

/// Export by file extension: `.csv` as CSV, anything else as Excel
pub fn export_by_extension(team: &TeamCompensation, output_path: &Path) -> Result<()> {
    let is_csv = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        export_compensation_csv(team, output_path)
    } else {
        export_to_excel(team, output_path)
    }
}
