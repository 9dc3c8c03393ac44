//! Repository trait definitions for data persistence

use prikazy_types::Error;

use crate::model::OrderReport;

/// Repository for work order reports
pub trait ReportRepository {
    /// Save (insert or replace) a report
    fn save(&self, report: &OrderReport) -> Result<(), Error>;

    /// Find a report by its order ID
    fn find_by_id(&self, order_id: &str) -> Result<Option<OrderReport>, Error>;

    /// Find all reports
    fn find_all(&self) -> Result<Vec<OrderReport>, Error>;

    /// Delete a report, returning whether it existed
    fn delete(&self, order_id: &str) -> Result<bool, Error>;
}
