//! File-based report repository implementation

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use prikazy_domain::model::OrderReport;
use prikazy_domain::repository::ReportRepository;
use prikazy_types::{Error, Result, StoreError};

/// Stores reports in `reports.json`, keyed by order ID
pub struct FileReportRepository {
    store_path: PathBuf,
    reports: RefCell<BTreeMap<String, OrderReport>>,
}

impl FileReportRepository {
    /// Create or load a report repository
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("reports.json");

        let reports = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).map_err(|e| {
                StoreError::Corrupted(format!("{}: {}", store_path.display(), e))
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            store_path,
            reports: RefCell::new(reports),
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Save store to disk; the new content replaces `reports.json` only once fully written
    fn persist(&self) -> Result<()> {
        let tmp_path = self.store_path.with_extension("json.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &*self.reports.borrow())?;
        writer.flush()?;
        fs::rename(&tmp_path, &self.store_path)?;
        Ok(())
    }

    /// Persist, restoring `order_id` to `previous` in memory when the write fails
    fn persist_or_restore(&self, order_id: &str, previous: Option<OrderReport>) -> Result<()> {
        let result = self.persist();
        if result.is_err() {
            let mut reports = self.reports.borrow_mut();
            match previous {
                Some(report) => reports.insert(order_id.to_string(), report),
                None => reports.remove(order_id),
            };
            tracing::warn!(order = %order_id, "store write failed, change reverted");
        }
        result
    }

    /// Import a report from a JSON file and store it
    pub fn import_file(&self, path: &Path) -> Result<OrderReport> {
        if !path.exists() {
            return Err(Error::FileNotFound(format!(
                "Report file not found: {}",
                path.display()
            )));
        }
        let file = File::open(path)?;
        let report: OrderReport = serde_json::from_reader(BufReader::new(file))?;
        self.save(&report)?;
        self.find_by_id(&report.order_id)?
            .ok_or_else(|| StoreError::NotFound(report.order_id.clone()).into())
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }
}

impl ReportRepository for FileReportRepository {
    fn save(&self, report: &OrderReport) -> std::result::Result<(), Error> {
        let mut stored = report.clone();
        stored.updated_at = Some(Utc::now());
        let previous = self
            .reports
            .borrow_mut()
            .insert(stored.order_id.clone(), stored);
        self.persist_or_restore(&report.order_id, previous)?;
        tracing::debug!(order = %report.order_id, "report saved");
        Ok(())
    }

    fn find_by_id(&self, order_id: &str) -> std::result::Result<Option<OrderReport>, Error> {
        Ok(self.reports.borrow().get(order_id).cloned())
    }

    fn find_all(&self) -> std::result::Result<Vec<OrderReport>, Error> {
        Ok(self.reports.borrow().values().cloned().collect())
    }

    fn delete(&self, order_id: &str) -> std::result::Result<bool, Error> {
        let removed = self.reports.borrow_mut().remove(order_id);
        let Some(previous) = removed else {
            return Ok(false);
        };
        self.persist_or_restore(order_id, Some(previous))?;
        Ok(true)
    }
}
