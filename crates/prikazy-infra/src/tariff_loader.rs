//! Tariff table loader from JSON or TOML files

use std::fs;
use std::path::Path;

use prikazy_domain::model::TariffTable;
use prikazy_domain::service::{validate_table, Ladder, TariffFinding};
use prikazy_types::{ConfigError, Error, Result};

/// Tariff table together with the ladder problems found while loading
#[derive(Debug)]
pub struct TariffLoader {
    table: TariffTable,
    findings: Vec<(Ladder, TariffFinding)>,
}

impl TariffLoader {
    /// Load a tariff table; `.toml` files are parsed as TOML, anything else as JSON
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(format!(
                "Tariff file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let loader = if is_toml {
            Self::load_from_toml_str(&content)?
        } else {
            Self::load_from_json_str(&content)?
        };
        tracing::debug!(
            path = %path.display(),
            meal = loader.table.meal_tariffs.len(),
            work = loader.table.work_tariffs.len(),
            "loaded tariff table"
        );
        Ok(loader)
    }

    pub fn load_from_json_str(content: &str) -> Result<Self> {
        let table: TariffTable = serde_json::from_str(content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse tariff JSON: {}",
                e
            )))
        })?;
        Ok(Self::from_table(table))
    }

    pub fn load_from_toml_str(content: &str) -> Result<Self> {
        let table: TariffTable = toml::from_str(content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse tariff TOML: {}",
                e
            )))
        })?;
        Ok(Self::from_table(table))
    }

    pub fn from_table(table: TariffTable) -> Self {
        let findings = validate_table(&table);
        for (ladder, finding) in &findings {
            tracing::warn!(ladder = ladder.label(), "tariff ladder: {}", finding);
        }
        Self { table, findings }
    }

    /// Reject tables whose ladders have overlaps, gaps, or empty ranges
    pub fn into_strict(self) -> Result<TariffTable> {
        if self.findings.is_empty() {
            return Ok(self.table);
        }
        let details: Vec<String> = self
            .findings
            .iter()
            .map(|(ladder, finding)| format!("{}: {}", ladder.label(), finding))
            .collect();
        Err(Error::Tariff(details.join("; ")))
    }

    pub fn table(&self) -> &TariffTable {
        &self.table
    }

    pub fn into_table(self) -> TariffTable {
        self.table
    }

    pub fn findings(&self) -> &[(Ladder, TariffFinding)] {
        &self.findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TEST_TOML: &str = r#"
jizdne = 5.6
jizdneZvysene = 7.2

[[stravneTariffs]]
Trvani_Od = 0
Trvani_Do = 5
Stravne = 0

[[stravneTariffs]]
Trvani_Od = 5
Trvani_Do = 12
Stravne = 140

[[stravneTariffs]]
Trvani_Od = 12
Stravne = 212

[[nahradyTariffs]]
Trvani_Od = 0
Trvani_Do = 6
Nahrada = 150

[[nahradyTariffs]]
Trvani_Od = 6
Nahrada = 250
"#;

    #[test]
    fn test_load_from_toml_str() {
        let loader = TariffLoader::load_from_toml_str(TEST_TOML).unwrap();
        assert!(loader.findings().is_empty());
        let table = loader.into_strict().unwrap();
        assert_eq!(table.km_rate, 5.6);
        assert_eq!(table.meal_tariffs.len(), 3);
        assert_eq!(table.meal_tariffs[2].to, None);
        assert_eq!(table.work_tariffs[1].amount, 250.0);
    }

    #[test]
    fn test_strict_rejects_overlap() {
        let json = r#"{
            "jizdne": 6, "jizdneZvysene": 8,
            "stravneTariffs": [
                {"Trvani_Od": 0, "Trvani_Do": 6, "Stravne": 0},
                {"Trvani_Od": 5, "Trvani_Do": null, "Stravne": 140}
            ],
            "nahradyTariffs": [{"Trvani_Od": 0, "Nahrada": 100}]
        }"#;
        let loader = TariffLoader::load_from_json_str(json).unwrap();
        assert_eq!(loader.findings().len(), 1);
        assert!(matches!(loader.into_strict(), Err(Error::Tariff(_))));
    }

    #[test]
    fn test_strict_rejects_closed_ladder() {
        let json = r#"{
            "jizdne": 6, "jizdneZvysene": 8,
            "stravneTariffs": [{"Trvani_Od": 0, "Stravne": 0}],
            "nahradyTariffs": [
                {"Trvani_Od": 0, "Trvani_Do": 4, "Nahrada": 100},
                {"Trvani_Od": 4, "Trvani_Do": 8, "Nahrada": 200}
            ]
        }"#;
        let loader = TariffLoader::load_from_json_str(json).unwrap();
        assert_eq!(
            loader.findings(),
            &[(Ladder::Work, TariffFinding::Unbounded { from: 8.0 })]
        );
        match loader.into_strict() {
            Err(Error::Tariff(msg)) => assert!(msg.contains("8 hours and more")),
            other => panic!("expected tariff error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let result = TariffLoader::load_from_json_str("{\"jizdne\": \"six\"}");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tarify.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(TEST_TOML.as_bytes()).unwrap();

        let loader = TariffLoader::load_from_file(&path).unwrap();
        assert_eq!(loader.table().km_rate_higher, 7.2);
    }

    #[test]
    fn test_missing_file() {
        let result = TariffLoader::load_from_file(Path::new("/nonexistent/tarify.json"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
