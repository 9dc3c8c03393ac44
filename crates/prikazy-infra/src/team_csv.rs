//! Team list loader from CSV
//!
//! Exports from the membership register are often Windows-1250 encoded, so
//! input that is not valid UTF-8 is decoded as Windows-1250.

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1250;
use prikazy_domain::model::TeamMember;
use prikazy_types::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TeamRow {
    #[serde(rename = "INT_ADR")]
    int_adr: String,
    name: String,
    #[serde(rename = "isLeader", default)]
    is_leader: String,
}

/// Load team members from a CSV file with header `INT_ADR,name,isLeader`
pub fn load_team_from_csv(path: &Path) -> Result<Vec<TeamMember>> {
    if !path.exists() {
        return Err(Error::FileNotFound(format!(
            "Team file not found: {}",
            path.display()
        )));
    }
    let bytes = fs::read(path)?;
    let content = decode(&bytes);
    let team = parse_team_csv(&content)?;
    tracing::debug!(path = %path.display(), members = team.len(), "loaded team");
    Ok(team)
}

fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.trim_start_matches('\u{feff}').to_string(),
        Err(_) => {
            let (decoded, _, had_errors) = WINDOWS_1250.decode(bytes);
            if had_errors {
                tracing::warn!("some characters could not be decoded from Windows-1250");
            }
            decoded.into_owned()
        }
    }
}

pub fn parse_team_csv(content: &str) -> Result<Vec<TeamMember>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut team = Vec::new();
    for (row_idx, result) in reader.deserialize::<TeamRow>().enumerate() {
        let row_num = row_idx + 2;
        let row = result.map_err(|e| Error::Csv(format!("row {}: {}", row_num, e)))?;
        let int_adr = row.int_adr.parse().map_err(|_| {
            Error::Csv(format!("row {}: invalid INT_ADR '{}'", row_num, row.int_adr))
        })?;
        team.push(TeamMember {
            int_adr,
            name: row.name,
            is_leader: parse_flag(&row.is_leader),
        });
    }
    Ok(team)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "ano" | "yes" | "x"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_team_csv() {
        let csv = "INT_ADR,name,isLeader\n4132,Jana Nováková,1\n5120,Petr Svoboda,\n";
        let team = parse_team_csv(csv).unwrap();
        assert_eq!(team.len(), 2);
        assert_eq!(team[0].int_adr, 4132);
        assert!(team[0].is_leader);
        assert_eq!(team[1].name, "Petr Svoboda");
        assert!(!team[1].is_leader);
    }

    #[test]
    fn test_invalid_int_adr() {
        let csv = "INT_ADR,name,isLeader\nabc,Jana,0\n";
        let err = parse_team_csv(csv).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_windows_1250_file() {
        let (encoded, _, _) = WINDOWS_1250.encode("INT_ADR,name,isLeader\n77,Řehoř Šťastný,ano\n");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tym.csv");
        std::fs::write(&path, &encoded).unwrap();

        let team = load_team_from_csv(&path).unwrap();
        assert_eq!(team[0].name, "Řehoř Šťastný");
        assert!(team[0].is_leader);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("ano"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}
