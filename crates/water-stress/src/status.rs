//! `status.json` and `metadata.json`.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StressResult;

/// Resume point of the next run, stored in the input folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatus {
    pub next_start_date: NaiveDate,
}

impl RunStatus {
    /// Read the status file; `None` when it does not exist.
    pub fn load(path: &Path) -> StressResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn save(&self, path: &Path) -> StressResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }
}

/// Summary read by the dashboard front-end.
///
/// Dates are `YYYY-MM-DD`, or empty when no data is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetadata {
    pub start_date: String,
    pub end_date: String,
    pub country_names: BTreeMap<String, String>,
}

impl DashboardMetadata {
    pub fn new(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        country_names: BTreeMap<String, String>,
    ) -> Self {
        let render = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        Self {
            start_date: render(start_date),
            end_date: render(end_date),
            country_names,
        }
    }

    pub fn save(&self, path: &Path) -> StressResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::temp_test_dir;

    #[test]
    fn test_status_roundtrip() {
        let dir = temp_test_dir("status_");
        let path = dir.path().join("status.json");
        assert_eq!(RunStatus::load(&path).unwrap(), None);

        let status = RunStatus {
            next_start_date: NaiveDate::from_ymd_opt(2021, 7, 1).unwrap(),
        };
        status.save(&path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"next_start_date":"2021-07-01"}"#
        );
        assert_eq!(RunStatus::load(&path).unwrap(), Some(status));
    }

    #[test]
    fn test_metadata_empty_dates() {
        let mut names = BTreeMap::new();
        names.insert("KEN".to_string(), "Kenya".to_string());
        let metadata = DashboardMetadata::new(None, None, names);
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(
            json,
            r#"{"start_date":"","end_date":"","country_names":{"KEN":"Kenya"}}"#
        );
    }
}
