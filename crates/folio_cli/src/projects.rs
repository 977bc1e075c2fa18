//! Project and lane files

use anyhow::{Context, Result};
use folio_calendar::{LaneAssignment, ProjectSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A projects file: a list of `[[project]]` tables
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProjectsFile {
    #[serde(default, rename = "project")]
    pub projects: Vec<ProjectSpec>,
}

impl ProjectsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), projects = file.projects.len(), "loaded projects");
        Ok(file)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Load a previous lane assignment written by `folio lanes --json`
pub fn load_assignment(path: &Path) -> Result<LaneAssignment> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_project_tables() {
        let file = ProjectsFile::from_toml(
            r#"
            [[project]]
            id = "project-01"
            name = "Project 01"
            start = "2026-02-09"
            end = "2026-02-20"
            color = "red"

            [[project]]
            id = "project-02"
            name = "Project 02"
            start = "2026-02-16"
            end = "2026-03-06"
            "#,
        )
        .unwrap();

        assert_eq!(file.projects.len(), 2);
        assert_eq!(file.projects[0].color.as_deref(), Some("red"));
        assert_eq!(file.projects[1].color, None);
    }

    #[test]
    fn test_empty_file_has_no_projects() {
        assert!(ProjectsFile::from_toml("").unwrap().projects.is_empty());
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let err = ProjectsFile::from_toml("[[project]]\nid = \"x\"\nname = \"X\"\nstart = \"2026-01-01\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_assignment_json_shape() {
        let lanes: LaneAssignment = serde_json::from_str(r#"{"a": 0, "b": 1}"#).unwrap();
        assert_eq!(lanes.get("b"), Some(1));
        assert_eq!(serde_json::to_string(&lanes).unwrap(), r#"{"a":0,"b":1}"#);
    }
}
