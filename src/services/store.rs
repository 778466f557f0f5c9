//! Project list loading and saving
//!
//! Files are JSON (a bare array or `{"projects": [...]}`) or YAML, picked by
//! extension. Saves keep the loaded layout and every field of every record.

use crate::model::Project;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported project file type: {0}")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> Result<Format, StoreError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Top-level layout of a project file, written back as it was read
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FileShape {
    /// A bare list of projects
    #[default]
    List,
    /// `{"projects": [...]}` along with any sibling keys
    Wrapped(Map<String, Value>),
}

/// Projects read from disk plus the layout they came in
#[derive(Debug, Default)]
pub struct ProjectFile {
    pub projects: Vec<Project>,
    pub shape: FileShape,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFile {
    List(Vec<Project>),
    Wrapped {
        projects: Vec<Project>,
        #[serde(flatten)]
        rest: Map<String, Value>,
    },
}

#[derive(Serialize)]
#[serde(untagged)]
enum RawFileOut<'a> {
    List(&'a [Project]),
    Wrapped {
        projects: &'a [Project],
        #[serde(flatten)]
        rest: &'a Map<String, Value>,
    },
}

impl From<RawFile> for ProjectFile {
    fn from(file: RawFile) -> Self {
        match file {
            RawFile::List(projects) => ProjectFile {
                projects,
                shape: FileShape::List,
            },
            RawFile::Wrapped { projects, rest } => ProjectFile {
                projects,
                shape: FileShape::Wrapped(rest),
            },
        }
    }
}

/// Load the project list; a missing file is an empty list
pub fn load_projects(path: &Path) -> Result<ProjectFile, StoreError> {
    let format = format_of(path)?;
    if !path.exists() {
        tracing::info!("Project file {} does not exist yet", path.display());
        return Ok(ProjectFile::default());
    }

    let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file: RawFile = match format {
        Format::Json => serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        Format::Yaml => serde_yaml::from_str(&contents).map_err(|source| StoreError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
    };

    let file = ProjectFile::from(file);
    tracing::debug!(
        "Loaded {} projects from {} ({:?})",
        file.projects.len(),
        path.display(),
        file.shape
    );
    Ok(file)
}

/// Write the project list back in the layout it was loaded with
pub fn save_projects(
    path: &Path,
    projects: &[Project],
    shape: &FileShape,
) -> Result<(), StoreError> {
    let out = match shape {
        FileShape::List => RawFileOut::List(projects),
        FileShape::Wrapped(rest) => RawFileOut::Wrapped { projects, rest },
    };
    let contents = match format_of(path)? {
        Format::Json => serde_json::to_string_pretty(&out).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        Format::Yaml => serde_yaml::to_string(&out).map_err(|source| StoreError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
    };

    fs::write(path, contents).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectId, VerificationStatus};

    #[test]
    fn test_load_bare_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(
            &path,
            r#"[{"id": 1, "ngoName": "Green Earth", "verificationStatus": "pending"},
                {"id": "b-2", "ngoName": "Blue Ocean"}]"#,
        )
        .unwrap();

        let file = load_projects(&path).unwrap();
        assert_eq!(file.shape, FileShape::List);
        assert_eq!(file.projects.len(), 2);
        assert_eq!(file.projects[1].id, ProjectId::Text("b-2".to_string()));
    }

    #[test]
    fn test_load_wrapped_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.yaml");
        fs::write(
            &path,
            "projects:\n  - id: 7\n    ngoName: Red Soil\n    area: 12.5\n    verificationStatus: under_review\n",
        )
        .unwrap();

        let projects = load_projects(&path).unwrap().projects;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].area, Some(12.5));
        assert_eq!(
            projects[0].verification_status,
            Some(VerificationStatus::UnderReview)
        );
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_projects(&dir.path().join("absent.json")).unwrap();
        assert!(file.projects.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_projects(Path::new("projects.txt")).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_projects(&path).unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
        assert!(err.to_string().contains("projects.json"));
    }

    #[test]
    fn test_save_then_load_keeps_status_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.yaml");
        let mut projects = vec![Project {
            id: ProjectId::Number(1),
            verification_status: Some(VerificationStatus::UnderReview),
            ..Default::default()
        }];
        projects[0].verification_status = Some(VerificationStatus::Approved);

        save_projects(&path, &projects, &FileShape::List).unwrap();
        let reloaded = load_projects(&path).unwrap().projects;
        assert_eq!(
            reloaded[0].verification_status,
            Some(VerificationStatus::Approved)
        );
    }

    #[test]
    fn test_bare_array_saved_as_bare_array_with_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(
            &path,
            r#"[{"id": 1, "ngoName": "Green Earth", "verificationStatus": "under_review",
                 "carbonCredits": 1200, "documents": ["a.pdf"]},
                {"id": 2, "ngoName": "Blue Ocean"}]"#,
        )
        .unwrap();

        let mut file = load_projects(&path).unwrap();
        file.projects[0].verification_status = Some(VerificationStatus::Approved);
        save_projects(&path, &file.projects, &file.shape).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let records = written.as_array().expect("bare array");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["verificationStatus"], "approved");
        assert_eq!(records[0]["carbonCredits"], 1200);
        assert_eq!(records[0]["documents"][0], "a.pdf");
        assert!(records[1].get("location").is_none());
        assert!(records[1].get("verificationStatus").is_none());
    }

    #[test]
    fn test_wrapper_keys_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(
            &path,
            r#"{"registry": "NCCR", "version": 2, "projects": [{"id": 5}]}"#,
        )
        .unwrap();

        let file = load_projects(&path).unwrap();
        assert!(matches!(file.shape, FileShape::Wrapped(_)));
        save_projects(&path, &file.projects, &file.shape).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["registry"], "NCCR");
        assert_eq!(written["version"], 2);
        assert_eq!(written["projects"][0]["id"], 5);
    }

    #[test]
    fn test_one_mistyped_field_keeps_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(
            &path,
            r#"[{"id": 1, "ngoName": "Green Earth", "area": "50"},
                {"id": 2, "ngoName": "Blue Ocean", "verificationStatus": 7}]"#,
        )
        .unwrap();

        let projects = load_projects(&path).unwrap().projects;
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].formatted_area(), "50 hectares");
        assert_eq!(projects[1].ngo_name.as_deref(), Some("Blue Ocean"));
        assert!(projects[1].verification_status.is_none());
    }
}
