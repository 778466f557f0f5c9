//! CSV export of the rows currently shown in the overview

use super::store::StoreError;
use crate::model::{status, Project};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

const HEADERS: [&str; 8] = [
    "id",
    "ngo_name",
    "location",
    "project_type",
    "area_hectares",
    "submission_date",
    "verification_status",
    "status_label",
];

/// Write `rows` to a timestamped CSV file in `dir`, returning its path
pub fn export_csv(dir: &Path, rows: &[&Project]) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("projects-{}.csv", timestamp));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(HEADERS)?;
    for project in rows {
        writer.write_record(record(project))?;
    }
    writer.flush().map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Exported {} projects to {}", rows.len(), path.display());
    Ok(path)
}

fn record(project: &Project) -> [String; 8] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        project.id.to_string(),
        text(&project.ngo_name),
        text(&project.location),
        text(&project.project_type),
        project.area.map(|a| a.to_string()).unwrap_or_default(),
        text(&project.submission_date),
        project
            .verification_status
            .as_ref()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        status::badge(project.verification_status.as_ref())
            .label
            .to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectId, VerificationStatus};

    #[test]
    fn test_export_writes_header_and_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let projects = [
            Project {
                id: ProjectId::Number(2),
                ngo_name: Some("Blue Ocean".to_string()),
                area: Some(20.0),
                submission_date: Some("2024-03-01".to_string()),
                verification_status: Some(VerificationStatus::Approved),
                ..Default::default()
            },
            Project {
                id: ProjectId::Number(1),
                ngo_name: Some("Green, Earth".to_string()),
                verification_status: Some(VerificationStatus::UnderReview),
                ..Default::default()
            },
        ];
        let rows: Vec<&Project> = projects.iter().collect();

        let path = export_csv(dir.path(), &rows).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,ngo_name,location"));
        assert_eq!(lines[1], "2,Blue Ocean,,,20,2024-03-01,approved,Approved");
        assert_eq!(lines[2], "1,\"Green, Earth\",,,,,under_review,Under Review");
    }

    #[test]
    fn test_export_empty_view_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_csv(&dir.path().join("nested"), &[]).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
