//! Data models for submitted carbon credit projects

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque project identifier, accepted as either a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Number(n) => write!(f, "{}", n),
            ProjectId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        ProjectId::Text(String::new())
    }
}

/// Verification lifecycle stage as tracked by the reviewing authority
///
/// Unrecognised wire values are kept in `Other` so they survive a save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
    Other(String),
}

impl VerificationStatus {
    /// The four statuses a reviewer can filter by, in selector order
    pub fn known() -> [VerificationStatus; 4] {
        [
            VerificationStatus::Pending,
            VerificationStatus::UnderReview,
            VerificationStatus::Approved,
            VerificationStatus::Rejected,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::UnderReview => "under_review",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
            VerificationStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for VerificationStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => VerificationStatus::Pending,
            "under_review" => VerificationStatus::UnderReview,
            "approved" => VerificationStatus::Approved,
            "rejected" => VerificationStatus::Rejected,
            _ => VerificationStatus::Other(raw),
        }
    }
}

impl From<VerificationStatus> for String {
    fn from(status: VerificationStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A project submitted by an NGO for credit verification
///
/// Every field tolerates absence; missing values render blank. Records pass
/// through a JSON object so that keys this dashboard does not model, and
/// modelled keys holding a value of the wrong type, land in `extra` and are
/// written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Project {
    pub id: ProjectId,
    pub ngo_name: Option<String>,
    pub location: Option<String>,
    pub project_type: Option<String>,
    /// Area in hectares
    pub area: Option<f64>,
    pub submission_date: Option<String>,
    pub verification_status: Option<VerificationStatus>,
    pub extra: Map<String, Value>,
}

const ID: &str = "id";
const NGO_NAME: &str = "ngoName";
const LOCATION: &str = "location";
const PROJECT_TYPE: &str = "projectType";
const AREA: &str = "area";
const SUBMISSION_DATE: &str = "submissionDate";
const VERIFICATION_STATUS: &str = "verificationStatus";

/// Remove `key` from the record only if `convert` accepts its value
fn take<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    convert: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = convert(fields.get(key)?)?;
    fields.remove(key);
    Some(value)
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

impl From<Map<String, Value>> for Project {
    fn from(mut fields: Map<String, Value>) -> Self {
        let id = take(&mut fields, ID, |value| match value {
            Value::Number(n) => n.as_i64().map(ProjectId::Number),
            Value::String(s) => Some(ProjectId::Text(s.clone())),
            _ => None,
        })
        .unwrap_or_default();

        Project {
            id,
            ngo_name: take(&mut fields, NGO_NAME, text),
            location: take(&mut fields, LOCATION, text),
            project_type: take(&mut fields, PROJECT_TYPE, text),
            area: take(&mut fields, AREA, Value::as_f64),
            submission_date: take(&mut fields, SUBMISSION_DATE, text),
            verification_status: take(&mut fields, VERIFICATION_STATUS, |value| {
                value.as_str().map(|s| VerificationStatus::from(s.to_string()))
            }),
            extra: fields,
        }
    }
}

impl From<Project> for Map<String, Value> {
    fn from(project: Project) -> Self {
        let mut fields = project.extra;
        let put = |fields: &mut Map<String, Value>, key: &str, value: Option<Value>| {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        };

        // A default id only stands in for an unreadable one kept in `extra`
        if !(project.id == ProjectId::default() && fields.contains_key(ID)) {
            let id = match project.id {
                ProjectId::Number(n) => Value::from(n),
                ProjectId::Text(s) => Value::from(s),
            };
            fields.insert(ID.to_string(), id);
        }
        put(&mut fields, NGO_NAME, project.ngo_name.map(Value::from));
        put(&mut fields, LOCATION, project.location.map(Value::from));
        put(&mut fields, PROJECT_TYPE, project.project_type.map(Value::from));
        put(&mut fields, AREA, project.area.map(area_value));
        put(&mut fields, SUBMISSION_DATE, project.submission_date.map(Value::from));
        put(
            &mut fields,
            VERIFICATION_STATUS,
            project.verification_status.map(|s| Value::from(String::from(s))),
        );
        fields
    }
}

/// Whole hectares are written as integers, as they usually arrive
fn area_value(area: f64) -> Value {
    if area.fract() == 0.0 && area.abs() < 1e15 {
        Value::from(area as i64)
    } else {
        Value::from(area)
    }
}

impl Project {
    /// Parsed submission date, `None` when absent or unparseable
    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        self.submission_date.as_deref().and_then(parse_submission_date)
    }

    pub fn is_under_review(&self) -> bool {
        self.verification_status == Some(VerificationStatus::UnderReview)
    }

    /// Submission date in en-US short form (M/D/YYYY)
    pub fn formatted_date(&self) -> String {
        match (&self.submission_date, self.submitted_at()) {
            (None, _) => String::new(),
            (Some(_), Some(date)) => date.format("%-m/%-d/%Y").to_string(),
            (Some(_), None) => "Invalid Date".to_string(),
        }
    }

    /// Area with its unit; a textual area is shown as written
    pub fn formatted_area(&self) -> String {
        match (self.area, self.extra.get(AREA)) {
            (Some(area), _) if area.fract() == 0.0 && area.abs() < 1e15 => {
                format!("{} hectares", area as i64)
            }
            (Some(area), _) => format!("{} hectares", area),
            (None, Some(Value::String(raw))) => format!("{} hectares", raw),
            (None, _) => String::new(),
        }
    }
}

/// Parse a submission date in any of the accepted forms
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and naive `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_submission_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_project() {
        let json = r#"{
            "id": 1,
            "ngoName": "Green Earth",
            "location": "Kerala",
            "projectType": "Reforestation",
            "area": 50,
            "submissionDate": "2024-01-10",
            "verificationStatus": "under_review"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, ProjectId::Number(1));
        assert_eq!(project.ngo_name.as_deref(), Some("Green Earth"));
        assert_eq!(project.area, Some(50.0));
        assert!(project.is_under_review());
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let project: Project = serde_json::from_str(r#"{"id": "p-7"}"#).unwrap();
        assert_eq!(project.id, ProjectId::Text("p-7".to_string()));
        assert!(project.ngo_name.is_none());
        assert!(project.verification_status.is_none());
        assert_eq!(project.formatted_date(), "");
        assert_eq!(project.formatted_area(), "");
    }

    #[test]
    fn test_unknown_status_survives_round_trip() {
        let project: Project =
            serde_json::from_str(r#"{"id": 3, "verificationStatus": "on_hold"}"#).unwrap();
        assert_eq!(
            project.verification_status,
            Some(VerificationStatus::Other("on_hold".to_string()))
        );

        let json = serde_json::to_string(&project).unwrap();
        assert!(json.contains(r#""verificationStatus":"on_hold""#));
    }

    #[test]
    fn test_unmodelled_fields_survive_round_trip() {
        let json = r#"{"id": 1, "ngoName": "Green Earth", "area": 50,
            "carbonCredits": 1200, "documents": ["a.pdf"]}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.extra.get("carbonCredits"), Some(&Value::from(1200)));

        let written = serde_json::to_value(&project).unwrap();
        assert_eq!(written["carbonCredits"], 1200);
        assert_eq!(written["documents"][0], "a.pdf");
        assert_eq!(written["area"], 50);
        // Absent fields stay absent rather than becoming null
        assert!(written.get("location").is_none());
        assert!(written.get("verificationStatus").is_none());
    }

    #[test]
    fn test_mistyped_fields_degrade_and_keep_raw_value() {
        let json = r#"{"id": 4, "ngoName": "Teal Trust", "area": "50",
            "verificationStatus": 3, "submissionDate": false}"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project.ngo_name.as_deref(), Some("Teal Trust"));
        assert_eq!(project.area, None);
        assert_eq!(project.formatted_area(), "50 hectares");
        assert!(project.verification_status.is_none());
        assert_eq!(project.formatted_date(), "");

        let written = serde_json::to_value(&project).unwrap();
        assert_eq!(written["area"], "50");
        assert_eq!(written["verificationStatus"], 3);
        assert_eq!(written["submissionDate"], false);
    }

    #[test]
    fn test_new_status_replaces_mistyped_one() {
        let mut project: Project =
            serde_json::from_str(r#"{"id": 9, "verificationStatus": {"code": 2}}"#).unwrap();
        project.verification_status = Some(VerificationStatus::Approved);

        let written = serde_json::to_value(&project).unwrap();
        assert_eq!(written["verificationStatus"], "approved");
    }

    #[test]
    fn test_unreadable_id_is_kept() {
        let project: Project = serde_json::from_str(r#"{"id": true, "ngoName": "X"}"#).unwrap();
        assert_eq!(project.id, ProjectId::default());

        let written = serde_json::to_value(&project).unwrap();
        assert_eq!(written["id"], true);
    }

    #[test]
    fn test_parse_submission_date_forms() {
        let midnight = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_submission_date("2024-03-01"), Some(midnight));
        assert_eq!(parse_submission_date("2024-03-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_submission_date("2024-03-01T00:00"), Some(midnight));
        assert_eq!(parse_submission_date("last tuesday"), None);
    }

    #[test]
    fn test_formatted_date_and_area() {
        let project = Project {
            submission_date: Some("2024-01-10".to_string()),
            area: Some(12.5),
            ..Default::default()
        };
        assert_eq!(project.formatted_date(), "1/10/2024");
        assert_eq!(project.formatted_area(), "12.5 hectares");

        let broken = Project {
            submission_date: Some("not a date".to_string()),
            area: Some(50.0),
            ..Default::default()
        };
        assert_eq!(broken.formatted_date(), "Invalid Date");
        assert_eq!(broken.formatted_area(), "50 hectares");
    }
}
