use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub prereqs: Vec<String>,
}

/// A prerequisite id together with its title when the catalog knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrerequisiteRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl fmt::Display for PrerequisiteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{} ({})", self.id, title),
            None => f.write_str(&self.id),
        }
    }
}

/// A course with its prerequisites resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    pub id: String,
    pub title: String,
    pub prerequisites: Vec<PrerequisiteRef>,
}

impl CourseDetail {
    /// `"None"` or the comma-joined prerequisite list.
    pub fn prerequisite_summary(&self) -> String {
        if self.prerequisites.is_empty() {
            return "None".to_string();
        }
        self.prerequisites
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A line that was skipped during a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedRecord {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Distinct course ids held after the load.
    pub courses: usize,
    pub skipped: Vec<MalformedRecord>,
}
