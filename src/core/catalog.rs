use crate::core::{Course, CourseDetail, CourseSource, LoadReport, MalformedRecord};
use crate::domain::model::PrerequisiteRef;
use crate::utils::error::{PlannerError, Result};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

pub const LIST_HEADER: &str = "Here is a sample schedule:";

/// In-memory course catalog keyed by uppercase course id.
///
/// Every load starts by discarding whatever was held before, so a failed
/// load leaves the catalog empty rather than restoring the previous data.
#[derive(Debug, Default)]
pub struct CourseCatalog {
    courses: BTreeMap<String, Course>,
}

pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

impl CourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a course file from the local filesystem.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        self.clear();
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| PlannerError::SourceUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        self.load_reader(file)
    }

    /// Loads the record source `name` opened through `source`.
    pub fn load_from<S: CourseSource>(&mut self, source: &S, name: &str) -> Result<LoadReport> {
        self.clear();
        let reader = source
            .open(name)
            .map_err(|err| PlannerError::SourceUnavailable {
                path: name.to_string(),
                source: err,
            })?;
        self.load_reader(reader)
    }

    /// Replaces the catalog with the records read from `reader`.
    ///
    /// Every line is one record split on bare commas; quotes are ordinary
    /// characters. Blank lines are skipped silently. Lines with fewer than
    /// two fields are logged, collected into the report and skipped.
    /// A later record with the same id replaces the earlier one.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<LoadReport> {
        self.clear();

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .quoting(false)
            .from_reader(reader);

        let mut skipped = Vec::new();
        let mut record = csv::StringRecord::new();

        loop {
            match rdr.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    if let csv::ErrorKind::Utf8 { pos, .. } = e.kind() {
                        let line = pos.as_ref().map(|p| p.line()).unwrap_or(0);
                        skip(&mut skipped, line, "line is not valid UTF-8".to_string());
                        continue;
                    }
                    return Err(PlannerError::Csv(e));
                }
            }

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            match parse_course(&record) {
                Ok(Some(course)) => {
                    tracing::trace!("line {}: {}", line, course.id);
                    self.courses.insert(course.id.clone(), course);
                }
                Ok(None) => {}
                Err(reason) => skip(&mut skipped, line, reason),
            }
        }

        tracing::debug!(
            "Loaded {} courses, skipped {} lines",
            self.courses.len(),
            skipped.len()
        );

        Ok(LoadReport {
            courses: self.courses.len(),
            skipped,
        })
    }

    pub fn clear(&mut self) {
        self.courses.clear();
    }

    pub fn has_data(&self) -> bool {
        !self.courses.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Case-insensitive lookup.
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.get(&normalize_id(id))
    }

    pub fn sorted_ids(&self) -> Vec<String> {
        self.courses.keys().cloned().collect()
    }

    pub fn courses_sorted(&self) -> Vec<&Course> {
        self.courses.values().collect()
    }

    /// Resolves the prerequisites of `id`. Ids missing from the catalog
    /// come back without a title.
    pub fn detail(&self, id: &str) -> Option<CourseDetail> {
        let course = self.get(id)?;
        let prerequisites = course
            .prereqs
            .iter()
            .map(|pid| PrerequisiteRef {
                id: pid.clone(),
                title: self.courses.get(pid).map(|p| p.title.clone()),
            })
            .collect();

        Some(CourseDetail {
            id: course.id.clone(),
            title: course.title.clone(),
            prerequisites,
        })
    }

    pub fn prerequisite_summary(&self, course: &Course) -> String {
        self.detail(&course.id)
            .map(|d| d.prerequisite_summary())
            .unwrap_or_else(|| "None".to_string())
    }

    /// Writes the header followed by one `ID, Title` entry per course in
    /// id order. An empty catalog still gets the header.
    pub fn list_courses<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "\n{}\n\n", LIST_HEADER)?;
        for course in self.courses.values() {
            write!(out, "{}, {}\n\n", course.id, course.title)?;
        }
        Ok(())
    }

    /// Writes the title and resolved prerequisites of `query_id`.
    /// Returns `false` without writing anything when the id is unknown.
    pub fn describe_course<W: Write>(&self, query_id: &str, out: &mut W) -> Result<bool> {
        let Some(detail) = self.detail(query_id) else {
            return Ok(false);
        };
        write!(out, "{}, {}\n\n", detail.id, detail.title)?;
        writeln!(out, "Prerequisites: {}", detail.prerequisite_summary())?;
        Ok(true)
    }
}

fn skip(skipped: &mut Vec<MalformedRecord>, line: u64, reason: String) {
    tracing::warn!("line {} {}; skipping", line, reason);
    skipped.push(MalformedRecord { line, reason });
}

/// `Ok(None)` for a blank line, `Err(reason)` for a malformed one.
fn parse_course(record: &csv::StringRecord) -> std::result::Result<Option<Course>, String> {
    if record.iter().all(str::is_empty) && record.len() <= 1 {
        return Ok(None);
    }
    if record.len() < 2 {
        return Err("has <2 columns".to_string());
    }

    let id = normalize_id(&record[0]);
    let prereqs = record
        .iter()
        .skip(2)
        .filter(|field| !field.is_empty())
        .map(normalize_id)
        .collect();

    Ok(Some(Course {
        id,
        title: record[1].to_string(),
        prereqs,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
CSCI100,Introduction to Computer Science
CSCI101,Introduction to Programming in C++,CSCI100
MATH201,Discrete Mathematics
CSCI300,Introduction to Algorithms,CSCI200,MATH201
CSCI200,Data Structures,CSCI101
";

    fn loaded(text: &str) -> (CourseCatalog, LoadReport) {
        let mut catalog = CourseCatalog::new();
        let report = catalog.load_reader(Cursor::new(text.to_string())).unwrap();
        (catalog, report)
    }

    fn describe(catalog: &CourseCatalog, id: &str) -> Option<String> {
        let mut out = Vec::new();
        let found = catalog.describe_course(id, &mut out).unwrap();
        found.then(|| String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_load_counts_distinct_ids() {
        let (catalog, report) = loaded(SAMPLE);
        assert_eq!(report.courses, 5);
        assert!(report.skipped.is_empty());
        assert!(catalog.has_data());
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_fields_are_trimmed_and_ids_uppercased() {
        let (catalog, _) = loaded("  csci101 ,  Intro to Programming  , math201 ,\n");
        let course = catalog.get("CSCI101").unwrap();
        assert_eq!(course.id, "CSCI101");
        assert_eq!(course.title, "Intro to Programming");
        assert_eq!(course.prereqs, vec!["MATH201".to_string()]);
    }

    #[test]
    fn test_empty_prerequisite_fields_are_dropped() {
        let (catalog, _) = loaded("CSCI300,Algorithms,,CSCI200, ,MATH201,\n");
        assert_eq!(
            catalog.get("csci300").unwrap().prereqs,
            vec!["CSCI200".to_string(), "MATH201".to_string()]
        );
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let (catalog, report) = loaded("CSCI101,Old Title,MATH100\ncsci101,New Title\n");
        assert_eq!(report.courses, 1);
        let course = catalog.get("CSCI101").unwrap();
        assert_eq!(course.title, "New Title");
        assert!(course.prereqs.is_empty());
    }

    #[test]
    fn test_single_field_line_is_skipped_with_warning() {
        let (catalog, report) = loaded("CSCI999\nCSCI101,Intro to Programming\n");
        assert_eq!(report.courses, 1);
        assert_eq!(
            report.skipped,
            vec![MalformedRecord {
                line: 1,
                reason: "has <2 columns".to_string()
            }]
        );
        assert!(catalog.get("CSCI101").is_some());
        assert!(catalog.get("CSCI999").is_none());
    }

    #[test]
    fn test_blank_lines_are_skipped_silently() {
        let (catalog, report) = loaded("\n   \nCSCI101,Intro\n\n\t\nCSCI102,More\n");
        assert_eq!(report.courses, 2);
        assert!(report.skipped.is_empty());
        assert_eq!(catalog.sorted_ids(), vec!["CSCI101", "CSCI102"]);
    }

    #[test]
    fn test_empty_id_is_kept_under_empty_key() {
        let (catalog, report) = loaded(" ,Orphan title\nCSCI100,Intro\n");
        assert_eq!(report.courses, 2);
        assert!(report.skipped.is_empty());
        assert_eq!(catalog.sorted_ids(), vec!["", "CSCI100"]);
        assert_eq!(catalog.get("").unwrap().title, "Orphan title");

        let mut out = Vec::new();
        catalog.list_courses(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("\n, Orphan title\n"));
    }

    #[test]
    fn test_unbalanced_quote_does_not_swallow_following_lines() {
        let (catalog, report) =
            loaded("CSCI101,\"Intro\nCSCI200,Data Structures\nCSCI300,Algorithms\n");
        assert_eq!(report.courses, 3);
        assert!(report.skipped.is_empty());
        assert_eq!(catalog.get("CSCI101").unwrap().title, "\"Intro");
        assert_eq!(catalog.get("CSCI200").unwrap().title, "Data Structures");
        assert_eq!(catalog.get("CSCI300").unwrap().title, "Algorithms");
    }

    #[test]
    fn test_quoted_comma_still_splits_fields() {
        let (catalog, _) = loaded("CSCI400,\"Capstone, Large\",CSCI301\n");
        let course = catalog.get("CSCI400").unwrap();
        assert_eq!(course.title, "\"Capstone");
        assert_eq!(
            course.prereqs,
            vec!["LARGE\"".to_string(), "CSCI301".to_string()]
        );
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let mut bytes = b"CSCI101,Intro\n".to_vec();
        bytes.extend_from_slice(b"CSCI102,Bad \xff title\n");
        bytes.extend_from_slice(b"CSCI103,Fine\n");

        let mut catalog = CourseCatalog::new();
        let report = catalog.load_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(report.courses, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
    }

    #[test]
    fn test_sorted_ids_are_ordered_and_unique() {
        let (catalog, _) = loaded(SAMPLE);
        let ids = catalog.sorted_ids();
        assert_eq!(ids, vec!["CSCI100", "CSCI101", "CSCI200", "CSCI300", "MATH201"]);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_source_yields_no_data() {
        let (catalog, report) = loaded("");
        assert_eq!(report.courses, 0);
        assert!(!catalog.has_data());
        assert!(catalog.sorted_ids().is_empty());
    }

    #[test]
    fn test_reload_replaces_previous_contents() {
        let (mut catalog, _) = loaded(SAMPLE);
        catalog
            .load_reader(Cursor::new("BIO101,Biology\n".to_string()))
            .unwrap();
        assert_eq!(catalog.sorted_ids(), vec!["BIO101"]);
    }

    #[test]
    fn test_failed_load_leaves_catalog_cleared() {
        let (mut catalog, _) = loaded(SAMPLE);
        let err = catalog
            .load("/definitely/not/here/courses.csv")
            .unwrap_err();
        assert!(matches!(err, PlannerError::SourceUnavailable { .. }));
        assert!(!catalog.has_data());
    }

    #[test]
    fn test_describe_resolves_known_and_dangling_prereqs() {
        let (catalog, _) = loaded(
            "CSCI101,Intro to Programming\nCSCI300,Data Structures,CSCI101,MATH201\n",
        );
        assert_eq!(
            describe(&catalog, "csci300").unwrap(),
            "CSCI300, Data Structures\n\nPrerequisites: CSCI101 (Intro to Programming), MATH201\n"
        );
    }

    #[test]
    fn test_describe_without_prereqs() {
        let (catalog, _) = loaded(SAMPLE);
        assert_eq!(
            describe(&catalog, "CSCI100").unwrap(),
            "CSCI100, Introduction to Computer Science\n\nPrerequisites: None\n"
        );
    }

    #[test]
    fn test_describe_unknown_id_writes_nothing() {
        let (catalog, _) = loaded(SAMPLE);
        let mut out = Vec::new();
        assert!(!catalog.describe_course("CSCI999", &mut out).unwrap());
        assert!(out.is_empty());
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_list_courses_in_id_order() {
        let (catalog, _) = loaded("MATH201,Discrete Mathematics\nCSCI100,Intro\n");
        let mut out = Vec::new();
        catalog.list_courses(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nHere is a sample schedule:\n\nCSCI100, Intro\n\nMATH201, Discrete Mathematics\n\n"
        );
    }

    #[test]
    fn test_list_courses_on_empty_catalog_prints_header_only() {
        let catalog = CourseCatalog::new();
        let mut out = Vec::new();
        catalog.list_courses(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nHere is a sample schedule:\n\n");
    }

    #[test]
    fn test_prerequisite_summary() {
        let (catalog, _) = loaded(SAMPLE);
        let course = catalog.get("CSCI300").unwrap();
        assert_eq!(
            catalog.prerequisite_summary(course),
            "CSCI200 (Data Structures), MATH201 (Discrete Mathematics)"
        );
    }
}
