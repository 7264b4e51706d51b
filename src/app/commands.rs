use crate::core::catalog::CourseCatalog;
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// One-shot `list`: the same text the menu prints, or a JSON array.
pub fn render_list<W: Write>(catalog: &CourseCatalog, format: Format, out: &mut W) -> Result<()> {
    match format {
        Format::Text => catalog.list_courses(out)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &catalog.courses_sorted())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// One-shot `show`. Returns `false` when the id is not in the catalog;
/// nothing is written in that case.
pub fn render_course<W: Write>(
    catalog: &CourseCatalog,
    id: &str,
    format: Format,
    out: &mut W,
) -> Result<bool> {
    match format {
        Format::Text => catalog.describe_course(id, out),
        Format::Json => {
            let Some(detail) = catalog.detail(id) else {
                return Ok(false);
            };
            serde_json::to_writer_pretty(&mut *out, &detail)?;
            writeln!(out)?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn catalog() -> CourseCatalog {
        let mut catalog = CourseCatalog::new();
        catalog
            .load_reader(Cursor::new(
                "CSCI300,Data Structures,CSCI101,MATH201\nCSCI101,Intro to Programming\n",
            ))
            .unwrap();
        catalog
    }

    #[test]
    fn test_render_list_json() {
        let mut out = Vec::new();
        render_list(&catalog(), Format::Json, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let ids: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["CSCI101", "CSCI300"]);
        assert_eq!(value[1]["prereqs"], serde_json::json!(["CSCI101", "MATH201"]));
    }

    #[test]
    fn test_render_course_json_marks_dangling_prereq() {
        let mut out = Vec::new();
        assert!(render_course(&catalog(), "csci300", Format::Json, &mut out).unwrap());

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["title"], "Data Structures");
        assert_eq!(value["prerequisites"][0]["title"], "Intro to Programming");
        assert!(value["prerequisites"][1].get("title").is_none());
    }

    #[test]
    fn test_render_course_missing() {
        let mut out = Vec::new();
        assert!(!render_course(&catalog(), "NOPE", Format::Json, &mut out).unwrap());
        assert!(out.is_empty());
    }
}
