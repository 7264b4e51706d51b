use crate::core::catalog::{normalize_id, CourseCatalog};
use crate::core::{CourseSource, LoadReport, Result};
use std::io::{BufRead, Write};

pub const WELCOME: &str = "Welcome to the ABCU Course Planner!";
pub const NOT_LOADED: &str = "Please load data first (option 1).";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    List,
    Describe,
    Exit,
    Invalid,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::Load,
            "2" => MenuChoice::List,
            "3" => MenuChoice::Describe,
            "9" => MenuChoice::Exit,
            _ => MenuChoice::Invalid,
        }
    }
}

/// Interactive menu over a catalog. List and describe are refused until
/// the catalog holds data; `CourseCatalog::has_data` is the only gate.
pub struct PlannerSession<S: CourseSource> {
    catalog: CourseCatalog,
    source: S,
    default_path: Option<String>,
}

impl<S: CourseSource> PlannerSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            catalog: CourseCatalog::new(),
            source,
            default_path: None,
        }
    }

    /// Path used when the load prompt is answered with an empty line.
    pub fn with_default_path(mut self, path: Option<String>) -> Self {
        self.default_path = path;
        self
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn load(&mut self, path: &str) -> Result<LoadReport> {
        tracing::info!("Loading courses from {}", path);
        let report = self.catalog.load_from(&self.source, path)?;
        tracing::info!("Loaded {} courses", report.courses);
        Ok(report)
    }

    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        write!(out, "{}\n\n", WELCOME)?;

        loop {
            print_menu(out)?;
            write!(out, "What would you like to do? ")?;
            out.flush()?;

            let Some(choice) = read_answer(&mut input)? else {
                writeln!(out, "\nInput error. Exiting.")?;
                break;
            };
            if choice.is_empty() {
                writeln!(out, "Please enter a choice.")?;
                continue;
            }

            match MenuChoice::parse(&choice) {
                MenuChoice::Load => self.handle_load(&mut input, out)?,
                MenuChoice::List => {
                    if !self.catalog.has_data() {
                        writeln!(out, "{}", NOT_LOADED)?;
                        continue;
                    }
                    self.catalog.list_courses(out)?;
                }
                MenuChoice::Describe => {
                    if !self.catalog.has_data() {
                        writeln!(out, "{}", NOT_LOADED)?;
                        continue;
                    }
                    self.handle_describe(&mut input, out)?;
                }
                MenuChoice::Exit => {
                    writeln!(out, "\nThank you for using the ABCU Course Planner. \nGoodbye!")?;
                    break;
                }
                MenuChoice::Invalid => {
                    tracing::debug!("Unrecognised menu choice {:?}", choice);
                    writeln!(out, "Invalid choice. Please try again.")?;
                }
            }
        }

        Ok(())
    }

    fn handle_load<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        write!(out, "\nEnter the path to the course CSV file: ")?;
        out.flush()?;

        let answer = read_answer(input)?.unwrap_or_default();
        let path = match (answer.is_empty(), &self.default_path) {
            (false, _) => answer,
            (true, Some(default)) => default.clone(),
            (true, None) => {
                writeln!(out, "Please enter a file path.")?;
                return Ok(());
            }
        };

        match self.load(&path) {
            Ok(report) => {
                writeln!(out, "Loaded {} courses.", report.courses)?;
                if !report.skipped.is_empty() {
                    writeln!(out, "Skipped {} malformed line(s).", report.skipped.len())?;
                }
            }
            Err(e) => {
                tracing::error!("Load failed: {}", e);
                writeln!(out, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn handle_describe<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<()> {
        write!(out, "\nWhat course do you want to know about? ")?;
        out.flush()?;

        let id = read_answer(input)?.unwrap_or_default();
        if id.is_empty() {
            writeln!(out, "Please enter a course ID.")?;
            return Ok(());
        }

        if !self.catalog.describe_course(&id, out)? {
            writeln!(out, "{} not found in the catalog.", normalize_id(&id))?;
        }
        Ok(())
    }
}

fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\n1. Load Data Structure.")?;
    writeln!(out, "2. Print Course List.")?;
    writeln!(out, "3. Print Course.")?;
    write!(out, "9. Exit\n\n")?;
    Ok(())
}

/// Next line with surrounding whitespace removed, or `None` at end of input.
fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
