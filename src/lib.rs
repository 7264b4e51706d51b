pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::LocalSource;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::PlannerConfig;

pub use crate::core::{catalog::CourseCatalog, planner::PlannerSession};
pub use domain::model::{Course, CourseDetail, LoadReport, MalformedRecord};
pub use utils::error::{PlannerError, Result};
