pub mod catalog;
pub mod planner;

pub use crate::domain::model::{Course, CourseDetail, LoadReport, MalformedRecord};
pub use crate::domain::ports::CourseSource;
pub use crate::utils::error::Result;
