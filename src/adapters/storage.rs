use crate::domain::ports::CourseSource;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Opens course files from the local filesystem, relative to `base_path`.
/// Absolute names ignore the base path.
#[derive(Debug, Clone)]
pub struct LocalSource {
    base_path: PathBuf,
}

impl LocalSource {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new(".")
    }
}

impl CourseSource for LocalSource {
    fn open(&self, name: &str) -> std::io::Result<Box<dyn Read>> {
        let full_path = self.resolve(name);
        tracing::debug!("Opening course file {}", full_path.display());
        let file = File::open(&full_path)?;
        Ok(Box::new(file))
    }
}
