use std::io::Read;

/// Something that can hand out a readable course file by name.
pub trait CourseSource {
    fn open(&self, name: &str) -> std::io::Result<Box<dyn Read>>;
}

