mod file_finder;

pub use file_finder::{read_text, FileFinder, SourceFile, SWIFT_EXT};

pub(crate) use file_finder::rel_string;
