mod swift;

pub use swift::{ScannedFile, SwiftScanner};
