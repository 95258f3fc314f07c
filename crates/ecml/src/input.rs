//! Document input.

use std::io::{self, Read};
use std::path::Path;

/// Read a document from a file, or from stdin when no path (or `-`) is given.
pub(crate) fn read_document(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            io::stdin().lock().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
