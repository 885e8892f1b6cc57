use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// The name of the file without its directory and its extension.
pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// The file in which the form is written when no output is given: next to the input,
/// named after it and after the creation time, so that every run creates a new form.
pub fn default_output_path(input: &str, created_at: &NaiveDateTime) -> PathBuf {
    let file_name = format!(
        "{}-form-{}.json",
        simplify_file_name(input),
        created_at.format("%Y%m%d-%H%M%S")
    );
    match Path::new(input).parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
