use std::path::{Path, MAIN_SEPARATOR};

/// Resolve the directory for scratch files, always ending with a separator.
///
/// Falls back to the OS temp directory when no override is given. Called once
/// per recognition so a changed `TMPDIR` is picked up by the next run.
pub fn resolve_temp_dir(dir: Option<&Path>) -> String {
    let mut resolved = match dir {
        Some(dir) => dir.to_string_lossy().into_owned(),
        None => std::env::temp_dir().to_string_lossy().into_owned(),
    };
    if !resolved.ends_with(MAIN_SEPARATOR) {
        resolved.push(MAIN_SEPARATOR);
    }
    resolved
}

/// Last `/`-separated segment of an image path.
pub fn image_base_name(image_path: &str) -> &str {
    image_path.rsplit('/').next().unwrap_or(image_path)
}
