use std::path::PathBuf;

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
///
/// Falls back to the literal input when a variable is undefined.
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string());
    PathBuf::from(expanded)
}
