use super::model::AudioFileRef;

/// Build the list row for `file`: its name (or full path when `show_paths`),
/// prefixed with `marker` for favorites that are not in the scanned library.
pub fn row_label(file: &AudioFileRef, show_paths: bool, marker: Option<&str>) -> String {
    let text = if show_paths {
        file.path().display().to_string()
    } else {
        file.display_name().to_string()
    };

    match marker.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => format!("{m} {text}"),
        None => text,
    }
}
