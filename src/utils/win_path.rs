// === Windows path helpers ===
// Host paths are Windows paths even when the crate is built elsewhere, so
// `std::path` (which only splits on the native separator) is not used here.

/// Separator used when joining paths handed to robocopy
pub const SEPARATOR: char = '\\';

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

/// Strip trailing separators, keeping a bare drive root like `D:\` intact
pub fn trim_trailing_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        // "\\" or "/" alone: keep one separator
        return &path[..path.len().min(1)];
    }
    if is_drive(trimmed) && trimmed.len() < path.len() {
        return &path[..trimmed.len() + 1];
    }
    trimmed
}

/// "C:" style drive designator
fn is_drive(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Last path component, or None for roots and empty paths
pub fn file_name(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches(is_separator);
    let name = match trimmed.rfind(is_separator) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    };
    if name.is_empty() || is_drive(name) {
        None
    } else {
        Some(name)
    }
}

/// Containing directory. `D:\a.txt` -> `D:\`, `a.txt` -> ``
pub fn parent(path: &str) -> &str {
    let trimmed = path.trim_end_matches(is_separator);
    match trimmed.rfind(is_separator) {
        Some(idx) => {
            let head = &trimmed[..idx];
            if head.is_empty() || is_drive(head) {
                // keep the separator of a root
                &trimmed[..idx + 1]
            } else {
                head.trim_end_matches(is_separator)
            }
        }
        None => "",
    }
}

/// Join `name` under `base` with a backslash
pub fn join(base: &str, name: &str) -> String {
    let base = base.trim_end_matches(is_separator);
    if base.is_empty() {
        return name.to_string();
    }
    format!("{}{}{}", base, SEPARATOR, name)
}

/// Display name used in status messages
pub fn display_name(path: &str) -> &str {
    file_name(path).unwrap_or(path)
}
