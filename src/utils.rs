/// Returns the file name component of a path, splitting on both `/` and `\`.
///
/// Falls back to the whole path when the last segment is empty (e.g. a trailing separator).
pub fn file_name(path: &str) -> &str {
    match path.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name,
        _ => path,
    }
}

/// Returns true if the haystack contains the needle, ignoring case.
///
/// Lowercases both sides, so non-ASCII names match as well.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Shortens a string to at most `max` characters, keeping the tail and prefixing `...`.
pub fn truncate_start(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let suffix: String = text.chars().skip(count - keep).collect();
    format!("...{}", suffix)
}
