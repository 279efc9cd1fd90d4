/// Normalizes a string for use as a package or directory name.
///
/// Lowercases, maps every character outside `[a-z0-9_]` to `_`, collapses runs
/// of underscores and trims them from both ends. Falls back to `default` when
/// nothing usable remains.
pub fn slugify(value: &str, default: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.trim().to_lowercase().chars() {
        let ch = if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            ch
        } else {
            '_'
        };
        if ch == '_' && slug.ends_with('_') {
            continue;
        }
        slug.push(ch);
    }

    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        default.to_string()
    } else {
        slug.to_string()
    }
}
