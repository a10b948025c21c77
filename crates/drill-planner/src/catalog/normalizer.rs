/// Strips invisible characters, collapses whitespace and lowercases.
pub fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Canonical tag form used across the catalog: `Indoor Court` becomes `indoor_court`.
pub fn normalize_tag(value: &str) -> String {
    normalize_label(value).replace(' ', "_")
}
