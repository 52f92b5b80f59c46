/// Splits a title-override list into titles: one per line, trimmed, blank lines dropped.
pub fn parse_titles(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
