/// One wrapped line of a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    pub is_last_line_of_entry: bool,
}

/// Greedily wraps `title` into lines no wider than `max_width`.
///
/// Words are separated by any run of whitespace and rejoined with single
/// spaces. A word that is wider than `max_width` on its own still gets a line
/// to itself; it is neither hyphenated nor truncated. A title with at least
/// one word always produces at least one line.
pub fn wrap<F>(title: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in title.split_whitespace() {
        if current_line.is_empty() {
            current_line.push_str(word);
            continue;
        }

        let candidate_len = current_line.len();
        current_line.push(' ');
        current_line.push_str(word);

        if measure(&current_line) > max_width {
            current_line.truncate(candidate_len);
            lines.push(std::mem::replace(&mut current_line, word.to_string()));
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }
    lines
}

/// Like [`wrap`], but marks the final line so callers can append the page label to it.
pub fn wrap_lines<F>(title: &str, max_width: f32, measure: F) -> Vec<WrappedLine>
where
    F: Fn(&str) -> f32,
{
    let lines = wrap(title, max_width, measure);
    let last = lines.len().saturating_sub(1);
    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| WrappedLine {
            text,
            is_last_line_of_entry: i == last,
        })
        .collect()
}
