//! Line selection by event marker.

/// A line that belongs to the current pass, with its 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Unanchored, case-sensitive substring test
pub fn matches_marker(line: &str, marker: &str) -> bool {
    line.contains(marker)
}

/// Select every line of `text` that carries `marker`, in file order
pub fn select_lines<'a>(text: &'a str, marker: &str) -> Vec<SelectedLine<'a>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| matches_marker(line, marker))
        .map(|(idx, line)| SelectedLine {
            number: idx + 1,
            text: line,
        })
        .collect()
}
