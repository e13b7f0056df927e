//! Unified diff between the original and the enhanced resume.

use diffy::{create_patch, Hunk, HunkRange, Line};

/// File-header labels for the two sides of the diff.
#[derive(Debug, Clone, Copy)]
pub struct DiffLabels<'a> {
    pub original: &'a str,
    pub enhanced: &'a str,
}

impl Default for DiffLabels<'_> {
    fn default() -> Self {
        Self {
            original: "Original Resume",
            enhanced: "Enhanced Resume",
        }
    }
}

/// Unified diff with the default "Original Resume" / "Enhanced Resume" headers.
pub fn show_diff(original: &str, enhanced: &str) -> String {
    show_diff_with_labels(original, enhanced, DiffLabels::default())
}

/// Unified diff (3 lines of context) rendered as newline-joined lines.
/// Equal inputs produce an empty string.
pub fn show_diff_with_labels(original: &str, enhanced: &str, labels: DiffLabels<'_>) -> String {
    let original = normalize_lines(original);
    let enhanced = normalize_lines(enhanced);

    let patch = create_patch(&original, &enhanced);
    if patch.hunks().is_empty() {
        return String::new();
    }

    let mut lines = vec![
        format!("--- {}", labels.original),
        format!("+++ {}", labels.enhanced),
    ];
    for hunk in patch.hunks() {
        push_hunk(&mut lines, hunk);
    }

    lines.join("\n")
}

/// Re-joins `text` so every line ends in exactly one `\n`, which keeps
/// "no newline at end of file" markers out of the output.
fn normalize_lines(text: &str) -> String {
    text.lines().map(|line| format!("{line}\n")).collect()
}

fn push_hunk(lines: &mut Vec<String>, hunk: &Hunk<'_, str>) {
    lines.push(format!(
        "@@ -{} +{} @@",
        format_range(hunk.old_range()),
        format_range(hunk.new_range())
    ));

    for line in hunk.lines() {
        let (prefix, text) = match line {
            Line::Context(text) => (' ', *text),
            Line::Delete(text) => ('-', *text),
            Line::Insert(text) => ('+', *text),
        };
        lines.push(format!("{prefix}{}", text.strip_suffix('\n').unwrap_or(text)));
    }
}

fn format_range(range: HunkRange) -> String {
    if range.len() == 1 {
        range.start().to_string()
    } else {
        format!("{},{}", range.start(), range.len())
    }
}
