//! Prompt message formatting.
//! Short listings are rendered inline; longer ones become a column layout
//! sized so that no row exceeds the terminal width.

use std::path::PathBuf;

/// Inter-column padding: a comma and two spaces.
const PAD: usize = 3;

/// Fallback width when the terminal size cannot be detected.
const DEFAULT_WIDTH: usize = 80;

/// Detected terminal width in columns.
pub fn detect_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

fn quoted(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| format!("{:?}", p.display().to_string()))
        .collect()
}

/// Quoted, comma-separated single-line rendering.
pub fn inline_list(paths: &[PathBuf]) -> String {
    quoted(paths).join(", ")
}

/// Render `paths` for the detected terminal width.
pub fn format_list(paths: &[PathBuf]) -> String {
    format_list_width(paths, detect_width())
}

/// Render `paths` as columns fitted to `term_width`. Falls back to one line
/// when everything fits; one item per row when even the widest item does not.
pub fn format_list_width(paths: &[PathBuf], term_width: usize) -> String {
    let rendered = quoted(paths);
    if rendered.is_empty() {
        return String::new();
    }

    let inline = rendered.join(", ");
    if inline.len() + 2 < term_width {
        return inline;
    }

    let usable = term_width.saturating_sub(2).max(1);
    let min_width = rendered.iter().map(String::len).min().unwrap_or(1) + PAD;
    let max_width = rendered.iter().map(String::len).max().unwrap_or(1) + PAD;

    let (ncol, col_widths) = if max_width >= usable {
        (1, vec![1])
    } else {
        let mut ncol = (usable / min_width).clamp(1, rendered.len());
        loop {
            let widths = column_widths(&rendered, ncol);
            if widths.iter().sum::<usize>() <= usable || ncol == 1 {
                break (ncol, widths);
            }
            ncol -= 1;
        }
    };

    let mut lines = Vec::new();
    let mut line = String::new();
    let last = rendered.len() - 1;
    for (i, item) in rendered.iter().enumerate() {
        let mut cell = item.clone();
        if i != last {
            cell.push(',');
        }
        let width = col_widths[i % ncol];
        line.push_str(&cell);
        if cell.len() < width {
            line.push_str(&" ".repeat(width - cell.len()));
        }
        if i == last || (i + 1) % ncol == 0 {
            lines.push(line.trim_end().to_string());
            line = String::new();
        }
    }
    lines.join("\n")
}

/// Max rendered item width (plus padding) per column for a given column count.
fn column_widths(rendered: &[String], ncol: usize) -> Vec<usize> {
    (0..ncol)
        .map(|col| {
            rendered
                .iter()
                .enumerate()
                .filter(|(i, _)| i % ncol == col)
                .map(|(_, s)| s.len() + PAD)
                .max()
                .unwrap_or(0)
        })
        .collect()
}
