//! Plain-text table rendering for listing commands.

/// Render rows as a left-aligned table with a header line.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut out = String::new();
    render_row(&mut out, &widths, headers.iter().copied());
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, &widths, separator.iter().map(|s| s.as_str()));
    for row in rows {
        render_row(&mut out, &widths, row.iter().map(|c| c.as_str()));
    }
    out
}

fn render_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for (cell, width) in cells.zip(widths) {
        if !first {
            out.push_str("  ");
        }
        first = false;
        out.push_str(&format!("{:<width$}", cell, width = *width));
    }
    // Trim trailing padding on the last column.
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

/// Shorten long descriptions for one-line table cells.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligns_columns() {
        let out = render(
            &["NAME", "VERSION"],
            &[
                vec!["files".to_string(), "1.0.0".to_string()],
                vec!["a-much-longer-name".to_string(), "2".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[2].starts_with("files             "));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("0123456789abc", 10), "012345678…");
    }
}
