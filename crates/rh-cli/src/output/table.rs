#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 6;
const SEPARATOR: &str = "  ";

/// Render an aligned table. Columns shrink, widest first, until the table
/// fits in `max_width`, and never below the header or [`MIN_COLUMN_WIDTH`].
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(column_floor(header))
        })
        .collect::<Vec<_>>();

    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = clip(row.get(index).map_or("-", String::as_str), *width);
                let numeric = looks_numeric(&cell);
                let padded = pad(&cell, *width, numeric);
                if options.color {
                    colorize_status(&cell, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn column_floor(header: &str) -> usize {
    header.chars().count().max(MIN_COLUMN_WIDTH)
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > column_floor(headers[*index]))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
        total -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out = value.chars().take(width - 1).collect::<String>();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Wrap known status words in ANSI color. Padding stays outside the escape.
fn colorize_status(cell: &str, padded: String) -> String {
    let code = match cell.trim().to_ascii_lowercase().as_str() {
        "ok" | "true" | "success" | "healthy" | "authenticated" | "ai" => "32",
        "info" | "pending" | "skipped" | "user" => "33",
        "error" | "failed" | "false" | "unhealthy" => "31",
        _ => return padded,
    };
    let fill = &padded[cell.len()..];
    format!("\u{1b}[{code}m{cell}\u{1b}[0m{fill}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{TableOptions, clip, render_entity_table};

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["p-1".into(), "Attention Is All You Need".into(), "120".into()],
            vec!["p-200".into(), "BERT".into(), "9".into()],
        ]
    }

    #[test]
    fn columns_align_and_numbers_right_align() {
        let table = render_entity_table(
            &["id", "title", "citations"],
            &rows(),
            TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[3].ends_with("        9"));
        let title_col = lines[0].find("title").expect("title header");
        assert_eq!(lines[2].find("Attention"), Some(title_col));
        assert_eq!(lines[3].find("BERT"), Some(title_col));
    }

    #[test]
    fn narrow_terminal_clips_the_widest_column() {
        let table = render_entity_table(
            &["id", "title", "citations"],
            &rows(),
            TableOptions {
                max_width: Some(30),
                color: false,
            },
        );
        assert!(table.contains('…'));
        assert!(table.lines().all(|line| line.chars().count() <= 30));
    }

    #[test]
    fn color_wraps_only_status_words() {
        let table = render_entity_table(
            &["level", "message"],
            &[vec!["error".into(), "boom".into()]],
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        let row = table.lines().nth(2).expect("data row");
        assert!(row.starts_with("\u{1b}[31merror\u{1b}[0m"));
        assert!(row.contains("boom"));
    }

    #[test]
    fn clip_counts_characters_not_bytes() {
        assert_eq!(clip("Gödel, Escher", 6), "Gödel…");
        assert_eq!(clip("short", 6), "short");
    }
}
