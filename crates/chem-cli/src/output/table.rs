//! Aligned plain-text tables.

const MIN_WIDTH: usize = 4;
const SEPARATOR: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A column header and how its cells are aligned.
#[derive(Clone, Copy, Debug)]
pub struct Column<'a> {
    pub header: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    #[must_use]
    pub const fn left(header: &'a str) -> Self {
        Self {
            header,
            align: Align::Left,
        }
    }

    #[must_use]
    pub const fn right(header: &'a str) -> Self {
        Self {
            header,
            align: Align::Right,
        }
    }
}

/// Render rows under `columns`, shrinking the widest columns first when the
/// table would exceed `options.max_width`.
#[must_use]
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(column.header.chars().count())
                .max(MIN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, columns, options.max_width);

    let header_line = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(&clip(column.header, *width), *width, column.align))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    for row in rows {
        let line = columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(index, (column, width))| {
                let value = row.get(index).map_or("-", String::as_str);
                let padded = pad(&clip(value, *width), *width, column.align);
                if options.color {
                    colorize(&padded)
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

/// Shorten notation to at most `max_chars` characters plus `...`.
#[must_use]
pub fn preview(notation: &str, max_chars: usize) -> String {
    if notation.chars().count() <= max_chars {
        return notation.to_string();
    }
    let mut out: String = notation.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

fn fit_widths(widths: &mut [usize], columns: &[Column<'_>], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > columns[*idx].header.len().max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    match align {
        Align::Left => format!("{value}{fill}"),
        Align::Right => format!("{fill}{value}"),
    }
}

/// Color medal and phase names. Padding is kept outside the escape codes.
fn colorize(cell: &str) -> String {
    let word = cell.trim();
    let code = match word {
        "gold" | "scored" => "33",
        "silver" => "37",
        "bronze" => "31",
        "drafted" => "36",
        _ => return cell.to_string(),
    };
    cell.replacen(word, &format!("\u{1b}[{code}m{word}\u{1b}[0m"), 1)
}
