use chem_core::responses::{LeaderboardResponse, SubmitResponse};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{Column, TableOptions};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_fields(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render a ranked leaderboard. In table mode notation is cut to
/// `preview_len` characters unless `preview_len` is `None`.
pub fn render_leaderboard(
    board: &LeaderboardResponse,
    format: OutputFormat,
    preview_len: Option<usize>,
) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(board, format);
    }
    if board.standings.is_empty() {
        return Ok(String::from("(no compounds submitted yet)"));
    }

    let columns = [
        Column::right("#"),
        Column::left("medal"),
        Column::left("nickname"),
        Column::right("ic50"),
        Column::left("smiles"),
    ];
    let rows = board
        .standings
        .iter()
        .map(|standing| {
            let smiles = preview_len.map_or_else(
                || standing.entry.smiles.clone(),
                |len| table::preview(&standing.entry.smiles, len),
            );
            vec![
                standing.position.to_string(),
                standing
                    .medal
                    .map_or_else(String::new, |medal| format!("{} {medal}", medal.badge())),
                standing.entry.nickname.clone(),
                standing.entry.ic50.to_string(),
                smiles,
            ]
        })
        .collect::<Vec<_>>();

    let mut rendered = table::render_table(&columns, &rows, table_options());
    if board.standings.len() < board.total {
        rendered.push_str(&format!(
            "\n({} of {} compounds shown)",
            board.standings.len(),
            board.total
        ));
    }
    Ok(rendered)
}

pub fn output_leaderboard(
    board: &LeaderboardResponse,
    format: OutputFormat,
    preview_len: Option<usize>,
) -> anyhow::Result<()> {
    println!("{}", render_leaderboard(board, format, preview_len)?);
    Ok(())
}

/// Print a submission receipt followed by the refreshed leaderboard.
pub fn output_submission(
    response: &SubmitResponse,
    format: OutputFormat,
    preview_len: Option<usize>,
) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(response, format);
    }
    let entry = &response.submitted;
    let place = response
        .position
        .map_or_else(String::new, |position| format!(" at #{position}"));
    println!(
        "Submitted {} (IC50 {}){place} as {}\n",
        entry.nickname, entry.ic50, entry.id
    );
    output_leaderboard(&response.leaderboard, format, preview_len)
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.table_width,
        color: prefs.color,
    }
}

/// Key/value table of a response, nested objects flattened to dotted keys.
fn render_fields<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let mut rows = Vec::new();
    flatten("", &serde_json::to_value(value)?, &mut rows);
    let columns = [Column::left("field"), Column::left("value")];
    Ok(table::render_table(&columns, &rows, table_options()))
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<Vec<String>>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, rows);
            }
        }
        leaf => rows.push(vec![prefix.to_string(), value_to_cell(leaf)]),
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
