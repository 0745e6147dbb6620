// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text table rendering for command output.

use serde::Serialize;
use std::io::{self, Write};

/// Writes `records` as an aligned table with one column per entry of `columns`.
///
/// Records are serialized with serde and looked up by field name. Every cell,
/// header included, is left-justified to the widest entry of its column and
/// followed by a single space. Only the first line of a multi-line value is
/// shown. Missing fields and nulls render as empty cells.
///
/// # Examples
///
/// ```rust
/// use cfgchain::cli::write_table;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     first_name: String,
///     age: u32,
/// }
///
/// let users = vec![User { first_name: "John".into(), age: 19 }];
/// let mut out = Vec::new();
/// write_table(&mut out, &users, &["age", "first_name"]).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "age first_name \n--- ---------- \n19  John       \n"
/// );
/// ```
pub fn write_table<W, T>(out: &mut W, records: &[T], columns: &[&str]) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    let rows = records
        .iter()
        .map(|record| {
            let value = serde_json::to_value(record)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            Ok(columns
                .iter()
                .map(|column| cell_text(value.get(*column)))
                .collect::<Vec<_>>())
        })
        .collect::<io::Result<Vec<_>>>()?;

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_row(out, columns.iter().copied(), &widths)?;
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, dashes.iter().map(String::as_str), &widths)?;
    for row in &rows {
        write_row(out, row.iter().map(String::as_str), &widths)?;
    }
    Ok(())
}

/// Prints `records` as a table on standard output.
///
/// See [`write_table`] for the layout.
pub fn print_table<T: Serialize>(records: &[T], columns: &[&str]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_table(&mut handle, records, columns)
}

fn write_row<'a, W: Write>(
    out: &mut W,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> io::Result<()> {
    for (cell, width) in cells.zip(widths) {
        write!(out, "{:<width$} ", cell, width = *width)?;
    }
    writeln!(out)
}

fn cell_text(value: Option<&serde_json::Value>) -> String {
    let text = match value {
        None | Some(serde_json::Value::Null) => return String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    text.lines().next().unwrap_or("").to_string()
}
