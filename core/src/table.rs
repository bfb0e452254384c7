//! Column-aligned text tables for terminal output.
//!
//! `Table::from_records` projects the requested columns out of each record,
//! in the requested order. Every record is checked before any row is built,
//! so a missing column never leaves a half-filled table behind.

use std::fmt;

use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use crate::envelope::Record;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_records<'a, R, C>(records: R, columns: &[C]) -> Result<Self, ApiError>
    where
        R: IntoIterator<Item = &'a Record>,
        C: AsRef<str>,
    {
        let records: Vec<&Record> = records.into_iter().collect();
        for (index, record) in records.iter().enumerate() {
            if let Some(column) = columns.iter().find(|c| !record.contains_key(c.as_ref())) {
                return Err(ApiError::FieldMissing {
                    column: column.as_ref().to_string(),
                    record: index,
                });
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| cell_text(&record[c.as_ref()]))
                    .collect()
            })
            .collect();

        Ok(Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows, header excluded.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| cell_width(&row[i]))
                    .fold(cell_width(header), usize::max)
            })
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let border: String = widths.iter().fold(String::from("+"), |mut line, w| {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
            line
        });

        writeln!(f, "{border}")?;
        write_row(f, &self.columns, &widths)?;
        writeln!(f, "{border}")?;
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        write!(f, "{border}")
    }
}

/// Widest line of a cell, in terminal columns.
fn cell_width(cell: &str) -> usize {
    cell.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

// A multi-line cell spreads over several text lines of the same row.
fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let lines: Vec<Vec<&str>> = cells.iter().map(|c| c.lines().collect()).collect();
    let height = lines.iter().map(Vec::len).max().unwrap_or(0).max(1);
    for i in 0..height {
        f.write_str("|")?;
        for (cell, width) in lines.iter().zip(widths) {
            let line = cell.get(i).copied().unwrap_or("");
            // Pad by display width, not byte or char count.
            let pad = width - line.width();
            write!(f, " {line}{} |", " ".repeat(pad))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
