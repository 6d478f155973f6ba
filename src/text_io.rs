//! Line-oriented UTF-8 text input/output.
//!
//! Files are read whole and split into records with any line ending
//! (`\n`, `\r\n` or `\r`) removed. On output every record is terminated by
//! a single `\n`. [`rows_from_lines`] and [`lines_from_table`] convert
//! between delimited records and [`Table`] rows of string cells.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::table::Table;
use crate::table_error::TableError;
use crate::value::Value;

/// Errors raised at the text boundary.
#[derive(Debug, Error)]
pub enum TextIoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// A text file addressed by path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextFile {
    path: PathBuf,
}

impl TextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every line of the file, without line endings.
    ///
    /// # Errors
    /// `Io` if the file cannot be read or is not valid UTF-8.
    pub fn load(&self) -> Result<Vec<String>, TextIoError> {
        read_lines(fs::File::open(&self.path)?)
    }

    /// Overwrite the file with `lines`, one record per line.
    pub fn save<I, S>(&self, lines: I) -> Result<(), TextIoError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = std::io::BufWriter::new(fs::File::create(&self.path)?);
        write_lines(&mut out, lines)?;
        out.flush()?;
        Ok(())
    }
}

/// Read all of `reader` and split it into records.
pub fn read_lines<R: Read>(mut reader: R) -> Result<Vec<String>, TextIoError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let body = text.strip_suffix('\n').unwrap_or(&text);
    Ok(body.split('\n').map(str::to_owned).collect())
}

/// Write each record followed by exactly one `\n`.
///
/// A record's own trailing line ending, if any, is replaced.
pub fn write_lines<W, I, S>(writer: &mut W, lines: I) -> Result<(), TextIoError>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        let line = line.as_ref().trim_end_matches(['\r', '\n']);
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Split each line on `delimiter` into a row of `Str` cells.
///
/// An empty line becomes an empty row.
///
/// # Errors
/// Never fails under the standard settings; the `Result` is that of
/// [`Table::new`].
pub fn rows_from_lines<I, S>(lines: I, delimiter: &str) -> Result<Table, TableError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rows: Vec<Vec<Value>> = lines
        .into_iter()
        .map(|line| {
            let line = line.as_ref();
            if line.is_empty() {
                Vec::new()
            } else {
                line.split(delimiter).map(Value::from).collect()
            }
        })
        .collect();
    Table::new(rows)
}

/// Join each row of `table` with `delimiter`.
///
/// Strings are written verbatim, `Absent` as an empty field, and every
/// other value in its display form.
pub fn lines_from_table(table: &Table, delimiter: &str) -> Vec<String> {
    table
        .iter()
        .map(|row| {
            row.iter()
                .map(|value| match value {
                    Value::Str(s) => s.clone(),
                    Value::Absent => String::new(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(delimiter)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_endings_are_normalized() {
        let lines = read_lines("a,b\r\nc\rd\n".as_bytes()).unwrap();
        assert_eq!(lines, vec!["a,b", "c", "d"]);
        assert!(read_lines("".as_bytes()).unwrap().is_empty());
        assert_eq!(read_lines("\n".as_bytes()).unwrap(), vec![""]);
        assert_eq!(read_lines("x".as_bytes()).unwrap(), vec!["x"]);
    }

    #[test]
    fn each_record_gets_one_newline() {
        let mut out = Vec::new();
        write_lines(&mut out, ["a", "b\n", "c\r\n"]).unwrap();
        assert_eq!(out, b"a\nb\nc\n");
    }

    #[test]
    fn delimited_rows() {
        let table = rows_from_lines(["1,2,3", "", "x"], ",").unwrap();
        assert_eq!(table.row_lengths(), &[3, 0, 1]);
        assert_eq!(table.cell(0, 1).unwrap(), &Value::from("2"));
        assert_eq!(lines_from_table(&table, ","), vec!["1,2,3", "", "x"]);
    }
}
