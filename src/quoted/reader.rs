//! Row and dictionary readers over a decoded Quoted-CSV file.

use super::preprocess::{prepare_lines, PreparedLine};
use super::tokenizer::Tokenizer;
use crate::error::{MergeError, MergeResult};
use crate::utils::read_text;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Decoded contents of one Quoted-CSV file.
///
/// The file is read and closed by [`QuotedCsv::open`]; parsing works on the
/// in-memory text.
#[derive(Debug, Clone)]
pub struct QuotedCsv {
    path: PathBuf,
    content: String,
}

impl QuotedCsv {
    pub fn open(path: &Path) -> MergeResult<Self> {
        let (content, encoding) = read_text(path)?;
        tracing::debug!("Read {} ({}, {} bytes)", path.display(), encoding, content.len());
        Ok(Self::from_text(path, content))
    }

    /// Wrap text that is already in memory. `path` is only used in errors.
    pub fn from_text(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self { path: path.into(), content: content.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily parse the file into rows of fields.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            path: &self.path,
            lines: Box::new(prepare_lines(&self.content)),
            tokenizer: Tokenizer::new(),
            done: false,
        }
    }

    /// Parse the header row and return a reader over the remaining rows as records.
    ///
    /// A file without any data line has no header and yields no records.
    pub fn dict_reader(&self) -> MergeResult<DictReader<'_>> {
        let mut rows = self.rows();
        let header = rows.next().transpose()?.map(|row| Rc::new(Header::new(row.fields)));
        Ok(DictReader { rows, header })
    }
}

/// One tokenized row and the line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub line: usize,
    pub fields: Vec<String>,
}

pub struct Rows<'a> {
    path: &'a Path,
    lines: Box<dyn Iterator<Item = PreparedLine> + 'a>,
    tokenizer: Tokenizer,
    done: bool,
}

impl Iterator for Rows<'_> {
    type Item = MergeResult<ParsedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut start_line = None;
        for line in self.lines.by_ref() {
            let start = *start_line.get_or_insert(line.number);
            if let Some(fields) = self.tokenizer.feed_line(&line.text, line.number) {
                return Some(Ok(ParsedRow { line: start, fields }));
            }
        }
        self.done = true;
        match self.tokenizer.finish() {
            Ok(()) => None,
            Err(err) => Some(Err(MergeError::Parse {
                path: self.path.to_path_buf(),
                line: err.line,
                message: err.message,
            })),
        }
    }
}

/// Column names of a file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    pub fn new(names: Vec<String>) -> Self {
        // A repeated name maps to its last position
        let index = names.iter().enumerate().map(|(i, name)| (name.clone(), i)).collect();
        Self { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }
}

/// A data row viewed through its file's header.
#[derive(Debug, Clone)]
pub struct Record {
    header: Rc<Header>,
    values: Vec<String>,
    line: usize,
}

impl Record {
    /// Value of `column`, or `None` if the header has no such column.
    ///
    /// A row shorter than the header reads its missing trailing fields as "".
    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = self.header.position(column)?;
        Some(self.values.get(idx).map(String::as_str).unwrap_or(""))
    }

    /// Value of `column` only if this row actually supplied that field.
    pub fn supplied(&self, column: &str) -> Option<&str> {
        let idx = self.header.position(column)?;
        self.values.get(idx).map(String::as_str)
    }

    /// Line of the file this record started on.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Reader yielding header-keyed records.
///
/// Fields beyond the header's length are dropped.
pub struct DictReader<'a> {
    rows: Rows<'a>,
    header: Option<Rc<Header>>,
}

impl DictReader<'_> {
    pub fn header(&self) -> Option<&Header> {
        self.header.as_deref()
    }
}

impl Iterator for DictReader<'_> {
    type Item = MergeResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let header = self.header.clone()?;
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(err) => return Some(Err(err)),
        };
        let mut values = row.fields;
        if values.len() > header.names().len() {
            tracing::debug!(
                "{}:{}: ignoring {} field(s) beyond the header",
                self.rows.path.display(),
                row.line,
                values.len() - header.names().len()
            );
            values.truncate(header.names().len());
        }
        Some(Ok(Record { header, values, line: row.line }))
    }
}
