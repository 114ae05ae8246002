//! Quoted-CSV dialect: comma delimited, double-quote quoted, backslash escaped,
//! with `#`/`;` full-line comments.
//!
//! Reading runs in two independent stages. [`preprocess`] strips blank and
//! comment lines and rewrites doubled quotes (`""`) into backslash escapes
//! (`\"`). [`tokenizer`] then splits the rewritten lines into fields with a
//! single, backslash-only escaping convention.

pub mod preprocess;
pub mod reader;
pub mod tokenizer;

pub use reader::{DictReader, Header, ParsedRow, QuotedCsv, Record, Rows};
pub use tokenizer::{TokenizeError, Tokenizer};
