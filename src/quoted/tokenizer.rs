//! Field tokenizer for the backslash-escaped dialect.
//!
//! Fed one prepared line at a time. Quoted fields and escaped line breaks
//! may carry a record over several lines.

use thiserror::Error;

pub const DELIMITER: char = ',';
pub const QUOTE: char = '"';
pub const ESCAPE: char = '\\';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct TokenizeError {
    /// Line on which the offending record started.
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StartRecord,
    StartField,
    EscapedChar,
    InField,
    InQuotedField,
    EscapeInQuotedField,
}

/// Strict tokenizer: comma delimiter, `"` quote, `\` escape, no quote doubling,
/// spaces after a delimiter skipped.
#[derive(Debug)]
pub struct Tokenizer {
    state: State,
    field: String,
    fields: Vec<String>,
    record_line: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self { state: State::StartRecord, field: String::new(), fields: Vec::new(), record_line: 0 }
    }

    /// Consume one line (without its terminator).
    ///
    /// Returns the completed record when this line ends it, `None` when the
    /// record continues on the next line.
    pub fn feed_line(&mut self, line: &str, number: usize) -> Option<Vec<String>> {
        if self.state == State::StartRecord {
            self.record_line = number;
        }
        for c in line.chars() {
            self.feed_char(c);
        }
        self.end_of_line()
    }

    /// Signal end of input. Fails if a record is still open.
    pub fn finish(&mut self) -> Result<(), TokenizeError> {
        if self.state == State::StartRecord {
            return Ok(());
        }
        let line = self.record_line;
        self.reset();
        Err(TokenizeError { line, message: "unexpected end of data".to_string() })
    }

    fn feed_char(&mut self, c: char) {
        match self.state {
            State::StartRecord | State::StartField => {
                if c == QUOTE {
                    self.state = State::InQuotedField;
                } else if c == ESCAPE {
                    self.state = State::EscapedChar;
                } else if c == ' ' {
                    self.state = State::StartField;
                } else if c == DELIMITER {
                    self.save_field();
                    self.state = State::StartField;
                } else {
                    self.field.push(c);
                    self.state = State::InField;
                }
            }
            State::EscapedChar => {
                self.field.push(c);
                self.state = State::InField;
            }
            State::InField => {
                if c == ESCAPE {
                    self.state = State::EscapedChar;
                } else if c == DELIMITER {
                    self.save_field();
                    self.state = State::StartField;
                } else {
                    self.field.push(c);
                }
            }
            State::InQuotedField => {
                if c == ESCAPE {
                    self.state = State::EscapeInQuotedField;
                } else if c == QUOTE {
                    // Without quote doubling a closing quote resumes the plain field
                    self.state = State::InField;
                } else {
                    self.field.push(c);
                }
            }
            State::EscapeInQuotedField => {
                self.field.push(c);
                self.state = State::InQuotedField;
            }
        }
    }

    fn end_of_line(&mut self) -> Option<Vec<String>> {
        match self.state {
            // Only reached for an empty line, which holds no record
            State::StartRecord => None,
            State::StartField | State::InField => {
                self.save_field();
                self.state = State::StartRecord;
                Some(std::mem::take(&mut self.fields))
            }
            State::EscapedChar => {
                self.field.push('\n');
                self.state = State::InField;
                None
            }
            State::InQuotedField => {
                self.field.push('\n');
                None
            }
            State::EscapeInQuotedField => {
                self.field.push('\n');
                self.state = State::InQuotedField;
                None
            }
        }
    }

    fn save_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.field));
    }

    fn reset(&mut self) {
        self.state = State::StartRecord;
        self.field.clear();
        self.fields.clear();
    }
}
