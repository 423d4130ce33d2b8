//! Word-level scanning of rule files.
//!
//! A rule file is read one word at a time. A word is either a run of characters
//! up to the next blank or newline, or a quoted run (`"..."` or `'...'`) that may
//! contain blanks. No escape sequences exist: everything between the quotes is
//! taken literally, and the quotes themselves are not part of the word.

use crate::error::{Error, Result};

/// Returns true for the blanks that separate words on a line.
///
/// A newline is *not* a blank: it terminates the line instead.
pub fn is_ws(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Read position inside a rule file.
///
/// Keeps track of the line and column of the next unread character so that
/// syntax errors can point at the offending spot.
pub struct Cursor {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    /// Creates a cursor positioned at the first character of `text`.
    pub fn new(text: &str) -> Self {
        Cursor {
            input: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    pub fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if let Some(ch) = ch {
            self.pos += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    /// True when the next character ends the current line (newline or end of input).
    pub fn at_line_end(&self) -> bool {
        matches!(self.peek_char(), None | Some('\n'))
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Skips spaces and tabs, stopping at the first other character.
    pub fn skip_ws(&mut self) {
        while self.peek_char().is_some_and(is_ws) {
            self.read_char();
        }
    }

    /// 1-based `(line, column)` of the next unread character.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

/// Extracts one word starting at the cursor and advances past it.
///
/// Quoted words run until the matching quote, a newline or the end of input,
/// whichever comes first; the closing quote is optional. Unquoted words run
/// until a blank, a newline or the end of input.
///
/// # Errors
/// Returns [`Error::ConfigSyntax`] when the word is immediately followed by a
/// character other than a blank, a newline or the end of input (for example
/// `"abc",def`).
pub fn parse_word(cursor: &mut Cursor) -> Result<String> {
    let mut word = String::new();

    match cursor.peek_char() {
        Some(quote @ ('"' | '\'')) => {
            cursor.read_char();
            while let Some(ch) = cursor.peek_char() {
                if ch == '\n' {
                    break;
                }
                cursor.read_char();
                if ch == quote {
                    break;
                }
                word.push(ch);
            }
        }
        _ => {
            while let Some(ch) = cursor.peek_char() {
                if ch == '\n' || is_ws(ch) {
                    break;
                }
                word.push(ch);
                cursor.read_char();
            }
        }
    }

    match cursor.peek_char() {
        None | Some('\n') => Ok(word),
        Some(ch) if is_ws(ch) => Ok(word),
        Some(found) => {
            let (line, column) = cursor.position();
            Err(Error::ConfigSyntax {
                found,
                line,
                column,
            })
        }
    }
}
