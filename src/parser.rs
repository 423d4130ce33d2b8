use crate::error::Result;
use crate::lexer::{self, Cursor};
use crate::rules::{CommandTemplate, Rule, RuleTable};
use tracing::trace;

/// Parse the rest of the current line as a command: `word (ws word)*`.
///
/// Stops in front of the newline (or at the end of input) without consuming it.
/// A line with nothing left on it yields an empty template.
pub fn parse_command(cursor: &mut Cursor) -> Result<CommandTemplate> {
    let mut words = Vec::new();

    loop {
        cursor.skip_ws();
        if cursor.at_line_end() {
            break;
        }
        words.push(lexer::parse_word(cursor)?);
    }

    Ok(CommandTemplate::new(words))
}

/// Parse a whole rule file into a [`RuleTable`].
///
/// Each non-blank line becomes one rule: its first word is the media type and
/// the remaining words are the command. Lines holding only blanks are skipped.
/// Rules keep the order of their lines.
///
/// # Errors
///
/// Fails with [`crate::Error::ConfigSyntax`] on the first malformed word; no
/// partial table is returned.
pub fn parse_rules(text: &str) -> Result<RuleTable> {
    let mut cursor = Cursor::new(text);
    let mut rules = Vec::new();

    loop {
        if cursor.peek_char() == Some('\n') {
            cursor.read_char();
        }
        if cursor.at_end() {
            break;
        }

        cursor.skip_ws();
        if cursor.at_line_end() {
            continue;
        }

        let media_type = lexer::parse_word(&mut cursor)?;
        cursor.skip_ws();
        let command = parse_command(&mut cursor)?;
        trace!(%media_type, command = ?command.words(), "parsed rule");
        rules.push(Rule::new(media_type, command));
    }

    Ok(RuleTable::new(rules))
}
