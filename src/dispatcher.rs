use crate::command::{ArgumentVector, Launcher};
use crate::error::{Error, Result};
use crate::rules::{Rule, RuleTable};
use std::ffi::OsStr;
use tracing::{debug, info};

/// What a matching rule asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The rule has no command: finish successfully without running anything.
    Nothing,
    /// Run the handler with these arguments.
    Exec(ArgumentVector),
}

/// Picks the handler for a classified file and hands control to it.
///
/// Rules are consulted in table order and the first exact match wins.
///
/// Example
/// ```
/// use mime_run::{Dispatch, Dispatcher, parse_rules};
/// let rules = parse_rules("text/plain cat\ntext/plain less\n").unwrap();
/// let dispatcher = Dispatcher::new(rules);
/// match dispatcher.plan("text/plain", "notes.txt".as_ref()).unwrap() {
///     Dispatch::Exec(argv) => assert_eq!(argv.as_slice(), &["cat", "notes.txt"]),
///     Dispatch::Nothing => unreachable!(),
/// }
/// ```
pub struct Dispatcher {
    rules: RuleTable,
}

impl Dispatcher {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Finds the first rule for `media_type`.
    ///
    /// # Errors
    /// [`Error::NoMatchingRule`] when no rule names that media type.
    pub fn select(&self, media_type: &str) -> Result<&Rule> {
        for rule in &self.rules {
            debug!("'{}' - '{}'", media_type, rule.media_type);
            if rule.matches(media_type) {
                return Ok(rule);
            }
        }
        Err(Error::NoMatchingRule {
            media_type: media_type.to_string(),
        })
    }

    /// Decides what to do with `file_path` without doing it.
    pub fn plan(&self, media_type: &str, file_path: &OsStr) -> Result<Dispatch> {
        let rule = self.select(media_type)?;
        Ok(match ArgumentVector::build(&rule.command, file_path) {
            Some(argv) => Dispatch::Exec(argv),
            None => Dispatch::Nothing,
        })
    }

    /// Runs the handler for `file_path`.
    ///
    /// `launcher` replaces the process with the handler, so a handler run never
    /// comes back. `Ok(())` means the rule had no command and the caller should
    /// finish successfully.
    pub fn dispatch(
        &self,
        media_type: &str,
        file_path: &OsStr,
        launcher: &dyn Launcher,
    ) -> Result<()> {
        match self.plan(media_type, file_path)? {
            Dispatch::Nothing => {
                info!(%media_type, "rule has no command, nothing to do");
                Ok(())
            }
            Dispatch::Exec(argv) => {
                debug!(argc = argv.as_slice().len(), argv = ?argv.as_slice(), "executing");
                match launcher.exec(&argv)? {}
            }
        }
    }
}
