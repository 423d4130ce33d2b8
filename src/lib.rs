//! Run the right program for a file, chosen by its media type.
//!
//! A rule file maps media types to commands, one rule per line:
//!
//! ```text
//! text/plain        less
//! image/png         feh --scale-down
//! application/pdf   zathura
//! inode/x-empty
//! ```
//!
//! The file to open is classified by an external program (`file` by default),
//! the first rule naming the resulting media type is selected and its command
//! replaces the current process, with the file path appended as the last
//! argument. A rule without a command means "do nothing".
//!
//! The pieces are usable on their own: [`parse_rules`] and [`load_rules`] build
//! a [`RuleTable`], a [`Classifier`] names a file's media type, and a
//! [`Dispatcher`] picks and launches the handler.

pub mod classifier;
pub mod command;
pub mod config;
mod dispatcher;
mod error;
mod external;
pub mod lexer;
mod parser;
pub mod rules;

pub use classifier::{Classifier, FileCommand};
pub use command::{ArgumentVector, Launcher, ProcessLauncher};
pub use config::load_rules;
pub use dispatcher::{Dispatch, Dispatcher};
pub use error::{ClassificationError, Error, Result};
pub use parser::{parse_command, parse_rules};
pub use rules::{CommandTemplate, Rule, RuleTable};
