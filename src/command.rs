use crate::error::{Error, Result};
use crate::external::{DEFAULT_SEARCH_PATH, find_command_path};
use crate::rules::CommandTemplate;
use std::convert::Infallible;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::Command;

/// Arguments of the handler process, `argv[0]` included.
///
/// Built from a non-empty [`CommandTemplate`] with the target file appended
/// as the last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector {
    argv: Vec<OsString>,
}

impl ArgumentVector {
    /// Returns `None` for an empty template, which has no program to run.
    pub fn build(command: &CommandTemplate, file_path: &OsStr) -> Option<Self> {
        let program = command.program()?;
        let mut argv = vec![OsString::from(program)];
        argv.extend(command.args().iter().map(OsString::from));
        argv.push(file_path.to_owned());
        Some(Self { argv })
    }

    /// The program name, used both as `argv[0]` and for the search-path lookup.
    pub fn program(&self) -> &OsStr {
        &self.argv[0]
    }

    /// Everything after `argv[0]`.
    pub fn args(&self) -> &[OsString] {
        &self.argv[1..]
    }

    pub fn as_slice(&self) -> &[OsString] {
        &self.argv
    }
}

/// Hands control over to a handler program.
///
/// A successful launch never comes back to the caller, so the only value an
/// implementation can return is an error.
pub trait Launcher {
    fn exec(&self, argv: &ArgumentVector) -> Result<Infallible>;
}

/// Launches handlers by replacing the current process image.
///
/// The handler inherits standard input, output and error as well as the
/// environment. On platforms without process replacement the handler runs as
/// a child and its exit status becomes ours.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    search_path: OsString,
}

impl ProcessLauncher {
    pub fn new(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: search_path.into(),
        }
    }

    /// Uses `PATH` from the environment, or the usual system directories when unset.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("PATH").unwrap_or_else(|| DEFAULT_SEARCH_PATH.into()))
    }
}

impl Launcher for ProcessLauncher {
    fn exec(&self, argv: &ArgumentVector) -> Result<Infallible> {
        let program = argv.program();
        let execution_error = |source: io::Error| Error::Execution {
            program: program.to_string_lossy().into_owned(),
            source,
        };

        let path = find_command_path(&self.search_path, Path::new(program)).ok_or_else(|| {
            execution_error(io::Error::new(io::ErrorKind::NotFound, "command not found"))
        })?;

        let mut cmd = Command::new(&*path);
        cmd.args(argv.args());
        Err(execution_error(replace_process(cmd, program)))
    }
}

#[cfg(unix)]
fn replace_process(mut cmd: Command, arg0: &OsStr) -> io::Error {
    use std::os::unix::process::CommandExt;
    cmd.arg0(arg0).exec()
}

#[cfg(not(unix))]
fn replace_process(mut cmd: Command, _arg0: &OsStr) -> io::Error {
    match cmd.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(err) => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(words: &[&str]) -> CommandTemplate {
        words.iter().copied().collect()
    }

    #[test]
    fn test_file_path_is_appended_last() {
        let argv = ArgumentVector::build(&template(&["echo", "hi"]), OsStr::new("f.txt")).unwrap();
        assert_eq!(argv.as_slice(), &["echo", "hi", "f.txt"]);
        assert_eq!(argv.program(), "echo");
        assert_eq!(argv.args(), &["hi", "f.txt"]);
    }

    #[test]
    fn test_program_only_template() {
        let argv = ArgumentVector::build(&template(&["xdg-open"]), OsStr::new("a b.pdf")).unwrap();
        assert_eq!(argv.as_slice(), &["xdg-open", "a b.pdf"]);
    }

    #[test]
    fn test_words_are_not_resplit() {
        let argv =
            ArgumentVector::build(&template(&["sh", "-c", "less \"$0\""]), OsStr::new("x")).unwrap();
        assert_eq!(argv.as_slice(), &["sh", "-c", "less \"$0\"", "x"]);
    }

    #[test]
    fn test_empty_template_builds_nothing() {
        assert!(ArgumentVector::build(&CommandTemplate::default(), OsStr::new("f")).is_none());
    }

    #[test]
    fn test_missing_program_is_execution_error() {
        let launcher = ProcessLauncher::new("/nonexisting-dir");
        let argv = ArgumentVector::build(&template(&["mime-run-no-such-handler"]), OsStr::new("f"))
            .unwrap();
        match launcher.exec(&argv) {
            Err(Error::Execution { program, source }) => {
                assert_eq!(program, "mime-run-no-such-handler");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected execution error, got {:?}", other),
        }
    }
}
