use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Search path used when `PATH` is not set, matching what `execvp` falls back to.
pub const DEFAULT_SEARCH_PATH: &str = "/usr/local/bin:/usr/bin:/bin";

/// Locate a handler program the way `execvp` would.
///
/// - A name containing a path separator (`/usr/bin/less`, `./view`, `bin/x`)
///   is used as given, relative to the working directory if not absolute.
/// - A bare name is looked up in each directory of `search_path` in order.
/// - An empty name is never found.
///
/// Only regular files are accepted; on Unix they must also carry an execute bit.
pub fn find_command_path<'a>(search_path: &OsStr, program: &'a Path) -> Option<Cow<'a, Path>> {
    let mut components = program.components();
    match (components.next(), components.next()) {
        (None, _) => None,
        (Some(name), None) if !program.is_absolute() && !has_separator(program) => {
            find_in_path(search_path, name.as_os_str()).map(Cow::Owned)
        }
        _ => find_by_path(program).map(Cow::Borrowed),
    }
}

fn has_separator(program: &Path) -> bool {
    program
        .to_str()
        .map(|s| s.contains(std::path::MAIN_SEPARATOR) || s.contains('/'))
        .unwrap_or(true)
}

fn find_in_path(search_path: &OsStr, name: &OsStr) -> Option<PathBuf> {
    for dir in std::env::split_paths(search_path) {
        // An empty PATH entry means the working directory.
        let dir = if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir
        };
        let candidate = dir.join(name);
        if find_by_path(&candidate).is_some() {
            return Some(candidate);
        }
    }
    None
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if is_executable(path) { Some(path) } else { None }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
