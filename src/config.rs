use crate::error::{Error, Result};
use crate::parser;
use crate::rules::RuleTable;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the rule file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG: &str = "config";

/// Read the rule file at `path` in full and parse it.
///
/// The whole file is loaded before parsing starts; rule files are expected to
/// be small.
///
/// # Errors
/// [`Error::ConfigIo`] when the file cannot be opened or read;
/// [`Error::ConfigEncoding`] when it is not UTF-8;
/// [`Error::ConfigSyntax`] when its contents are malformed.
pub fn load_rules(path: impl AsRef<Path>) -> Result<RuleTable> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::ConfigIo {
        path: path.to_owned(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|err| Error::ConfigEncoding {
        path: path.to_owned(),
        valid_up_to: err.utf8_error().valid_up_to(),
    })?;

    let rules = parser::parse_rules(&text)?;
    debug!(path = %path.display(), rules = rules.len(), "loaded rule table");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env as stdenv;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_file(tag: &str, contents: &[u8]) -> PathBuf {
        let mut path = stdenv::temp_dir();
        path.push(format!("mime_run_config_{}_{}", tag, std::process::id()));
        let mut f = fs::File::create(&path).expect("create tmp file");
        f.write_all(contents).expect("write");
        path
    }

    #[test]
    fn test_load_rules_from_file() {
        let path = temp_file("ok", b"text/plain cat\nimage/png feh\n");
        let table = load_rules(&path).unwrap();
        assert_eq!(table.len(), 2);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_large_file() {
        let text: String = (0..3000).map(|i| format!("a/b{} c d e f\n", i)).collect();
        assert!(text.len() > 4096 * 4);
        let path = temp_file("large", text.as_bytes());
        let table = load_rules(&path).unwrap();
        assert_eq!(table.len(), 3000);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_config_io_error() {
        let path = stdenv::temp_dir().join(format!(
            "mime_run_config_missing_{}",
            std::process::id()
        ));
        match load_rules(&path) {
            Err(Error::ConfigIo { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected ConfigIo, got {:?}", other),
        }
    }

    #[test]
    fn test_non_utf8_file_is_encoding_error() {
        let path = temp_file("binary", b"text/plain \xff\xfe\n");
        let err = load_rules(&path).unwrap_err();
        assert!(err.to_string().contains("is not valid UTF-8"), "{}", err);
        match err {
            Error::ConfigEncoding { path: p, valid_up_to } => {
                assert_eq!(p, path);
                assert_eq!(valid_up_to, 11);
            }
            other => panic!("expected ConfigEncoding, got {:?}", other),
        }
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_syntax_error_is_propagated() {
        let path = temp_file("syntax", b"text/plain 'cat'; ls\n");
        assert!(matches!(
            load_rules(&path),
            Err(Error::ConfigSyntax { found: ';', .. })
        ));
        let _ = fs::remove_file(path);
    }
}
