use argh::{EarlyExit, FromArgs};
use mime_run::classifier::DEFAULT_CLASSIFIER;
use mime_run::config::DEFAULT_CONFIG;
use mime_run::{Classifier, Dispatcher, Error, FileCommand, ProcessLauncher, load_rules};
use std::ffi::{OsStr, OsString};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Open a file with the program configured for its media type.
struct Cli {
    #[argh(option, default = "PathBuf::from(DEFAULT_CONFIG)")]
    /// rule file to read, relative to the working directory (default: config)
    config: PathBuf,

    #[argh(option, default = "OsString::from(DEFAULT_CLASSIFIER)")]
    /// program that prints the media type of a file (default: file)
    classifier: OsString,

    #[argh(switch, short = 'v')]
    /// trace rule matching and the final command line on stderr
    verbose: bool,

    #[argh(positional)]
    /// file to open; put `--` in front of names starting with `-`
    file: PathBuf,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mime-run: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = parse_cli()?;
    init_tracing(cli.verbose);

    // The rule file is read first so a broken config never spawns the classifier.
    let rules = load_rules(&cli.config)?;
    let media_type = FileCommand::new(&cli.classifier)
        .classify(&cli.file)
        .map_err(Error::from)?;
    debug!(file = %cli.file.display(), %media_type, "classified");

    let dispatcher = Dispatcher::new(rules);
    let launcher = ProcessLauncher::from_env();
    dispatcher.dispatch(&media_type, cli.file.as_os_str(), &launcher)?;
    Ok(())
}

fn parse_cli() -> Result<Cli, Error> {
    let args: Vec<OsString> = std::env::args_os().collect();
    let cmd = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(OsStr::to_str)
        .unwrap_or("mime-run");
    let rest = args.get(1..).unwrap_or_default();

    // argh only takes strings: it validates a lossy copy, then the raw
    // values of path-like arguments are put back.
    let lossy: Vec<String> = rest
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let lossy: Vec<&str> = lossy.iter().map(String::as_str).collect();

    let mut cli = match Cli::from_args(&[cmd], &lossy) {
        Ok(cli) => cli,
        Err(EarlyExit {
            output,
            status: Ok(()),
        }) => {
            println!("{}", output);
            std::process::exit(0)
        }
        Err(EarlyExit {
            output,
            status: Err(()),
        }) => {
            return Err(Error::Usage(format!(
                "{}\nRun {} --help for more information.",
                output.trim_end(),
                cmd
            )));
        }
    };

    let raw = RawPositions::scan(rest);
    if let Some(i) = raw.file {
        cli.file = PathBuf::from(&rest[i]);
    }
    if let Some(i) = raw.config {
        cli.config = PathBuf::from(&rest[i]);
    }
    if let Some(i) = raw.classifier {
        cli.classifier = rest[i].clone();
    }
    Ok(cli)
}

/// Where the path-like values sit in the argument list (program name excluded).
#[derive(Debug, Default, PartialEq)]
struct RawPositions {
    file: Option<usize>,
    config: Option<usize>,
    classifier: Option<usize>,
}

impl RawPositions {
    /// Mirrors argh's reading of the arguments; only meaningful once argh
    /// has accepted them.
    fn scan(args: &[OsString]) -> Self {
        let mut found = Self::default();
        let value_at = |i: usize| Some(i).filter(|&i| i < args.len());
        let mut i = 0;
        while i < args.len() {
            match args[i].to_str() {
                Some("--") => {
                    if found.file.is_none() {
                        found.file = value_at(i + 1);
                    }
                    break;
                }
                Some("--config") => {
                    found.config = value_at(i + 1);
                    i += 1;
                }
                Some("--classifier") => {
                    found.classifier = value_at(i + 1);
                    i += 1;
                }
                Some(opt) if opt.starts_with('-') && opt.len() > 1 => {}
                _ => {
                    if found.file.is_none() {
                        found.file = Some(i);
                    }
                }
            }
            i += 1;
        }
        found
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mime_run=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_file_is_first_plain_argument() {
        let found = RawPositions::scan(&args(&["-v", "notes.txt"]));
        assert_eq!(found.file, Some(1));
        assert_eq!(found.config, None);
    }

    #[test]
    fn test_option_values_are_not_the_file() {
        let found = RawPositions::scan(&args(&[
            "--config",
            "rules",
            "--classifier",
            "./classify",
            "doc.pdf",
        ]));
        assert_eq!(
            found,
            RawPositions {
                file: Some(4),
                config: Some(1),
                classifier: Some(3),
            }
        );
    }

    #[test]
    fn test_file_after_double_dash() {
        let found = RawPositions::scan(&args(&["-v", "--", "-notes.txt"]));
        assert_eq!(found.file, Some(2));
    }

    #[test]
    fn test_no_file() {
        assert_eq!(RawPositions::scan(&args(&["-v"])), RawPositions::default());
        assert_eq!(RawPositions::scan(&args(&["--"])).file, None);
    }

    #[test]
    #[cfg(unix)]
    fn test_non_utf8_file_is_found() {
        use std::os::unix::ffi::OsStringExt;
        let raw = vec![
            OsString::from("-v"),
            OsString::from_vec(b"caf\xe9.txt".to_vec()),
        ];
        assert_eq!(RawPositions::scan(&raw).file, Some(1));
    }
}
