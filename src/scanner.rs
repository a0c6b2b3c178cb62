use crate::{arguments::Arguments, error::RunError, options::Options, runner::Runner};
use clap::{CommandFactory, FromArgMatches};
use log::debug;
use std::ffi::OsString;

/// Describes the external scanner a wrapper drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanner {
    pub name: String,
    /// Overrides `name` as the default for `--bin`.
    pub default_binary: Option<String>,
}

impl Scanner {
    pub fn new(name: impl Into<String>) -> Self {
        Scanner {
            name: name.into(),
            default_binary: None,
        }
    }

    pub fn with_default_binary(mut self, binary: impl Into<String>) -> Self {
        self.default_binary = Some(binary.into());
        self
    }

    pub fn default_binary_path(&self) -> &str {
        self.default_binary.as_deref().unwrap_or(&self.name)
    }

    /// The wrapper's clap command with this scanner's binary as the `--bin` default.
    pub fn command(&self) -> clap::Command {
        let default_bin = self.default_binary_path().to_string();
        Arguments::command().mut_arg("bin", move |arg| arg.required(false).default_value(default_bin))
    }

    /// Parses the process arguments. Usage errors exit through clap.
    pub fn parse_options(&self) -> Options {
        let matches = self.command().get_matches();
        match Arguments::from_arg_matches(&matches) {
            Ok(args) => args.into(),
            Err(e) => e.exit(),
        }
    }

    pub fn try_parse_options_from<I, T>(&self, args: I) -> Result<Options, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(args)?;
        Ok(Arguments::from_arg_matches(&matches)?.into())
    }
}

/// Prints the scanner's own help. Only a failure to start the scanner is an
/// error; many tools exit non-zero after printing help.
pub async fn show_scanner_help(options: &Options) -> Result<(), RunError> {
    match Runner::new(&options.bin_path).run(["-h"]).await {
        Err(RunError::Exit { status, .. }) => {
            debug!("{} -h exited with {}", options.bin_path.display(), status);
            Ok(())
        }
        other => other,
    }
}

/// Usage note shown after the scanner's help.
pub fn help_note(exe: &str) -> String {
    format!(
        r#"
## Note ##
In order to pass any of these flags to the scanner, append them to the end of the command line, after "--".

Normal: {exe} ... /path/to/input.txt
Extra flags: {exe} ... -- -extra -flags /path/to/input.txt"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_binary_path_falls_back_to_name() {
        let mut scanner = Scanner::new("randomNameNoBinary");
        assert_eq!(scanner.default_binary_path(), "randomNameNoBinary");

        scanner.default_binary = Some("otherBinary".to_string());
        assert_eq!(scanner.default_binary_path(), "otherBinary");
    }

    #[test]
    fn defaults() {
        let options = Scanner::new("myscanner")
            .try_parse_options_from(["myscanner"])
            .unwrap();
        assert_eq!(options.output, PathBuf::from("/output"));
        assert_eq!(options.bin_path, PathBuf::from("myscanner"));
        assert!(!options.extra_help);
        assert!(!options.has_input());
        assert!(options.extra_flags.is_empty());
    }

    #[test]
    fn bin_default_uses_override() {
        let options = Scanner::new("myscanner")
            .with_default_binary("/usr/local/bin/myscanner-cli")
            .try_parse_options_from(["myscanner", "input.txt"])
            .unwrap();
        assert_eq!(options.bin_path, PathBuf::from("/usr/local/bin/myscanner-cli"));
        assert_eq!(options.input, PathBuf::from("input.txt"));
        assert!(options.extra_flags.is_empty());
    }

    #[test]
    fn flags_and_passthrough() {
        let options = Scanner::new("myscanner")
            .try_parse_options_from([
                "myscanner", "-o", "/tmp/results", "-b", "/opt/bin/tool", "--", "-a", "-b",
                "input.txt",
            ])
            .unwrap();
        assert_eq!(options.output, PathBuf::from("/tmp/results"));
        assert_eq!(options.bin_path, PathBuf::from("/opt/bin/tool"));
        assert_eq!(options.extra_flags, ["-a", "-b"]);
        assert_eq!(options.input, PathBuf::from("input.txt"));
    }

    #[test]
    fn long_flags() {
        let options = Scanner::new("myscanner")
            .try_parse_options_from(["myscanner", "--output", "out", "--bin", "tool", "--scanner-help"])
            .unwrap();
        assert_eq!(options.output, PathBuf::from("out"));
        assert_eq!(options.bin_path, PathBuf::from("tool"));
        assert!(options.extra_help);
    }

    #[test]
    fn unknown_flag_before_separator_is_rejected() {
        let result = Scanner::new("myscanner").try_parse_options_from(["myscanner", "-z", "input.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn help_note_mentions_separator() {
        let note = help_note("myscanner");
        assert!(note.contains("## Note ##"));
        assert!(note.contains("Extra flags: myscanner ... -- -extra -flags /path/to/input.txt"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn scanner_help_ignores_exit_status() {
        let options = Options {
            bin_path: PathBuf::from("false"),
            ..Options::default()
        };
        assert!(show_scanner_help(&options).await.is_ok());
    }

    #[tokio::test]
    async fn scanner_help_requires_binary() {
        let options = Options {
            bin_path: PathBuf::from("/nonexistent/scanwrap-test-binary"),
            ..Options::default()
        };
        assert!(matches!(
            show_scanner_help(&options).await,
            Err(RunError::Start { .. })
        ));
    }
}
