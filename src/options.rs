use crate::arguments::Arguments;
use std::path::PathBuf;

/// Parsed command line for one wrapper invocation. Built once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    pub bin_path: PathBuf,
    pub extra_help: bool,
    /// Passed verbatim to the scanner after the wrapper's own arguments.
    pub extra_flags: Vec<String>,
}

impl Options {
    /// True when a positional input path was supplied.
    pub fn has_input(&self) -> bool {
        !self.input.as_os_str().is_empty()
    }
}

impl From<Arguments> for Options {
    fn from(args: Arguments) -> Self {
        let (input, extra_flags) = split_positionals(args.args);
        Options {
            input: input.map(PathBuf::from).unwrap_or_default(),
            output: args.output,
            bin_path: args.bin,
            extra_help: args.scanner_help,
            extra_flags,
        }
    }
}

/// The last positional is the input file, everything before it is passed
/// through to the scanner.
pub fn split_positionals(mut positionals: Vec<String>) -> (Option<String>, Vec<String>) {
    let input = positionals.pop();
    (input, positionals)
}
