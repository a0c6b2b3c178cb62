use clap::Parser;
use std::path::PathBuf;

/// Flags shared by every wrapped scanner. The default for `--bin` is
/// injected at runtime by [`crate::Scanner::command`].
#[derive(Parser, Debug)]
#[command(version, about = "Runs an external scanner over an input file")]
pub struct Arguments {
    /// Scanner results directory
    #[arg(short, long, default_value = "/output")]
    pub output: PathBuf,

    /// Path to scanner binary
    #[arg(short, long)]
    pub bin: PathBuf,

    /// Show help for the scanner extra flags
    #[arg(short = 'H', long = "scanner-help")]
    pub scanner_help: bool,

    /// Extra scanner flags followed by the input file; put extra flags after "--"
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}
