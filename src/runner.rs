use crate::{error::RunError, options::Options};
use log::{debug, warn};
use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
};

/// Invokes the wrapped scanner as `<bin> <args...> <extra flags...>`.
#[derive(Debug, Clone)]
pub struct Runner {
    bin_path: PathBuf,
    extra_flags: Vec<String>,
}

impl Runner {
    pub fn new(bin_path: impl Into<PathBuf>) -> Self {
        Runner {
            bin_path: bin_path.into(),
            extra_flags: Vec::new(),
        }
    }

    pub fn from_options(options: &Options) -> Self {
        Runner::new(&options.bin_path).with_extra_flags(options.extra_flags.clone())
    }

    pub fn with_extra_flags(mut self, extra_flags: Vec<String>) -> Self {
        self.extra_flags = extra_flags;
        self
    }

    pub fn bin_path(&self) -> &Path {
        &self.bin_path
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.bin_path);
        cmd.args(args).args(&self.extra_flags);
        debug!("executing {:?}", cmd.as_std());
        cmd
    }

    /// Runs the scanner with stdout and stderr inherited and waits for it.
    pub async fn run<I, S>(&self, args: I) -> Result<(), RunError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let status = self
            .command(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| self.start_error(source))?;

        if !status.success() {
            return Err(RunError::Exit {
                bin: self.bin_path.clone(),
                status,
            });
        }
        Ok(())
    }

    /// Runs the scanner and hands every stdout line to `on_line` in arrival
    /// order. Stderr is inherited. Returns only after the child has exited
    /// and its stdout has been drained.
    pub async fn run_capturing<I, S, F>(&self, args: I, on_line: F) -> Result<(), RunError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
        F: FnMut(String),
    {
        let mut child = self
            .command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| self.start_error(source))?;

        let stdout = child.stdout.take().ok_or_else(|| RunError::Capture {
            bin: self.bin_path.clone(),
            source: io::Error::other("stdout was not captured"),
        })?;

        let (status, scanned) = tokio::join!(child.wait(), forward_lines(stdout, on_line));
        let status = status.map_err(|source| RunError::Wait {
            bin: self.bin_path.clone(),
            source,
        })?;

        if !status.success() {
            if let Err(e) = &scanned {
                warn!("output of {} was cut short: {}", self.bin_path.display(), e);
            }
            return Err(RunError::Exit {
                bin: self.bin_path.clone(),
                status,
            });
        }

        scanned.map_err(|source| RunError::Capture {
            bin: self.bin_path.clone(),
            source,
        })
    }

    fn start_error(&self, source: io::Error) -> RunError {
        RunError::Start {
            bin: self.bin_path.clone(),
            source,
        }
    }
}

async fn forward_lines<R, F>(pipe: R, mut on_line: F) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(String),
{
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        on_line(decode_line(&buf));
    }
}

pub(crate) fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
