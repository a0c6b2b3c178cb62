use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failures of a wrapped scanner invocation.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start {}: {source}", .bin.display())]
    Start {
        bin: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exited unsuccessfully: {status}", .bin.display())]
    Exit { bin: PathBuf, status: ExitStatus },

    #[error("failed to wait for {}: {source}", .bin.display())]
    Wait {
        bin: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read output of {}: {source}", .bin.display())]
    Capture {
        bin: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    /// Exit code the wrapper should mirror, if the child produced one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunError::Exit { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// Failures while reading the scanner input file.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON record in {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn wait_failure_is_not_a_capture_failure() {
        let err = RunError::Wait {
            bin: PathBuf::from("nuclei"),
            source: io::Error::other("no child process"),
        };
        assert_eq!(err.to_string(), "failed to wait for nuclei: no child process");
        assert_eq!(err.exit_code(), None);
    }
}
