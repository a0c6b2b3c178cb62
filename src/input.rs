use crate::{error::InputError, options::Options, runner::decode_line};
use serde::de::DeserializeOwned;
use serde_json::de::IoRead;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

/// Lazily yields the lines of an input file with terminators stripped.
/// Bytes that are not UTF-8 are replaced, not rejected. Stop pulling to
/// stop reading.
pub struct Lines {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
}

impl Iterator for Lines {
    type Item = Result<String, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(decode_line(&self.buf))),
            Err(source) => Some(Err(InputError::Read {
                path: self.path.clone(),
                source,
            })),
        }
    }
}

/// Lazily decodes a stream of concatenated JSON values. Fuses after the
/// first decode error.
pub struct Records<T> {
    path: PathBuf,
    inner: serde_json::StreamDeserializer<'static, IoRead<BufReader<File>>, T>,
    failed: bool,
}

impl<T: DeserializeOwned> Iterator for Records<T> {
    type Item = Result<T, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.inner.next()? {
            Ok(record) => Some(Ok(record)),
            Err(source) => {
                self.failed = true;
                Some(Err(InputError::Decode {
                    path: self.path.clone(),
                    source,
                }))
            }
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>, InputError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| InputError::Open {
            path: path.to_path_buf(),
            source,
        })
}

pub fn read_lines(path: impl AsRef<Path>) -> Result<Lines, InputError> {
    let path = path.as_ref();
    Ok(Lines {
        reader: open(path)?,
        path: path.to_path_buf(),
        buf: Vec::new(),
    })
}

pub fn read_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Records<T>, InputError> {
    let path = path.as_ref();
    Ok(Records {
        inner: serde_json::Deserializer::from_reader(open(path)?).into_iter::<T>(),
        path: path.to_path_buf(),
        failed: false,
    })
}

impl Options {
    pub fn input_lines(&self) -> Result<Lines, InputError> {
        read_lines(&self.input)
    }

    pub fn input_records<T: DeserializeOwned>(&self) -> Result<Records<T>, InputError> {
        read_records(&self.input)
    }
}
