//! Streaming reader for `;`-delimited simulation logs.
//!
//! The reader performs no numeric conversion; it only splits lines into
//! string fields.  It owns its handle, so dropping the iterator (including
//! an early `?` return in the consumer) closes the file.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::core::error::{FormatError, FormatErrorKind, PlotError};

const BUF_CAP: usize = 1 << 16; // 64 KiB

/// Fields of one non-blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the source.
    pub line: usize,
    pub fields: Vec<String>,
}

impl Row {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field `index`, or a `MissingField` error naming this line.
    pub fn field(&self, index: usize) -> Result<&str, FormatError> {
        self.fields.get(index).map(String::as_str).ok_or_else(|| {
            FormatError::at(
                self.line,
                FormatErrorKind::MissingField {
                    needed: index + 1,
                    got: self.fields.len(),
                },
            )
        })
    }

    /// Fail unless the row carries at least `n` fields.
    pub fn require(&self, n: usize) -> Result<(), FormatError> {
        if self.fields.len() < n {
            return Err(FormatError::at(
                self.line,
                FormatErrorKind::MissingField {
                    needed: n,
                    got: self.fields.len(),
                },
            ));
        }
        Ok(())
    }
}

/// Replace the UTF-8 minus sign (U+2212) with ASCII `-` in place.
#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
        } else {
            buf[w] = buf[r];
            r += 1;
        }
        w += 1;
    }
    buf.truncate(w);
}

/// Lazy row iterator over any buffered source.
pub struct TableReader<R> {
    rdr: R,
    buf: Vec<u8>,
    delimiter: u8,
    line_no: usize,
    origin: PathBuf,
    done: bool,
}

impl TableReader<BufReader<File>> {
    /// Open `path` for reading.  Fails with [`PlotError::Io`] naming the path.
    pub fn open(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, PlotError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = Self::new(BufReader::with_capacity(BUF_CAP, file), delimiter);
        reader.origin = path.to_path_buf();
        Ok(reader)
    }
}

impl<R: BufRead> TableReader<R> {
    pub fn new(src: R, delimiter: u8) -> Self {
        Self {
            rdr: src,
            buf: Vec::with_capacity(256),
            delimiter,
            line_no: 0,
            origin: PathBuf::from("<input>"),
            done: false,
        }
    }

    fn split(&self) -> Vec<String> {
        self.buf
            .split(|&b| b == self.delimiter)
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect()
    }
}

impl<R: BufRead> Iterator for TableReader<R> {
    type Item = Result<Row, PlotError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            let n = match self.rdr.read_until(b'\n', &mut self.buf) {
                Ok(n) => n,
                Err(source) => {
                    self.done = true;
                    return Some(Err(PlotError::Io {
                        path: self.origin.clone(),
                        source,
                    }));
                }
            };
            if n == 0 {
                self.done = true;
                return None;
            }
            self.line_no += 1;

            if self.buf.ends_with(b"\n") {
                self.buf.pop();
            }
            if self.buf.ends_with(b"\r") {
                self.buf.pop();
            }
            if self.buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            normalize_unicode_minus(&mut self.buf);

            return Some(Ok(Row {
                line: self.line_no,
                fields: self.split(),
            }));
        }
    }
}
