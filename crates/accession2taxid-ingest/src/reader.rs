//! Line reader for accession2taxid files
//!
//! Opens plain or gzip-compressed input, consumes the header line, and yields
//! the remaining lines one at a time with trailing whitespace stripped.

use accession2taxid_common::{Accession2TaxidError, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Read buffer for input files; accession2taxid dumps run to several GB
const READ_BUFFER_SIZE: usize = 1 << 20;

/// Value parser for CLI path arguments: the path must exist
pub fn existing_path(s: &str) -> Result<PathBuf> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(Accession2TaxidError::PathNotFound(path))
    }
}

/// Open an input file, decompressing `.gz` files transparently
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Accession2TaxidError::PathNotFound(path.to_path_buf()),
        _ => Accession2TaxidError::Io(e),
    })?;

    let is_gzip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    let inner: Box<dyn Read> = if is_gzip {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, inner)))
}

/// One data line and its 1-based position in the input (the header is line 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedLine {
    pub number: u64,
    pub text: String,
}

/// Single-pass iterator over the data lines of an input
pub struct LineReader<R: BufRead> {
    inner: R,
    header: Option<String>,
    line_number: u64,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a reader, consuming its first line as the header
    pub fn new(mut inner: R) -> Result<Self> {
        let header = read_stripped(&mut inner)?;
        Ok(Self {
            inner,
            line_number: u64::from(header.is_some()),
            header,
        })
    }

    /// The discarded header line, `None` for an empty input
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<NumberedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        match read_stripped(&mut self.inner) {
            Ok(Some(text)) => {
                self.line_number += 1;
                Some(Ok(NumberedLine {
                    number: self.line_number,
                    text,
                }))
            },
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Read one line, `None` at end of input
fn read_stripped<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    buf.truncate(buf.trim_end().len());
    Ok(Some(buf))
}
