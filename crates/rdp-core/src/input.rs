//! Problem input: connection parameters followed by the chunk list.
//!
//! ```text
//! 2000        image size (bytes)
//! 25          latency (s)
//! 15          bandwidth (bytes/s)
//! 2           number of chunks
//! 0,1800
//! 1000,2000
//! ```

use std::io::{BufRead, Lines};

use crate::chunk::Chunk;
use crate::connection::ConnectionInfo;
use crate::error::InputError;

/// Cap on up-front allocation; the declared count is untrusted.
const MAX_PREALLOCATED_CHUNKS: usize = 100_000;

/// Source of the four connection parameters.
pub trait ConnectionInfoProvider {
    fn connection_info(&mut self) -> Result<ConnectionInfo, InputError>;
}

/// Source of exactly `num_chunks` validated chunks.
pub trait ChunkListProvider {
    fn chunks(&mut self, num_chunks: u64) -> Result<Vec<Chunk>, InputError>;
}

/// Reads both providers from one line-oriented stream, numbering lines from 1
/// across the whole input.
pub struct LineReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next line, or `MalformedInput` naming what was expected if the input ended.
    fn expect_line(&mut self, what: &str) -> Result<String, InputError> {
        match self.lines.next() {
            Some(line) => {
                self.line += 1;
                Ok(line?)
            }
            None => Err(InputError::malformed(
                self.line + 1,
                format!("unexpected end of input, expected {what}"),
            )),
        }
    }

    fn read_value(&mut self, what: &str) -> Result<u64, InputError> {
        let text = self.expect_line(what)?;
        let text = text.trim();
        text.parse::<u64>().map_err(|_| {
            InputError::malformed(
                self.line,
                format!("expected a non-negative integer for {what}, got {text:?}"),
            )
        })
    }

    fn read_chunk(&mut self, index: u64) -> Result<Chunk, InputError> {
        let text = self.expect_line(&format!("chunk {}", index + 1))?;
        let line = self.line;
        let fields: Vec<&str> = text.trim().split(',').collect();
        if fields.len() != 2 {
            return Err(InputError::malformed(
                line,
                format!("expected \"start,end\", got {} field(s)", fields.len()),
            ));
        }
        let parse = |field: &str| {
            let field = field.trim();
            field.parse::<i64>().map_err(|_| {
                InputError::malformed(line, format!("expected an integer offset, got {field:?}"))
            })
        };
        let start = parse(fields[0])?;
        let end = parse(fields[1])?;
        Chunk::from_raw(start, end, line)
    }
}

impl<R: BufRead> ConnectionInfoProvider for LineReader<R> {
    fn connection_info(&mut self) -> Result<ConnectionInfo, InputError> {
        let image_size = self.read_value("image size")?;
        let latency = self.read_value("latency")?;
        let bandwidth = self.read_value("bandwidth")?;
        if bandwidth == 0 {
            return Err(InputError::malformed(self.line, "bandwidth must be positive"));
        }
        let num_chunks = self.read_value("chunk count")?;
        Ok(ConnectionInfo {
            image_size,
            latency,
            bandwidth,
            num_chunks,
        })
    }
}

impl<R: BufRead> ChunkListProvider for LineReader<R> {
    fn chunks(&mut self, num_chunks: u64) -> Result<Vec<Chunk>, InputError> {
        let capacity = usize::try_from(num_chunks)
            .unwrap_or(MAX_PREALLOCATED_CHUNKS)
            .min(MAX_PREALLOCATED_CHUNKS);
        let mut out = Vec::with_capacity(capacity);
        for index in 0..num_chunks {
            out.push(self.read_chunk(index)?);
        }
        Ok(out)
    }
}
