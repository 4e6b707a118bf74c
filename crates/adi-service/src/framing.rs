//! Message framing for the stdio transport.
//!
//! A message is either one line of JSON, or a header block carrying
//! `Content-Length:` followed by a blank line and exactly that many body
//! bytes. Replies go out in the framing the request arrived in.

use std::io::{self, BufRead, Read, Write};

use thiserror::Error;

use crate::protocol::JsonRpcResponse;

/// Largest `Content-Length` body accepted. Bigger frames are skipped and
/// answered with a parse error.
pub const MAX_FRAME_BYTES: u64 = 4 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    LineDelimited,
    ContentLength,
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("missing content-length header")]
    MissingLength,
    #[error("unexpected eof while reading frame headers")]
    HeadersTruncated,
    #[error("frame too large: {0} bytes, limit is {MAX_FRAME_BYTES}")]
    TooLarge(u64),
    #[error("frame body ended after {got} of {expected} bytes")]
    BodyTruncated { got: u64, expected: u64 },
}

#[derive(Debug)]
pub enum Incoming {
    Message { payload: Vec<u8>, frame: Frame },
    /// A frame that could not be read. `frame` is the framing to reply in.
    Malformed { error: FrameError, frame: Frame },
}

impl Incoming {
    const fn malformed(error: FrameError, frame: Frame) -> Self {
        Self::Malformed { error, frame }
    }
}

pub struct FrameReader<R> {
    inner: R,
    line: String,
}

impl<R: BufRead> FrameReader<R> {
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            line: String::new(),
        }
    }

    /// Next message from the stream, or `None` at end of input. Only I/O
    /// failures of the underlying reader are returned as errors.
    pub fn next_message(&mut self) -> io::Result<Option<Incoming>> {
        loop {
            self.line.clear();
            if self.inner.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }

            let text = self.line.trim_end_matches(['\r', '\n']).trim_start();
            if text.is_empty() {
                continue;
            }
            if !is_header_line(text) {
                return Ok(Some(Incoming::Message {
                    payload: text.as_bytes().to_vec(),
                    frame: Frame::LineDelimited,
                }));
            }

            let declared = header_length(text);
            return self.read_framed(declared).map(Some);
        }
    }

    fn read_framed(&mut self, mut length: Option<u64>) -> io::Result<Incoming> {
        loop {
            self.line.clear();
            if self.inner.read_line(&mut self.line)? == 0 {
                return Ok(Incoming::malformed(
                    FrameError::HeadersTruncated,
                    Frame::LineDelimited,
                ));
            }
            let header = self.line.trim_end_matches(['\r', '\n']);
            if header.is_empty() {
                break;
            }
            if let Some(v) = header_length(header) {
                length = Some(v);
            }
        }

        let Some(length) = length else {
            return Ok(Incoming::malformed(
                FrameError::MissingLength,
                Frame::LineDelimited,
            ));
        };
        if length > MAX_FRAME_BYTES {
            io::copy(&mut self.inner.by_ref().take(length), &mut io::sink())?;
            return Ok(Incoming::malformed(
                FrameError::TooLarge(length),
                Frame::LineDelimited,
            ));
        }

        let mut payload = Vec::new();
        let got = self.inner.by_ref().take(length).read_to_end(&mut payload)? as u64;
        if got < length {
            return Ok(Incoming::malformed(
                FrameError::BodyTruncated {
                    got,
                    expected: length,
                },
                Frame::ContentLength,
            ));
        }
        Ok(Incoming::Message {
            payload,
            frame: Frame::ContentLength,
        })
    }
}

pub fn write_response<W: Write>(
    writer: &mut W,
    response: &JsonRpcResponse,
    frame: Frame,
) -> io::Result<()> {
    let body = serde_json::to_vec(response)?;
    match frame {
        Frame::LineDelimited => {
            writer.write_all(&body)?;
            writer.write_all(b"\n")?;
        }
        Frame::ContentLength => {
            write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
            writer.write_all(&body)?;
        }
    }
    writer.flush()
}

fn is_header_line(line: &str) -> bool {
    let Some((name, _)) = line.split_once(':') else {
        return false;
    };
    let name = name.trim();
    name.eq_ignore_ascii_case("content-length") || name.eq_ignore_ascii_case("content-type")
}

fn header_length(line: &str) -> Option<u64> {
    let (name, value) = line.split_once(':')?;
    name.trim()
        .eq_ignore_ascii_case("content-length")
        .then(|| value.trim().parse::<u64>().ok())
        .flatten()
}
