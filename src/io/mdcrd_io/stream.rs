// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Buffered byte stream with position tracking and formatted numeric reads.

use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

use crate::structures::vector3d::Vector3D;

/// Result of reading a single numeric field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Field {
    Number(f32),
    /// Stream ended before any field could be read.
    End,
    /// Non-numeric content where a number was expected.
    Invalid(String),
}

/// Result of reading the coordinates of a single frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FrameRead {
    Complete,
    /// Stream ended after the specified number of complete atoms.
    Exhausted(usize),
    Invalid(String),
}

/// Greedy recognizer for decimal floating point numbers.
///
/// Accepts the longest prefix that can form a number so fields
/// without separating whitespace (e.g. `   1.000-123.456`) are split correctly.
#[derive(Debug, Default)]
struct NumberScanner {
    len: usize,
    digits: bool,
    point: bool,
    exponent: bool,
    last: u8,
}

impl NumberScanner {
    /// Returns `true` if `byte` extends the number.
    fn accept(&mut self, byte: u8) -> bool {
        let accepted = match byte {
            b'0'..=b'9' => true,
            b'+' | b'-' => self.len == 0 || matches!(self.last, b'e' | b'E'),
            b'.' => !self.point && !self.exponent,
            b'e' | b'E' => self.digits && !self.exponent,
            _ => false,
        };

        if accepted {
            match byte {
                b'0'..=b'9' => self.digits = true,
                b'.' => self.point = true,
                b'e' | b'E' => self.exponent = true,
                _ => (),
            }

            self.len += 1;
            self.last = byte;
        }

        accepted
    }
}

/// Convert collected bytes into a field.
fn bytes_to_field(bytes: &[u8]) -> Field {
    let string = String::from_utf8_lossy(bytes);
    match string.parse::<f32>() {
        Ok(x) => Field::Number(x),
        Err(_) => Field::Invalid(string.into_owned()),
    }
}

/// Parse a line as a periodic box: exactly three numbers and nothing else.
///
/// ## Returns
/// Box dimensions and the index of the byte following the third number.
/// `None` if the line is not a box line.
pub(crate) fn parse_box_line(line: &[u8]) -> Option<([f32; 3], usize)> {
    let mut values = [0.0f32; 3];
    let mut n_values = 0;
    let mut end = 0;
    let mut i = 0;

    loop {
        while i < line.len() && line[i].is_ascii_whitespace() {
            i += 1;
        }

        if i == line.len() {
            break;
        }

        if n_values == 3 {
            return None;
        }

        let start = i;
        let mut scanner = NumberScanner::default();
        while i < line.len() && scanner.accept(line[i]) {
            i += 1;
        }

        match bytes_to_field(&line[start..i]) {
            Field::Number(x) => values[n_values] = x,
            _ => return None,
        }

        n_values += 1;
        end = i;
    }

    if n_values == 3 {
        Some((values, end))
    } else {
        None
    }
}

/// Byte stream of an mdcrd file.
///
/// Tracks the absolute position in the underlying reader and whether the end
/// of the stream has been reached by the last read.
#[derive(Debug)]
pub(crate) struct MdcrdStream<R: Read + Seek> {
    buffer: BufReader<R>,
    position: u64,
    eof: bool,
}

impl<R: Read + Seek> MdcrdStream<R> {
    /// Wrap a reader. The reader must be positioned at its start.
    pub(crate) fn new(reader: R) -> Self {
        MdcrdStream {
            buffer: BufReader::new(reader),
            position: 0,
            eof: false,
        }
    }

    #[inline(always)]
    pub(crate) fn position(&self) -> u64 {
        self.position
    }

    #[inline(always)]
    pub(crate) fn is_eof(&self) -> bool {
        self.eof
    }

    #[inline(always)]
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        let available = self.buffer.fill_buf()?;
        Ok(available.first().copied())
    }

    #[inline(always)]
    fn consume_byte(&mut self) {
        self.buffer.consume(1);
        self.position += 1;
    }

    /// Seek to an absolute position and clear the end-of-stream flag.
    pub(crate) fn seek(&mut self, position: u64) -> io::Result<()> {
        self.buffer.seek(SeekFrom::Start(position))?;
        self.position = position;
        self.eof = false;
        Ok(())
    }

    /// Get the total length of the stream in bytes. The current position is preserved.
    pub(crate) fn stream_len(&mut self) -> io::Result<u64> {
        let len = self.buffer.seek(SeekFrom::End(0))?;
        self.buffer.seek(SeekFrom::Start(self.position))?;
        Ok(len)
    }

    /// Read bytes up to and including the next newline character.
    ///
    /// ## Returns
    /// Number of bytes read. Zero means the stream has ended.
    pub(crate) fn read_line(&mut self, line: &mut Vec<u8>) -> io::Result<usize> {
        line.clear();
        loop {
            match self.peek_byte()? {
                None => {
                    self.eof = true;
                    return Ok(line.len());
                }
                Some(byte) => {
                    self.consume_byte();
                    line.push(byte);
                    if byte == b'\n' {
                        return Ok(line.len());
                    }
                }
            }
        }
    }

    /// Skip bytes up to and including the next newline character.
    pub(crate) fn skip_line(&mut self) -> io::Result<usize> {
        let mut skipped = 0;
        loop {
            match self.peek_byte()? {
                None => {
                    self.eof = true;
                    return Ok(skipped);
                }
                Some(byte) => {
                    self.consume_byte();
                    skipped += 1;
                    if byte == b'\n' {
                        return Ok(skipped);
                    }
                }
            }
        }
    }

    /// Read the next whitespace-separated numeric field.
    ///
    /// Leading whitespace (including newlines) is skipped. The field ends at
    /// the first byte that cannot continue the number, so the 8-column width
    /// of mdcrd fields is not enforced.
    pub(crate) fn read_number(&mut self) -> io::Result<Field> {
        loop {
            match self.peek_byte()? {
                None => {
                    self.eof = true;
                    return Ok(Field::End);
                }
                Some(byte) if byte.is_ascii_whitespace() => self.consume_byte(),
                Some(_) => break,
            }
        }

        let mut bytes = Vec::with_capacity(16);
        let mut scanner = NumberScanner::default();
        loop {
            match self.peek_byte()? {
                None => {
                    self.eof = true;
                    break;
                }
                Some(byte) if scanner.accept(byte) => {
                    self.consume_byte();
                    bytes.push(byte);
                }
                Some(byte) => {
                    if bytes.is_empty() {
                        return Ok(Field::Invalid((byte as char).to_string()));
                    }
                    break;
                }
            }
        }

        Ok(bytes_to_field(&bytes))
    }

    /// Read three numeric fields.
    pub(crate) fn read_triple(&mut self) -> io::Result<Result<[f32; 3], Field>> {
        let mut triple = [0.0f32; 3];
        for item in triple.iter_mut() {
            match self.read_number()? {
                Field::Number(x) => *item = x,
                other => return Ok(Err(other)),
            }
        }

        Ok(Ok(triple))
    }

    /// Read coordinates of `positions.len()` atoms into `positions`, overwriting them in place.
    pub(crate) fn read_coordinates(&mut self, positions: &mut [Vector3D]) -> io::Result<FrameRead> {
        for (i, position) in positions.iter_mut().enumerate() {
            match self.read_triple()? {
                Ok(triple) => *position = Vector3D::from(triple),
                Err(Field::End) => return Ok(FrameRead::Exhausted(i)),
                Err(Field::Invalid(string)) => return Ok(FrameRead::Invalid(string)),
                Err(Field::Number(_)) => panic!(
                    "FATAL MDCRD ERROR | MdcrdStream::read_coordinates | Complete number reported as a failure."
                ),
            }
        }

        Ok(FrameRead::Complete)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
