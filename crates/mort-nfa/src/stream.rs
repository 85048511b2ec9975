use std::io::{self, ErrorKind, Read, Seek, SeekFrom};

/// Byte-at-a-time access to a seekable input, which is all the simulator and scanner need.
///
/// Blanket-implemented for every `Read + Seek`, so a `File`, a `BufReader<File>` or an
/// in-memory `Cursor` can all be scanned directly. Repositioning goes through
/// `Seek::seek_relative`, which `BufReader` serves from its buffer when the target is inside it.
pub trait ByteStream: Read + Seek {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn offset(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        let here = self.stream_position()?;
        if offset != here {
            self.seek_relative(offset.wrapping_sub(here) as i64)?;
        }
        Ok(())
    }

    // peek without moving
    fn at_end(&mut self) -> io::Result<bool> {
        let byte = self.read_byte()?;
        if byte.is_some() {
            self.seek_relative(-1)?;
        }
        Ok(byte.is_none())
    }
}

impl<T: Read + Seek + ?Sized> ByteStream for T {}

fn before_start() -> io::Error {
    io::Error::new(ErrorKind::InvalidInput, "seek to a position before the start of the stream")
}

/// Keeps its own copy of the stream offset so position queries never reach the inner reader.
///
/// `File::stream_position` is a system call, and a `BufReader<File>` forwards it, so the
/// scanner's per-definition offset queries are answered here instead. Relative moves are passed
/// on as `seek_relative`, leaving an inner `BufReader`'s buffer intact.
pub struct PositionedReader<R> {
    inner: R,
    pos: u64,
}

impl<R: Read + Seek> PositionedReader<R> {
    pub fn new(mut inner: R) -> io::Result<Self> {
        let pos = inner.stream_position()?;
        Ok(Self { inner, pos })
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for PositionedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R: Seek> Seek for PositionedReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Start(target) => self.seek_relative(target.wrapping_sub(self.pos) as i64)?,
            SeekFrom::Current(delta) => self.seek_relative(delta)?,
            SeekFrom::End(_) => self.pos = self.inner.seek(pos)?,
        }
        Ok(self.pos)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.pos)
    }

    fn seek_relative(&mut self, offset: i64) -> io::Result<()> {
        let target = self.pos.checked_add_signed(offset).ok_or_else(before_start)?;
        if offset != 0 {
            self.inner.seek_relative(offset)?;
        }
        self.pos = target;
        Ok(())
    }
}
