use bytes::Bytes;
use tracing::trace;

use crate::error::{CursorError, Result};

/// Reads bytes sequentially from an immutable buffer.
///
/// The cursor tracks its own position; the underlying buffer is shared and never
/// copied, so [`read_buffer`](Self::read_buffer) hands out cheap `Bytes` slices.
#[derive(Debug, Clone)]
pub struct ReadCursor {
    buf: Bytes,
    pos: usize,
}

impl ReadCursor {
    /// Create a cursor positioned at the start of `buf`.
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// Number of bytes remaining after the current position.
    pub fn len(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns true if no bytes remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current position, measured from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unread part of the buffer.
    pub fn remaining(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Peek the byte `offset` positions ahead without advancing.
    pub fn get(&self, offset: usize) -> Result<u8> {
        match self.remaining().get(offset) {
            Some(byte) => Ok(*byte),
            None => Err(self.out_of_bounds(offset + 1)),
        }
    }

    /// Read exactly `n` bytes and advance past them.
    ///
    /// Fails without moving if fewer than `n` bytes remain.
    pub fn read_buffer(&mut self, n: usize) -> Result<Bytes> {
        if n > self.len() {
            return Err(self.out_of_bounds(n));
        }
        let chunk = self.buf.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(chunk)
    }

    /// Read exactly `N` bytes into an array and advance past them.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        if N > self.len() {
            return Err(self.out_of_bounds(N));
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Read a single byte and advance past it.
    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Run `op` and restore the starting position if it fails.
    ///
    /// Multi-step decoders use this so a failure never leaves the cursor partway
    /// through a value.
    pub fn rollback_on_error<T, E>(
        &mut self,
        op: impl FnOnce(&mut Self) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        let start = self.pos;
        let result = op(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    /// Consume the cursor and return the whole underlying buffer.
    pub fn into_inner(self) -> Bytes {
        self.buf
    }

    fn out_of_bounds(&self, requested: usize) -> CursorError {
        let remaining = self.len();
        trace!(requested, remaining, "read past end of cursor");
        CursorError::OutOfBounds {
            requested,
            remaining,
        }
    }
}

impl From<Bytes> for ReadCursor {
    fn from(buf: Bytes) -> Self {
        Self::new(buf)
    }
}

impl From<Vec<u8>> for ReadCursor {
    fn from(buf: Vec<u8>) -> Self {
        Self::new(buf)
    }
}
